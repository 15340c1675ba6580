//! # helphub-core
//!
//! Core crate for HelpHub. Contains configuration schemas, typed
//! identifiers, and the unified error system.
//!
//! This crate has **no** internal dependencies on other HelpHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
