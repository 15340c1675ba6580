//! Core type definitions used across the HelpHub workspace.

pub mod id;

pub use id::*;
