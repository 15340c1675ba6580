//! Help request lifecycle.

pub mod service;

pub use service::RequestService;
