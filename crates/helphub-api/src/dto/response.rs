//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Unread notification summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnreadResponse {
    /// Whether anything is unread.
    pub has_unread: bool,
    /// Unread count.
    pub count: u64,
}

/// Result of a bulk mark-as-read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkedResponse {
    /// How many notifications flipped to read.
    pub marked: u64,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
