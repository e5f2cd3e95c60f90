//! Data Transfer Objects for the HTTP API.
//!
//! Resource entities themselves are schema-less (`serde_json::Value`); the
//! DTOs here cover the envelope types the API owns.

use serde::{Deserialize, Serialize};

/// Success message body for update/delete operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageBody {
    /// Human-readable outcome description
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Database connection status
    pub database: String,
}
