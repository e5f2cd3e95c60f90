//! HTTP server module for the fleet backend.
//!
//! This module provides an axum-based HTTP server exposing the fleet
//! resources as a REST API on top of the repository layer.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Logging Middleware (correlation id, start/end lines)     │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  HTTP Layer (axum router + handlers)                      │
//! │  - Id parsing, JSON serialization, status mapping         │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Repository Layer (db/)                                   │
//! │  - LocalRepository / PostgresRepository                   │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod logger;
pub mod router;
pub mod state;

pub use logger::{Logger, StdoutLogger};
pub use router::create_router;
pub use state::AppState;
