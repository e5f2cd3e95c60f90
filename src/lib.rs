//! # Fleet Rust Backend
//!
//! REST API service for fleet operations data.
//!
//! This crate exposes CRUD endpoints for two resource types (aircraft and
//! maintenance tasks) backed by a relational data store behind a repository
//! interface. The HTTP layer is deliberately thin: it translates requests
//! into repository calls, repository outcomes into JSON responses, and tags
//! every request with a correlation id for log tracing.
//!
//! ## Architecture
//!
//! The crate is organized into three logical modules:
//!
//! - [`models`]: Identifier newtypes and shared domain types
//! - [`db`]: Repository pattern and persistence backends
//! - [`http`]: Axum-based HTTP server, handlers, and request logging
//!
//! Persistence backends are selected by feature flag: `local-repo` keeps
//! everything in memory (the default, used by tests and local development),
//! `postgres-repo` talks to PostgreSQL through Diesel.

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod db;
pub mod models;

#[cfg(feature = "http-server")]
pub mod http;
