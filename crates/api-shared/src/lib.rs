//! # API Shared
//!
//! Shared utilities and definitions for the mapper APIs.
//!
//! Contains:
//! - JSON request/response types (`wire` module) with OpenAPI schemas
//! - Shared services like `HealthService`
//! - Mock ABHA token checks
//!
//! Used by `api-rest` and the `namaste-run` server binary.

pub mod auth;
pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
