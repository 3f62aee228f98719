//! Request and Response models for the screenshot API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{BatchScreenshotRequest, MAX_BATCH_SIZE};
pub use responses::{BatchScreenshotResponse, HealthResponse, ScreenshotResponse};
