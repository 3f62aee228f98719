//! API Module
//!
//! HTTP handlers and routing for the screenshot service.
//!
//! # Endpoints
//! - `GET /cameras/:camera_id/screenshot` - Screenshot for one camera
//! - `POST /screenshots` - Screenshots for a list of cameras
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
