//! HTTP handlers for prompt-service.

pub mod health;
pub mod image;
pub mod text;

pub use health::{health_check, metrics_endpoint, not_found, readiness_check};
pub use image::generate_image;
pub use text::generate_text;
