//! Service layer for business logic
//!
//! HTTP handlers stay thin; validation, defaults and storage calls live here.

mod analytics_service;
mod image_service;
mod resume_service;

pub use analytics_service::*;
pub use image_service::*;
pub use resume_service::*;
