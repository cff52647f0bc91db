//! Security Module
//!
//! Provides the security pieces of the MoodMate API:
//! - Request Validation
//! - Security Middleware

pub mod middleware;
pub mod validation;

pub use middleware::security_headers_middleware;
pub use validation::{Validatable, ValidationError};
