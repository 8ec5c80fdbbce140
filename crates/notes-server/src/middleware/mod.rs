//! HTTP middleware.

pub mod error_details;
pub mod request_id;
