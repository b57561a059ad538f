//! Form webhooks

pub mod errors;
pub mod payload;
pub mod records;
pub mod service;

pub use errors::WebhooksServiceError;
pub use payload::build_test_payload;
pub use service::*;
