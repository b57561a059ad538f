//! Promotions

pub mod errors;
pub mod parse;
pub mod records;
pub mod service;
pub mod source;

pub use errors::PromotionSourceError;
pub use service::*;
pub use source::{HttpPromotionSource, MockPromotionSource, PromotionSource};
