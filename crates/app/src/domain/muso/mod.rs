//! Muso.ai credits

pub mod client;
pub mod errors;
pub mod records;
pub mod service;

pub use client::{MockMusoApi, MusoApi, MusoClient, MusoConfig};
pub use errors::{MusoApiError, MusoServiceError};
pub use service::*;
