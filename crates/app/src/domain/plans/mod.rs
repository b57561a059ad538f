//! Plans

pub mod errors;
pub mod records;
mod repository;
pub mod service;
pub mod tiers;

pub use errors::PlansServiceError;
pub use repository::{MockPlansRepository, PgPlansRepository, PlanAccount, PlansRepository};
pub use service::*;
