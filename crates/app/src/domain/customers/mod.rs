//! Customers

pub mod errors;
pub mod records;
mod repository;
pub mod service;
pub mod stripe;

pub use errors::{CustomersServiceError, StripeError};
pub use repository::{CustomersRepository, MockCustomersRepository, PgCustomersRepository};
pub use service::*;
pub use stripe::{MockStripeCustomers, StripeClient, StripeConfig, StripeCustomers};
