//! Domain services.

pub mod customers;
pub mod muso;
pub mod plans;
pub mod promotions;
pub mod users;
pub mod webhooks;
