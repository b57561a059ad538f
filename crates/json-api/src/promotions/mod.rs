//! Promotions

mod handlers;

pub(crate) use handlers::*;
