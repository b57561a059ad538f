//! Plans

mod handlers;

pub(crate) use handlers::*;
