//! Promotion Handlers

pub(crate) mod active;
