//! Plan Handlers

pub(crate) mod current;
