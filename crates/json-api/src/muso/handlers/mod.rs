//! Muso Handlers

pub(crate) mod get;
