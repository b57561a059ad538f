//! Shared application domain, persistence and upstream clients.

pub mod auth;
pub mod cache;
pub mod config;
pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;

mod uuids;

pub use uuids::TypedUuid;
