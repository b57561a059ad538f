//! Authentication

mod errors;
mod models;
pub mod supabase;
mod service;

pub use errors::*;
pub use models::*;
pub use service::*;
pub use supabase::{SupabaseAuthClient, SupabaseConfig};
