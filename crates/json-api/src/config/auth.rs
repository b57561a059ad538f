//! Auth Config

use std::time::Duration;

use clap::Args;
use mixdesk_app::auth::SupabaseConfig;

/// Supabase authentication settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Supabase project URL
    #[arg(long, env = "SUPABASE_URL")]
    pub supabase_url: String,

    /// Supabase anon key
    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    pub supabase_anon_key: String,

    /// Timeout for access token validation in milliseconds
    #[arg(long, env = "SUPABASE_TIMEOUT_MS", default_value_t = 5_000)]
    pub supabase_timeout_ms: u64,
}

impl AuthConfig {
    pub(crate) fn supabase_config(&self) -> SupabaseConfig {
        SupabaseConfig {
            url: self.supabase_url.clone(),
            anon_key: self.supabase_anon_key.clone(),
            timeout: Duration::from_millis(self.supabase_timeout_ms),
        }
    }
}
