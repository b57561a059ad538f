//! Auth data models.

use serde::Deserialize;
use uuid::Uuid;

/// User returned by the identity provider for a valid access token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,

    #[serde(default)]
    pub email: Option<String>,
}
