//! Auth service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::{AuthServiceError, SupabaseAuthClient},
    domain::users::UserUuid,
};

#[derive(Debug, Clone)]
pub struct SupabaseAuthService {
    client: SupabaseAuthClient,
}

impl SupabaseAuthService {
    #[must_use]
    pub fn new(client: SupabaseAuthClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthService for SupabaseAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError> {
        if bearer_token.trim().is_empty() {
            return Err(AuthServiceError::Unauthorized);
        }

        let user = self.client.user(bearer_token).await?;

        Ok(UserUuid::from_uuid(user.id))
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve the signed-in user for an access token.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError>;
}
