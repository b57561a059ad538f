//! Auth middleware.

use std::sync::Arc;

use mixdesk_app::{auth::AuthServiceError, domain::users::UserUuid};
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use crate::{extensions::*, state::State};

/// Require a valid bearer token and record its user.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));
        ctrl.skip_rest();

        return;
    };

    match authenticate(token, depot).await {
        Ok(user) => depot.insert_user_uuid(user),
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    }

    ctrl.call_next(req, depot, res).await;
}

/// Record the bearer user when a token is supplied, without requiring one.
///
/// A supplied token must still be valid.
#[salvo::handler]
pub(crate) async fn identify(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if req.headers().contains_key(AUTHORIZATION) {
        let Some(token) = extract_bearer_token(req) else {
            res.render(StatusError::unauthorized().brief("Invalid Authorization header"));
            ctrl.skip_rest();

            return;
        };

        match authenticate(token, depot).await {
            Ok(user) => depot.insert_user_uuid(user),
            Err(error) => {
                res.render(error);
                ctrl.skip_rest();

                return;
            }
        }
    }

    ctrl.call_next(req, depot, res).await;
}

async fn authenticate(token: &str, depot: &Depot) -> Result<UserUuid, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    match state.app.auth.authenticate_bearer(token).await {
        Ok(user) => Ok(user),
        Err(AuthServiceError::Unauthorized) => {
            Err(StatusError::unauthorized().brief("Invalid or expired access token"))
        }
        Err(source @ (AuthServiceError::Http(_) | AuthServiceError::UnexpectedResponse(_))) => {
            error!("failed to validate access token: {source}");

            Err(StatusError::internal_server_error())
        }
    }
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
