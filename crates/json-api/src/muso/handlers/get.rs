//! Muso Profile Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{extensions::*, muso::errors::into_status_error, state::State};

const PROFILE_ID_QUERY: &str = "profileId";

/// Muso Profile Handler
///
/// Proxies the Muso.ai profile and chart for `?profileId=`, or for the
/// configured default profile when the parameter is omitted. Returns
/// `{"profile": ..., "chart": ...}`; `chart` is `null` when unavailable.
#[endpoint(
    tags("muso"),
    summary = "Muso Profile",
    responses(
        (status_code = StatusCode::OK, description = "Profile and chart"),
        (status_code = StatusCode::BAD_REQUEST, description = "No profile id"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Muso rejected the api key"),
        (status_code = StatusCode::NOT_FOUND, description = "Profile not found"),
        (status_code = StatusCode::TOO_MANY_REQUESTS, description = "Muso rate limit"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let profile_id = req.query::<String>(PROFILE_ID_QUERY);

    let overview = state
        .app
        .muso
        .overview(profile_id)
        .await
        .map_err(into_status_error)?;

    res.render(Json(overview));

    Ok(())
}
