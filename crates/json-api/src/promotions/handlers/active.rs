//! Active Promotion Handler

use std::sync::Arc;

use salvo::{http::header::CACHE_CONTROL, prelude::*};

use crate::{extensions::*, observability::observe_promotion_lookup, state::State};

/// Response header naming where the payload came from (`cache`, `upstream` or `fallback`).
pub(crate) const PROMOTION_ORIGIN_HEADER: &str = "x-promotion-origin";

/// Active Promotion Handler
///
/// Returns `{"promotion": {...}}` for the running promotion, or
/// `{"promotion": null}`. Always answers 200; upstream trouble yields `null`.
#[endpoint(
    tags("promotions"),
    summary = "Active Promotion",
    responses(
        (status_code = StatusCode::OK, description = "Current promotion or null"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot, res: &mut Response) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let payload = state.app.promotions.active_promotion().await;
    let origin = payload.origin.as_str();

    observe_promotion_lookup(origin);

    res.add_header(PROMOTION_ORIGIN_HEADER, origin, true)
        .or_500("failed to set promotion origin header")?
        .add_header(CACHE_CONTROL, "no-store", true)
        .or_500("failed to set cache control header")?;

    res.render(Text::Json(payload.body));

    Ok(())
}
