use std::collections::HashMap;

use axum::{Extension, extract::Query, response::Html};
use tracing::debug;

use crate::{management::CallbackQuery, server::CallbackSlot};

/// Records the redirect from the authorization page.
///
/// Only the first callback is kept; the token exchange itself happens in the
/// login command once it picks the query up.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(slot): Extension<CallbackSlot>,
) -> Html<&'static str> {
    let query = CallbackQuery::from_params(&params);
    if query.is_empty() {
        return Html("<h4>Missing authorization code.</h4>");
    }

    let denied = query.error.is_some();
    let mut lock = slot.lock().await;
    if lock.is_some() {
        debug!("ignoring repeated callback");
        return Html("<h4>Login already in progress. You can close this window.</h4>");
    }
    *lock = Some(query);

    if denied {
        Html("<h4>Login was cancelled.</h4>")
    } else {
        Html("<h2>Authorization received.</h2><p>You can close this window.</p>")
    }
}
