use axum::{extract::State, response::Html};
use tracing::{instrument, trace};

use crate::schemas::AppState;

/// Dashboard page, rendered once at startup
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Html<String> {
    trace!("Serving dashboard page");
    Html(state.page.to_string())
}
