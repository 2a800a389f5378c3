//! Landing page handler.

use axum::{extract::State, response::Html};
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;
use crate::templates::render_index;

/// Landing page handler. Renders `index.html` with no variables.
#[instrument(name = "home::index", skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let html = render_index(&state.tera)?;
    Ok(Html(html))
}
