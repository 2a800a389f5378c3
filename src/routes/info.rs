//! Static application metadata.

use axum::Json;

use crate::models::{AppInfo, APP_INFO};

/// Application info handler. The body is identical on every call.
pub async fn info() -> Json<AppInfo> {
    Json(APP_INFO)
}
