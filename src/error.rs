use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Template rendering error: {0}")]
    Template(#[from] tera::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("Internal error: {:?}", self);
        error_page(
            StatusCode::INTERNAL_SERVER_ERROR,
            "The server encountered an internal error and was unable to complete your request.",
        )
    }
}

/// Fallback for unmatched routes.
pub async fn not_found() -> Response {
    error_page(
        StatusCode::NOT_FOUND,
        "The requested URL was not found on the server. If you entered the URL manually please check your spelling and try again.",
    )
}

/// Render a minimal HTML error page for the given status.
fn error_page(status: StatusCode, message: &str) -> Response {
    let reason = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        r#"<!doctype html>
<html lang=en>
<title>{} {}</title>
<h1>{}</h1>
<p>{}</p>
"#,
        status.as_u16(),
        reason,
        reason,
        message
    );

    (status, Html(body)).into_response()
}
