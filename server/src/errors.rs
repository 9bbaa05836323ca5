use std::fmt::Debug;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use color_eyre::Report;

use crate::config::is_development_mode;

/// A failed request: the report is logged, `R` is what the client sees
#[derive(Debug)]
pub struct ServerError<R: IntoResponse>(pub(crate) Report, pub(crate) R);

pub type ServerResult<S, F = Response> = Result<S, ServerError<F>>;

impl<R: IntoResponse> IntoResponse for ServerError<R> {
    fn into_response(self) -> Response {
        tracing::error!(error = ?self.0, "Request Error");

        let response = self.1.into_response();

        if is_development_mode() && response.status() == StatusCode::INTERNAL_SERVER_ERROR {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(development_error_page(&self.0)),
            )
                .into_response();
        }

        response
    }
}

fn development_error_page(report: &Report) -> String {
    let error_text = format!("{report:?}")
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;");

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Development Error - 500</title>
    <style>
        body {{ font-family: monospace; margin: 20px; background: #1a1a1a; color: #fff; }}
        pre {{ background: #000; padding: 15px; white-space: pre-wrap; word-wrap: break-word; }}
    </style>
</head>
<body>
    <h1>Development Mode - Internal Server Error</h1>
    <pre>{error_text}</pre>
</body>
</html>"#
    )
}

impl<E> From<E> for ServerError<StatusCode>
where
    E: Into<Report>,
{
    fn from(err: E) -> Self {
        ServerError(err.into(), StatusCode::INTERNAL_SERVER_ERROR)
    }
}

pub(crate) trait WithStatus<T> {
    fn with_status(self, status: StatusCode) -> Result<T, ServerError<StatusCode>>;
}

impl<T> WithStatus<T> for Result<T, Report> {
    fn with_status(self, status: StatusCode) -> Result<T, ServerError<StatusCode>> {
        self.map_err(|err| ServerError(err, status))
    }
}
