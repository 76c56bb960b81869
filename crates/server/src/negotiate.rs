//! Response content negotiation.
//!
//! Bodies are always JSON-encoded. The only choice is the content type:
//! `application/json` unless the client's `Accept` header rules it out, in
//! which case the same text goes out as `text/plain`.

use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    PlainText,
}

impl ResponseFormat {
    /// Pick the format for a request.
    ///
    /// A missing `Accept` header, or one listing `application/json`,
    /// `application/*` or `*/*` with a non-zero quality, selects JSON.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut values = headers.get_all(ACCEPT).iter().peekable();
        if values.peek().is_none() {
            return ResponseFormat::Json;
        }

        let accepts_json = values
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(','))
            .any(media_range_accepts_json);

        if accepts_json {
            ResponseFormat::Json
        } else {
            ResponseFormat::PlainText
        }
    }

    fn content_type(self) -> HeaderValue {
        match self {
            ResponseFormat::Json => HeaderValue::from_static("application/json"),
            ResponseFormat::PlainText => HeaderValue::from_static("text/plain; charset=utf-8"),
        }
    }

    /// Serialize `body` as JSON and send it with this format's content type.
    pub fn render<T: Serialize>(self, status: StatusCode, body: &T) -> Response {
        match serde_json::to_string(body) {
            Ok(text) => (status, [(CONTENT_TYPE, self.content_type())], text).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "failed to encode response body");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    [(CONTENT_TYPE, self.content_type())],
                    r#"{"error":"Internal server error"}"#,
                )
                    .into_response()
            }
        }
    }
}

fn media_range_accepts_json(range: &str) -> bool {
    let mut parts = range.split(';');
    let media = parts.next().unwrap_or_default().trim().to_ascii_lowercase();
    if !matches!(media.as_str(), "application/json" | "application/*" | "*/*") {
        return false;
    }

    // q=0 means "not acceptable"
    !parts.any(|param| {
        let param = param.trim();
        param
            .strip_prefix("q=")
            .and_then(|q| q.trim().parse::<f32>().ok())
            .is_some_and(|q| q <= 0.0)
    })
}
