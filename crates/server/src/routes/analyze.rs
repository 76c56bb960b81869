//! `POST /`: fuzzy keyword detection.
//!
//! Parameters come from the query string and the body (JSON or
//! `application/x-www-form-urlencoded`) merged into one namespace, with body
//! fields replacing query fields of the same name. They are validated in a
//! fixed order (`text`, `keywords`, `distance`) and the first failure is
//! reported. The pipeline itself runs on the blocking pool.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{FromRequest, Query, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::Response;
use axum::{Form, Json};
use keyscan::{Analysis, MatchRequest};
use serde_json::{Map, Value};

use crate::error::{ServerError, ServerResult};
use crate::negotiate::ResponseFormat;
use crate::state::ServerState;
use crate::telemetry::record_request;

/// Analyze a text for fuzzy keyword occurrences.
///
/// # Request
///
/// ```json
/// {"text": "The quick brown fox", "keywords": ["quik"], "distance": 1}
/// ```
///
/// # Response
///
/// ```json
/// {
///   "keywords": [{"keyword": "quik", "results": [{"text": "quick", "distance": 1}]}],
///   "clean_text": "quick brown fox"
/// }
/// ```
pub async fn analyze(State(state): State<Arc<ServerState>>, request: Request) -> Response {
    let start = Instant::now();
    let format = ResponseFormat::from_headers(request.headers());

    match run(&state, request).await {
        Ok(analysis) => {
            tracing::debug!(
                hits = analysis.keywords.len(),
                clean_len = analysis.clean_text.len(),
                "analysis complete"
            );
            record_request("ok", start.elapsed());
            format.render(StatusCode::OK, &analysis)
        }
        Err(err) => {
            if !err.status_code().is_server_error() {
                tracing::debug!(kind = err.kind(), error = %err, "analysis rejected");
            }
            record_request(err.kind(), start.elapsed());
            err.render(format)
        }
    }
}

async fn run(state: &Arc<ServerState>, request: Request) -> ServerResult<Analysis> {
    let params = AnalyzeParams::from_request(request, state).await?;
    let (text, req) = params.validate()?;

    let pipeline = Arc::clone(&state.pipeline);
    let analysis = tokio::task::spawn_blocking(move || pipeline.analyze(&text, &req)).await??;
    Ok(analysis)
}

/// Merged request parameters, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyzeParams(Map<String, Value>);

impl AnalyzeParams {
    /// Build from URL-encoded pairs.
    ///
    /// `key[]` always yields an array. A plain key seen more than once
    /// becomes an array of its values; seen once it stays a string.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut map = Map::new();
        for (key, value) in pairs {
            let value = Value::String(value);
            if let Some(name) = key.strip_suffix("[]") {
                let slot = map
                    .entry(name)
                    .or_insert_with(|| Value::Array(Vec::new()));
                append(slot, value);
            } else if let Some(slot) = map.get_mut(&key) {
                append(slot, value);
            } else {
                map.insert(key, value);
            }
        }
        Self(map)
    }

    pub fn from_json(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Overlay `other` on top of `self`; fields in `other` win.
    pub fn merge(&mut self, other: AnalyzeParams) {
        self.0.extend(other.0);
    }

    /// Check the three fields in order and build the pipeline input.
    pub fn validate(mut self) -> ServerResult<(String, MatchRequest)> {
        let text = match self.0.remove("text") {
            Some(Value::String(text)) if !text.is_empty() => text,
            _ => return Err(ServerError::MissingText),
        };

        let keywords = match self.0.remove("keywords") {
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(keyword) => Some(keyword),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()
                .ok_or(ServerError::MissingKeywords)?,
            _ => return Err(ServerError::MissingKeywords),
        };

        let max_distance = self
            .0
            .get("distance")
            .and_then(parse_distance)
            .ok_or(ServerError::InvalidDistance)?;

        Ok((
            text,
            MatchRequest {
                keywords,
                max_distance,
            },
        ))
    }
}

impl<S> FromRequest<S> for AnalyzeParams
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut params = match Query::<Vec<(String, String)>>::try_from_uri(req.uri()) {
            Ok(Query(pairs)) => Self::from_pairs(pairs),
            Err(rejection) => {
                return Err(ServerError::Body {
                    status: rejection.status(),
                    message: rejection.body_text(),
                })
            }
        };

        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let body = if content_type.starts_with("application/json") {
            let Json(map) = Json::<Map<String, Value>>::from_request(req, state)
                .await
                .map_err(|rejection| ServerError::Body {
                    status: rejection.status(),
                    message: rejection.body_text(),
                })?;
            Self::from_json(map)
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|rejection| ServerError::Body {
                    status: rejection.status(),
                    message: rejection.body_text(),
                })?;
            Self::from_pairs(pairs)
        } else {
            Self::default()
        };

        params.merge(body);
        Ok(params)
    }
}

fn append(slot: &mut Value, value: Value) {
    match slot {
        Value::Array(items) => items.push(value),
        other => {
            let first = other.take();
            *other = Value::Array(vec![first, value]);
        }
    }
}

/// Accept a positive integer given as a JSON number or a decimal string.
fn parse_distance(value: &Value) -> Option<usize> {
    let n: i64 = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
                .map(|f| f as i64)
        })?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    usize::try_from(n).ok().filter(|&d| d > 0)
}
