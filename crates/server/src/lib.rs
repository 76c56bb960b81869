//! keyscan server: HTTP front end for fuzzy keyword detection
//!
//! Exposes the keyscan pipeline over a single `POST /` endpoint. A request
//! names a text, a list of keywords and an edit-distance threshold; the
//! response lists every keyword that occurs in the cleaned text within that
//! threshold, together with the cleaned text itself.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Endpoints
//!
//! - `POST /` - analyze `text` for `keywords` within `distance` edits
//! - `GET /health` - liveness probe
//! - `GET /metrics` - Prometheus metrics
//!
//! Validation and pipeline failures answer 404 with `{"error": "..."}`.
//! Responses are JSON unless the `Accept` header rules JSON out, in which
//! case the same body is sent as `text/plain`.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod middleware;
pub mod negotiate;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use negotiate::ResponseFormat;
pub use server::{build_router, start_server};
pub use state::ServerState;
