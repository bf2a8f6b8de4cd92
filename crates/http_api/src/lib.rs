//! # HTTP API
//!
//! Ingress for tagged payloads.
//!
//! # Endpoints
//! - `POST /process` with `{"tag": string, "data": string}`
//!   - `200 {"message":"OK"}` once the dispatch is spawned
//!   - `400`/`422 {"message": <reason>}` on validation failure
//! - `GET /health`
//!
//! # Usage
//!
//! ```ignore
//! let state = AppState::new(routes, pipeline);
//! let app = build_router(state);
//! let listener = http_api::bind("0.0.0.0:8080").await?;
//! http_api::serve(listener, app, cancel).await?;
//! ```

pub mod error;
pub mod routes;
pub mod server;
pub mod state;
pub mod types;

pub use error::{ApiError, Result};
pub use routes::build_router;
pub use server::{bind, serve, ServerError};
pub use state::AppState;
pub use types::{HealthResponse, MessageResponse, ProcessRequest};
