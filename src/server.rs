//! HTTP server.
//!
//! Thin plumbing over the core modules: every handler recomputes its data
//! from the filesystem via [`catalog`], [`search`], and [`guard`] — no
//! caching, no shared mutable state beyond the immutable [`Config`].
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | Catalog listing |
//! | `GET`  | `/view/{name}` | Listing plus one file's content and sections |
//! | `POST` | `/api/save` | Overwrite an allowed file |
//! | `GET`  | `/api/search?q=` | Two-tier AND search, first 50 matches |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! Error responses carry a machine-readable code and a message:
//!
//! ```json
//! { "error": { "code": "not_allowed", "message": "not allowed: /etc/passwd" } }
//! ```
//!
//! Error codes: `not_allowed` (403), `not_found` (404), `internal` (500).
//! An unknown file name on `/view/{name}` is NOT an error — the handler
//! falls back to the plain listing.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted; the UI is served to a
//! single local user.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::catalog;
use crate::config::Config;
use crate::guard;
use crate::markdown;
use crate::models::{FileEntry, SearchMatch, Section};
use crate::search;
use crate::sections;

/// Queries shorter than this (after trimming) short-circuit to no results.
const MIN_QUERY_LEN: usize = 2;
/// Maximum number of search matches returned over HTTP.
const MAX_RESULTS: usize = 50;

/// Shared application state passed to all route handlers via Axum's
/// `State` extractor.
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
}

/// Starts the HTTP server.
///
/// Binds to the configured host/port and serves until the process is
/// terminated. Returns an error if binding fails.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.bind_addr();
    let state = AppState {
        config: Arc::new(config.clone()),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(handle_index))
        .route("/view/{name}", get(handle_view))
        .route("/api/save", post(handle_save))
        .route("/api/search", get(handle_search))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state);

    log::info!("listening on http://{}", bind_addr);
    println!("Memory Book listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    /// Machine-readable error code (e.g., `"not_allowed"`).
    code: String,
    /// Human-readable error message.
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

/// Constructs a 403 Forbidden error.
fn not_allowed(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::FORBIDDEN,
        code: "not_allowed".to_string(),
        message: message.into(),
    }
}

/// Constructs a 500 Internal Server Error.
fn internal(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: message.into(),
    }
}

/// Maps core-layer failures to HTTP statuses by message. Write rejections
/// come through as "not allowed"; everything else is a server fault.
fn classify_core_error(err: anyhow::Error) -> AppError {
    let msg = err.to_string();
    if msg.contains("not allowed") {
        not_allowed(msg)
    } else {
        internal(msg)
    }
}

// ============ GET / and GET /view/{name} ============

/// JSON response body for the browse endpoints.
#[derive(Serialize)]
struct BrowseResponse {
    files: Vec<FileEntry>,
    /// Present only when a known file was requested by name.
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<FileView>,
}

/// One file opened for viewing: raw content, rendered HTML, and sections.
#[derive(Serialize)]
struct FileView {
    name: String,
    display: String,
    content: String,
    html: String,
    sections: Vec<Section>,
}

/// Handler for `GET /`. Returns the catalog listing.
async fn handle_index(State(state): State<AppState>) -> Result<Json<BrowseResponse>, AppError> {
    let files = catalog::list_files(&state.config).map_err(classify_core_error)?;
    Ok(Json(BrowseResponse { files, file: None }))
}

/// Handler for `GET /view/{name}`.
///
/// Looks the file up by exact name (not path) in the current catalog.
/// Unknown names fall back to the plain listing rather than erroring.
async fn handle_view(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<BrowseResponse>, AppError> {
    let files = catalog::list_files(&state.config).map_err(classify_core_error)?;

    let file = match files.iter().find(|f| f.name == name) {
        Some(entry) => {
            let content = catalog::read_lossy(entry.path.as_ref())
                .map_err(|e| internal(format!("failed to read {}: {}", entry.path, e)))?;
            Some(FileView {
                name: entry.name.clone(),
                display: entry.display.clone(),
                html: markdown::render(&content),
                sections: sections::parse(&content),
                content,
            })
        }
        None => None,
    };

    Ok(Json(BrowseResponse { files, file }))
}

// ============ POST /api/save ============

/// JSON request body for `POST /api/save`.
#[derive(Deserialize)]
struct SaveRequest {
    #[serde(default)]
    path: String,
    #[serde(default)]
    content: String,
}

/// JSON response body for a successful save.
#[derive(Serialize)]
struct SaveResponse {
    success: bool,
    /// New byte length of the file.
    size: usize,
}

/// Handler for `POST /api/save`.
///
/// Validates the target against the freshly recomputed allowed set and
/// overwrites the whole file. Rejected paths leave the filesystem untouched.
async fn handle_save(
    State(state): State<AppState>,
    Json(req): Json<SaveRequest>,
) -> Result<Json<SaveResponse>, AppError> {
    let size =
        guard::save_file(&state.config, &req.path, &req.content).map_err(classify_core_error)?;
    Ok(Json(SaveResponse {
        success: true,
        size,
    }))
}

// ============ GET /api/search ============

/// Query string for `GET /api/search`.
#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

/// JSON response body for `GET /api/search`.
#[derive(Serialize)]
struct SearchResponse {
    results: Vec<SearchMatch>,
}

/// Handler for `GET /api/search`.
///
/// Trimmed queries under 2 characters return an empty result set without
/// invoking the engine; otherwise at most the first 50 matches.
async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    let query = params.q.trim();
    if query.chars().count() < MIN_QUERY_LEN {
        return Ok(Json(SearchResponse {
            results: Vec::new(),
        }));
    }

    let mut results = search::search(&state.config, query).map_err(classify_core_error)?;
    results.truncate(MAX_RESULTS);
    Ok(Json(SearchResponse { results }))
}

// ============ GET /health ============

/// JSON response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Handler for `GET /health`.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
