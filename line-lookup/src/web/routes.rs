//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::controller::{Outcome, SelectionController};
use crate::display::outcome_nodes;
use crate::domain::{InvalidLineName, LineName};
use crate::source::{DataSource, SourceError};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// When data is read from a local directory it is also served under
/// `/data`, so the raw files stay reachable the way a static host would
/// expose them.
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/version", get(version))
        .route("/lines", get(list_lines))
        .route("/lines/:line", get(line_detail))
        .route("/lines/:line/view", get(station_view))
        .route("/static/*path", get(static_asset));

    if let DataSource::Local(source) = state.store.source() {
        router = router.nest_service("/data", ServeDir::new(source.data_dir()));
    }

    router
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The published version.
async fn version(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.current_version().await)
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// The lookup page.
///
/// Replays the submitted form through a fresh [`SelectionController`]: the
/// line is loaded first, and the station only applies if the line is the
/// one the form was rendered for.
async fn index_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let (lines, lines_error) = match state.store.manifest().await {
        Ok(manifest) => (manifest.lines(), false),
        Err(e) => {
            warn!(error = %e, "failed to load manifest");
            (Vec::new(), true)
        }
    };

    let requested = non_empty(&query.line).and_then(|line| match LineName::parse(line) {
        Ok(line) => Some(line),
        Err(e) => {
            debug!(error = %e, "ignoring line parameter");
            None
        }
    });

    let mut controller = SelectionController::new(query.options());
    let mut outcome = Outcome::Empty;
    if let Some(ticket) = controller.select_line(requested) {
        let result = state.store.dataset(ticket.line()).await;
        outcome = controller.dataset_loaded(ticket, result);
        if controller.dataset().is_some() && !query.line_changed() {
            outcome = controller.select_station(non_empty(&query.station));
        }
    }

    let selection = controller.state();
    let options = selection.options();
    let template = IndexTemplate {
        lines: lines
            .iter()
            .map(|line| LineOption::new(line, selection.line()))
            .collect(),
        lines_error,
        selected_line: selection
            .line()
            .map(|line| line.as_str().to_string())
            .unwrap_or_default(),
        stations: controller
            .station_names()
            .into_iter()
            .map(|name| StationOption {
                name: name.to_string(),
                selected: selection.station() == Some(name),
            })
            .collect(),
        stations_enabled: controller.dataset().is_some(),
        show_terminating: options.show_terminating,
        show_stabling: options.show_stabling,
        nodes: outcome_nodes(&outcome),
        version_label: state.current_version().await.label(),
    };

    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok(Html(html))
}

/// Lines listed in the manifest.
async fn list_lines(State(state): State<AppState>) -> Result<Json<LinesResponse>, AppError> {
    let manifest = state.store.manifest().await?;
    let lines = manifest.lines().iter().map(LineSummary::from_line).collect();
    Ok(Json(LinesResponse { lines }))
}

/// Station order and list sections of one line.
async fn line_detail(
    State(state): State<AppState>,
    Path(line): Path<String>,
) -> Result<Json<LineDetailResponse>, AppError> {
    let line = LineName::parse(&line)?;
    let dataset = state.store.dataset(&line).await?;
    Ok(Json(LineDetailResponse::from_dataset(&dataset)))
}

/// Resolved view of a line, optionally for one station.
///
/// Returns the output panel fragment for HTML clients and a
/// [`ViewResponse`] otherwise.
async fn station_view(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(line): Path<String>,
    Query(query): Query<ViewQuery>,
) -> Result<Response, AppError> {
    let line = LineName::parse(&line)?;
    let html = accepts_html(&headers);

    let mut controller = SelectionController::new(query.options());
    let mut outcome = Outcome::Empty;
    if let Some(ticket) = controller.select_line(Some(line.clone())) {
        let result = state.store.dataset(ticket.line()).await;
        let not_found = result.as_ref().is_err_and(|e| e.is_not_found());
        outcome = controller.dataset_loaded(ticket, result);

        if let Outcome::Failed(message) = &outcome
            && !html
        {
            return Err(if not_found {
                AppError::NotFound {
                    message: format!("Unknown line: {}", line),
                }
            } else {
                AppError::Internal {
                    message: message.clone(),
                }
            });
        }
    }

    // An unknown station is a 404 for JSON clients. The controller clears
    // it for HTML clients, which then see the line's prompt.
    if let Some(dataset) = controller.dataset().cloned()
        && let Some(name) = query.station()
    {
        if dataset.station(name).is_none() && !html {
            return Err(AppError::NotFound {
                message: format!("Unknown station on {} line: {}", line.display_name(), name),
            });
        }
        outcome = controller.select_station(Some(name));
    }

    if html {
        let template = OutputTemplate {
            nodes: outcome_nodes(&outcome),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;
        return Ok(Html(html).into_response());
    }

    let (view, message) = match outcome {
        Outcome::View(view) => (Some(view), None),
        Outcome::Prompt(message) | Outcome::Failed(message) => (None, Some(message)),
        Outcome::Empty | Outcome::Stale => (None, None),
    };
    Ok(Json(ViewResponse {
        line: line.as_str().to_string(),
        display_name: line.display_name(),
        view,
        message,
    })
    .into_response())
}

/// Serve a static asset from the versioned cache.
///
/// The asset generation doubles as the ETag, so clients revalidate once per
/// published version.
async fn static_asset(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(path): Path<String>,
) -> Result<Response, AppError> {
    let asset = state
        .assets
        .get(&path)
        .await
        .ok_or_else(|| AppError::NotFound {
            message: format!("No such asset: {}", path),
        })?;

    let etag = asset.etag();
    let fresh = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == etag);
    if fresh {
        return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
    }

    Ok((
        [
            (header::CONTENT_TYPE, asset.content_type.to_string()),
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "no-cache".to_string()),
        ],
        asset.body.clone(),
    )
        .into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<InvalidLineName> for AppError {
    fn from(e: InvalidLineName) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<SourceError> for AppError {
    fn from(e: SourceError) -> Self {
        if e.is_not_found() {
            AppError::NotFound {
                message: e.to_string(),
            }
        } else {
            AppError::Internal {
                message: e.to_string(),
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            debug!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
