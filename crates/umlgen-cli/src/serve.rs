//! HTTP surface: `POST /` with a JSON diagram answers with its SVG.
//!
//! Each render runs on a blocking task with the layout attempt cap from
//! `[server]` applied, so a dense diagram fails with `500` instead of
//! holding the worker.

use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use log::{debug, error, info, warn};
use tokio::net::TcpListener;

use umlgen::{DiagramBuilder, UmlgenError};

use crate::config::CliConfig;

/// Shared per-server state.
#[derive(Debug)]
pub struct ServerState {
    builder: DiagramBuilder,
}

impl ServerState {
    /// Builds the state, capping `layout.max_attempts` at
    /// `server.max_layout_attempts`.
    pub fn new(config: CliConfig) -> Self {
        let cap = config.server.max_layout_attempts;
        let mut app = config.app;
        let max_attempts = app.layout.max_attempts.map_or(cap, |attempts| attempts.min(cap));
        app.layout.max_attempts = Some(max_attempts);
        debug!(max_attempts; "Server attempt cap applied");

        Self {
            builder: DiagramBuilder::new(app),
        }
    }

    pub fn builder(&self) -> &DiagramBuilder {
        &self.builder
    }
}

/// Routes of the HTTP surface. Methods other than `POST` get `405`.
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new().route("/", post(render)).with_state(state)
}

/// Serves the HTTP surface on `addr` until the process is stopped.
///
/// # Errors
///
/// Returns [`UmlgenError::Io`] if the runtime cannot start or the address
/// cannot be bound.
pub fn serve(addr: &str, config: CliConfig) -> Result<(), UmlgenError> {
    let state = Arc::new(ServerState::new(config));
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let listener = TcpListener::bind(addr).await?;
        info!(addr:% = listener.local_addr()?; "Serving diagrams");
        axum::serve(listener, router(state)).await?;
        Ok::<(), UmlgenError>(())
    })
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, message).into_response()
}

/// Status code for a failed render.
fn status_for(err: &UmlgenError) -> StatusCode {
    match err {
        UmlgenError::Decode(_) => StatusCode::BAD_REQUEST,
        err if err.is_invalid_input() => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn render(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !is_json(&headers) {
        warn!("Rejecting request without a JSON content type");
        return error_response(
            StatusCode::BAD_REQUEST,
            "expected Content-Type: application/json".to_string(),
        );
    }

    let source = match String::from_utf8(body.to_vec()) {
        Ok(source) => source,
        Err(err) => return error_response(StatusCode::BAD_REQUEST, err.to_string()),
    };

    let rendered = tokio::task::spawn_blocking(move || {
        let builder = state.builder();
        let diagram = builder.parse(&source)?;
        builder.render_to(&diagram, None, Vec::new())
    })
    .await;

    match rendered {
        Ok(Ok(svg)) => {
            info!(svg_len = svg.len(); "Diagram rendered");
            ([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response()
        }
        Ok(Err(err)) => {
            let status = status_for(&err);
            warn!(status = status.as_u16(), err:err; "Render failed");
            error_response(status, err.to_string())
        }
        Err(err) => {
            error!(err:err; "Render task failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}
