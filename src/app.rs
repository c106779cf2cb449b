//! Routing and page assembly.
//!
//! One router serves the whole site: the gated page at `/`, the unlock form
//! handler, a JSON refresh endpoint per sheet and the static assets. All
//! configured sheets are fetched concurrently when the page renders; each
//! fetch settles on its own, so one failing sheet never blocks the rest.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use axum_extra::extract::cookie::CookieJar;
use handlebars::Handlebars;
use log::{info, warn};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::error::AppError;
use crate::fetcher::{FetchError, SheetClient};
use crate::gate;
use crate::render::{self, MSG_FETCH_FAILED, MSG_NOT_CONFIGURED, SectionView};

/// Shared application state: configuration, the sheet client and the
/// compiled page templates.
pub struct AppState {
    pub config: SiteConfig,
    pub client: SheetClient,
    pub pages: Handlebars<'static>,
}

impl AppState {
    pub fn new(config: SiteConfig) -> Result<Arc<Self>, Box<dyn std::error::Error>> {
        let client = SheetClient::new(&config);

        let mut pages = Handlebars::new();
        pages.register_template_string("page", include_str!("../templates/page.hbs"))?;
        pages.register_template_string("gate", include_str!("../templates/gate.hbs"))?;

        Ok(Arc::new(AppState { config, client, pages }))
    }
}

#[derive(Deserialize)]
struct UnlockForm {
    password: String,
}

/// Build the site router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(serve_page))
        .route("/unlock", post(handle_unlock))
        .route("/api/sheet/:key", get(sheet_data))
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server and serve until shutdown.
pub async fn run(config: SiteConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(config)?;
    let app = router(state.clone());

    let listener = TcpListener::bind(&state.config.bind_addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Serve the page, or the gate when the session has not unlocked it.
async fn serve_page(
    jar: CookieJar,
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    if !gate::is_unlocked(&jar) {
        let body = state.pages.render("gate", &json!({ "error": false }))?;
        return Ok(Html(body).into_response());
    }

    let sections = load_sections(&state).await;
    let body = state.pages.render("page", &json!({ "sections": sections }))?;
    Ok(Html(body).into_response())
}

/// Check a gate submission; set the session cookie on a match.
async fn handle_unlock(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<UnlockForm>,
) -> Result<Response, AppError> {
    if gate::verify(&form.password, &state.config.password_digest) {
        return Ok((jar.add(gate::unlock_cookie()), Redirect::to("/")).into_response());
    }

    let body = state.pages.render("gate", &json!({ "error": true }))?;
    Ok((StatusCode::UNAUTHORIZED, Html(body)).into_response())
}

/// Fetch one sheet and return its parsed rows as JSON.
async fn sheet_data(
    Path(key): Path<String>,
    jar: CookieJar,
    State(state): State<Arc<AppState>>,
) -> Response {
    if !gate::is_unlocked(&jar) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let Some(descriptor) = state.config.sheet(&key) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    if !state.config.is_configured() {
        let payload = json!({ "status": "error", "message": MSG_NOT_CONFIGURED });
        return (StatusCode::SERVICE_UNAVAILABLE, Json(payload)).into_response();
    }

    match state.client.fetch_sheet(descriptor.sheet_name).await {
        Ok(table) => Json(json!({ "status": "ok", "rows": table })).into_response(),
        Err(e) => {
            warn!("{} sheet fetch failed: {e}", descriptor.key);
            let payload = json!({ "status": "error", "message": MSG_FETCH_FAILED });
            (StatusCode::BAD_GATEWAY, Json(payload)).into_response()
        }
    }
}

/// Load every configured sheet concurrently and build the page sections.
///
/// One task per sheet; the page waits for all of them to settle and each
/// failure collapses to that sheet's placeholder row only.
pub async fn load_sections(state: &AppState) -> Vec<SectionView> {
    if !state.config.is_configured() {
        return state
            .config
            .sheets
            .iter()
            .map(|descriptor| render::unconfigured_section(descriptor, &state.client))
            .collect();
    }

    let mut handles = Vec::with_capacity(state.config.sheets.len());
    for descriptor in &state.config.sheets {
        let client = state.client.clone();
        let sheet_name = descriptor.sheet_name;
        handles.push(tokio::spawn(async move { client.fetch_sheet(sheet_name).await }));
    }

    let mut sections = Vec::with_capacity(handles.len());
    for (descriptor, handle) in state.config.sheets.iter().zip(handles) {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("{} sheet load task failed: {e}", descriptor.key);
                Err(FetchError::Canceled)
            }
        };

        if let Err(e) = &outcome {
            warn!("{} sheet load failed: {e}", descriptor.key);
        }

        sections.push(render::build_section(descriptor, &state.client, outcome));
    }

    sections
}
