//! HTTP frontend.
//!
//! A small axum application around the same pipeline the CLI drives:
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `GET /` | parameter form |
//! | `POST /generate` | run the pipeline, render result or inline error |
//! | `GET /files/:name` | download a generated report |
//! | `GET /admin/analytics` | aggregate dashboard (hidden in production) |
//! | `GET /health` | liveness probe |
//!
//! Each request gets its own [`ReportRequest`] and its own source
//! connection; the only shared state is the read-only [`AppConfig`] and
//! the analytics sink.

pub mod pages;

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Form, Path as UrlPath, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{info, warn};

use crate::analytics::{self, EventSink, RequestContext};
use crate::config::AppConfig;
use crate::core::report::ReportRequest;
use crate::core::sort::SortKey;
use crate::error::Result as ReportResult;

use self::pages::{FormState, SuccessInfo};

/// Cookie that stores the interface language.
const LANG_COOKIE: &str = "channelpress_lang";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<StateInner>,
}

struct StateInner {
    config: AppConfig,
    sink: EventSink,
}

impl AppState {
    /// Creates the state, opening the analytics sink once.
    pub fn new(config: AppConfig) -> std::io::Result<Self> {
        let sink = EventSink::open(&config.analytics_log)?;
        Ok(Self {
            inner: Arc::new(StateInner { config, sink }),
        })
    }

    fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    fn sink(&self) -> &EventSink {
        &self.inner.sink
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/generate", post(generate))
        .route("/files/:name", get(download))
        .route("/admin/analytics", get(admin_analytics))
        .route("/health", get(health))
        .with_state(state)
}

/// Binds `addr` and serves until the process exits.
pub async fn serve(config: AppConfig, addr: &str) -> std::io::Result<()> {
    let state = AppState::new(config)?;
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app).await
}

// ============================================================================
// Request context helpers
// ============================================================================

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

fn language(headers: &HeaderMap) -> String {
    match cookie_value(headers, LANG_COOKIE).as_deref() {
        Some(lang @ ("en" | "ru")) => lang.to_string(),
        _ => "en".to_string(),
    }
}

fn client_ip_hash(headers: &HeaderMap) -> String {
    // Proxy headers first; X-Forwarded-For may hold a chain, the first
    // entry is the original client.
    let ip = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| headers.get("x-real-ip").and_then(|v| v.to_str().ok()));

    match ip {
        Some(ip) => analytics::hash_client_ip(ip),
        None => "unknown".to_string(),
    }
}

fn request_context(path: &str, headers: &HeaderMap) -> RequestContext {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");
    RequestContext {
        path: path.to_string(),
        lang: language(headers),
        client_ip_hash: client_ip_hash(headers),
        user_agent: analytics::truncate_user_agent(user_agent),
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn index(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let ctx = request_context("/", &headers);
    state.sink().page_view(&ctx);
    Html(pages::form_page(
        state.config().demo_mode(),
        None,
        None,
        &FormState::default(),
    ))
}

/// Form body of `POST /generate`.
#[derive(Debug, Deserialize)]
struct GenerateForm {
    channel: String,
    date_from: String,
    date_to: String,
    sort_type: String,
    direction: String,
    #[serde(default)]
    filename: Option<String>,
}

impl GenerateForm {
    fn form_state(&self) -> FormState {
        FormState {
            channel: self.channel.clone(),
            date_from: self.date_from.clone(),
            date_to: self.date_to.clone(),
            sort_type: self.sort_type.clone(),
            direction: self.direction.clone(),
            filename: self.filename.clone().unwrap_or_default(),
        }
    }
}

async fn generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<GenerateForm>,
) -> Html<String> {
    let ctx = request_context("/generate", &headers);
    let demo_mode = state.config().demo_mode();
    let form_state = form.form_state();

    let reject = |error: String| {
        Html(pages::form_page(demo_mode, Some(&error), None, &form_state))
    };

    // Field validation mirrors the pipeline's own checks so the user gets
    // a targeted message with their input preserved.
    if form.channel.trim().is_empty() {
        return reject("The channel must not be empty".to_string());
    }
    let Ok(date_from) = NaiveDate::parse_from_str(&form.date_from, "%Y-%m-%d") else {
        return reject("Invalid start date, use the YYYY-MM-DD format".to_string());
    };
    let Ok(date_to) = NaiveDate::parse_from_str(&form.date_to, "%Y-%m-%d") else {
        return reject("Invalid end date, use the YYYY-MM-DD format".to_string());
    };
    if date_to < date_from {
        return reject("The end date must not precede the start date".to_string());
    }
    let sort_key: SortKey = match form.sort_type.parse() {
        Ok(key) => key,
        Err(_) => return reject(format!("Unknown sort type: {}", form.sort_type)),
    };
    let ascending = match form.direction.as_str() {
        "asc" => true,
        "desc" => false,
        other => return reject(format!("Unknown sort direction: {other}")),
    };

    let channel_input = form.channel.trim().to_string();
    state
        .sink()
        .export_started(&ctx, &channel_input, &form.date_from, &form.date_to);

    let mut request =
        ReportRequest::new(channel_input.clone(), date_from, date_to, sort_key, ascending);
    if let Some(name) = form.filename.as_deref() {
        request = request.with_output_name(name);
    }

    match dispatch(state.config(), &request).await {
        Ok(path) => {
            let pdf_filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            state.sink().export_success(&ctx, &channel_input, None);
            let success = SuccessInfo {
                pdf_filename,
                channel: channel_input,
                date_from: form.date_from,
                date_to: form.date_to,
                sort_label: sort_key.label().to_string(),
                direction_label: if ascending { "ascending" } else { "descending" }.to_string(),
            };
            Html(pages::form_page(
                demo_mode,
                None,
                Some(&success),
                &FormState::default(),
            ))
        }
        Err(err) => {
            warn!(%err, channel = %channel_input, "report generation failed");
            state
                .sink()
                .export_failed(&ctx, &channel_input, err.kind_label());
            reject(err.to_string())
        }
    }
}

#[cfg(feature = "live")]
async fn dispatch(config: &AppConfig, request: &ReportRequest) -> ReportResult<PathBuf> {
    let source = crate::source::telegram::TelegramSource::new(config.clone());
    crate::core::generate_report(config, &source, request).await
}

#[cfg(not(feature = "live"))]
async fn dispatch(config: &AppConfig, request: &ReportRequest) -> ReportResult<PathBuf> {
    crate::core::generate_report(config, &crate::source::DisabledSource, request).await
}

/// Returns `true` when `name` is a plain file name with no way out of the
/// output directory.
fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('/') && !name.contains('\\') && !name.contains("..")
}

async fn download(State(state): State<AppState>, UrlPath(name): UrlPath<String>) -> Response {
    if !is_safe_file_name(&name) {
        return (
            StatusCode::FORBIDDEN,
            Html(pages::forbidden_page("Invalid file name")),
        )
            .into_response();
    }

    let file_path = state.config().output_dir.join(&name);
    if !file_path.is_file() {
        return (StatusCode::NOT_FOUND, Html(pages::not_found_page())).into_response();
    }

    // Resolve symlinks and re-check containment.
    let resolved = match (file_path.canonicalize(), state.config().output_dir.canonicalize()) {
        (Ok(resolved), Ok(base)) if resolved.starts_with(&base) => resolved,
        _ => {
            return (
                StatusCode::FORBIDDEN,
                Html(pages::forbidden_page("Access denied")),
            )
                .into_response();
        }
    };

    match tokio::fs::read(&resolved).await {
        Ok(bytes) => {
            let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{name}\""))
                .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            )
                .into_response()
        }
        Err(err) => {
            warn!(%err, file = %resolved.display(), "failed to read report file");
            (StatusCode::NOT_FOUND, Html(pages::not_found_page())).into_response()
        }
    }
}

async fn admin_analytics(State(state): State<AppState>) -> Response {
    // Hidden, not protected: production deployments get a plain 404.
    if state.config().is_production() {
        return (StatusCode::NOT_FOUND, Html(pages::not_found_page())).into_response();
    }

    match analytics::parse_log_file(&state.config().analytics_log) {
        Ok(summary) => Html(pages::admin_page(&summary, &state.config().env)).into_response(),
        Err(err) => {
            warn!(%err, "failed to read analytics log");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(pages::forbidden_page("Analytics log unavailable")),
            )
                .into_response()
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
