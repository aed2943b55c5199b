use crate::clock::ClockTicker;
use crate::config::DashboardConfig;
use crate::dashboard::{DashboardSnapshot, Period};
use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Local};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::{info, warn};

const INDEX_HTML: &str = include_str!("../web/index.html");
const APP_JS: &str = include_str!("../web/app.js");

#[derive(Clone)]
struct WebState {
    config: Arc<DashboardConfig>,
    clock: watch::Receiver<DateTime<Local>>,
    period: Arc<Mutex<Period>>,
}

impl WebState {
    fn new(config: DashboardConfig, clock: &ClockTicker) -> Self {
        Self {
            config: Arc::new(config),
            clock: clock.subscribe(),
            period: Arc::new(Mutex::new(Period::default())),
        }
    }

    /// Every request is its own render pass, so the series are sampled afresh.
    fn snapshot(&self, period: Period) -> DashboardSnapshot {
        let now = *self.clock.borrow();
        DashboardSnapshot::capture(&now, &self.config, period, &mut rand::thread_rng())
    }
}

fn router(state: WebState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/app.js", get(app_js))
        .route("/api/health", get(health))
        .route("/api/dashboard", get(dashboard))
        .route("/api/period/next", post(next_period))
        .with_state(state)
}

pub async fn run_webui_server(port: u16, config: DashboardConfig) -> Result<()> {
    let clock = ClockTicker::start(config.tick_interval);
    let app_clock_format = config.clock_format;
    let app = router(WebState::new(config, &clock));

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(
        "WebUI listening on http://{} (clock at {})",
        addr,
        clock.formatted(app_clock_format)
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("WebUI shutting down (clock running: {})", clock.is_running());
    clock.stop();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C ({}); shutting down", e);
    }
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn app_js() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/javascript; charset=utf-8")], APP_JS)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

async fn dashboard(State(state): State<WebState>) -> Json<DashboardSnapshot> {
    let period = *state.period.lock().await;
    Json(state.snapshot(period))
}

async fn next_period(State(state): State<WebState>) -> Json<DashboardSnapshot> {
    let period = {
        let mut guard = state.period.lock().await;
        *guard = guard.next();
        *guard
    };
    info!("WebUI period changed to {}", period.label());
    Json(state.snapshot(period))
}
