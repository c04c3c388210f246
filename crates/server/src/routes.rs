use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value, json};
use siterate_core::{
    AiReport, AnalysisMode, Analyzer, AnalyzerConfig, ErrorBody, JudgeError, LinkReport, OpenAiJudge, SiteReport,
    SiterateError, aggregate_judgment,
};
use tracing::{info, warn};

/// Shared state for all handlers.
pub struct AppState {
    pub analyzer: AnalyzerConfig,
    pub judge: Option<OpenAiJudge>,
}

/// Parameters of a rating request, from the query string or a JSON body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateParams {
    pub url: Option<String>,
    pub mode: Option<String>,
    #[serde(default)]
    pub ai: bool,
    #[serde(default, alias = "links")]
    pub check_links: bool,
}

#[derive(Debug, Deserialize)]
pub struct ScrapeParams {
    pub url: Option<String>,
}

/// An error response: status code plus `{ error, details }` body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn bad_request(error: &str, details: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, body: ErrorBody::new(error, Some(details.into())) }
    }
}

impl From<SiterateError> for ApiError {
    fn from(err: SiterateError) -> Self {
        let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self { status, body: ErrorBody::from(&err) }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/rate-site", get(rate_site_query).post(rate_site_json))
        .route("/api/scrape", get(scrape))
        .route("/health", get(health))
        .with_state(state)
}

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "ai": state.judge.is_some(),
    }))
}

async fn rate_site_query(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RateParams>,
) -> Result<Json<SiteReport>, ApiError> {
    rate_site(&state, params).await.map(Json)
}

async fn rate_site_json(
    State(state): State<Arc<AppState>>,
    Json(params): Json<RateParams>,
) -> Result<Json<SiteReport>, ApiError> {
    rate_site(&state, params).await.map(Json)
}

async fn rate_site(state: &AppState, params: RateParams) -> Result<SiteReport, ApiError> {
    let url = required_url(params.url.as_deref())?;
    let mode = match params.mode.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
        Some(mode) => AnalysisMode::from_str(mode).map_err(|e| ApiError::bad_request("Invalid mode", e))?,
        None => AnalysisMode::default(),
    };

    let config = AnalyzerConfig { mode, check_links: params.check_links, ..state.analyzer.clone() };
    info!(url, %mode, ai = params.ai, check_links = params.check_links, "rating site");

    let mut report = match (&state.judge, params.ai) {
        (Some(judge), true) => Analyzer::with_judge(config, judge.clone()).analyze(url).await?,
        _ => Analyzer::with_config(config).analyze(url).await?,
    };

    if params.ai && state.judge.is_none() {
        warn!(url, "AI scoring requested but no judge is configured");
        report.ai = Some(AiReport::from(&aggregate_judgment(Err(JudgeError::MissingApiKey))));
    }

    Ok(report)
}

async fn scrape(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ScrapeParams>,
) -> Result<Json<LinkReport>, ApiError> {
    let url = required_url(params.url.as_deref())?;
    let report = Analyzer::with_config(state.analyzer.clone()).scrape_links(url).await?;
    Ok(Json(report))
}

fn required_url(url: Option<&str>) -> Result<&str, ApiError> {
    match url.map(str::trim) {
        Some(url) if !url.is_empty() => Ok(url),
        _ => Err(SiterateError::InvalidUrl("url parameter is missing".to_string()).into()),
    }
}
