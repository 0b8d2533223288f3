use crate::infra::{AppState, WageServices};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;
use wage_levels::comparison::{ColAdjustment, ComparisonSite, SalaryGaps, TakeHomeComparison};
use wage_levels::error::AppError;
use wage_levels::geography::CountyLocation;
use wage_levels::reference::{self, UsState};
use wage_levels::salary::SalaryInput;
use wage_levels::wages::OccupationRecord;
use wage_levels::{TaxBreakdown, WageEstimate, WageQuery};

#[derive(Debug, Deserialize)]
pub(crate) struct WageLevelRequest {
    pub(crate) salary: SalaryInput,
    pub(crate) county_fips: String,
    #[serde(default)]
    pub(crate) occupation_code: Option<String>,
    #[serde(default)]
    pub(crate) area_code: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct WageLevelResponse {
    pub(crate) salary: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) occupation_title: Option<String>,
    #[serde(flatten)]
    pub(crate) estimate: WageEstimate,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SalaryGapsRequest {
    pub(crate) salary: SalaryInput,
    pub(crate) area_code: String,
    pub(crate) occupation_code: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TakeHomeRequest {
    pub(crate) salary: SalaryInput,
    pub(crate) state_code: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ColAdjustRequest {
    pub(crate) salary: SalaryInput,
    pub(crate) from_area: String,
    pub(crate) to_area: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompareRequest {
    pub(crate) salary: SalaryInput,
    pub(crate) from: ComparisonSite,
    pub(crate) to: ComparisonSite,
}

pub(crate) fn with_wage_routes(services: Arc<WageServices>) -> axum::Router {
    axum::Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/occupations", get(occupations_endpoint))
        .route("/api/v1/states", get(states_endpoint))
        .route("/api/v1/wage-level", post(wage_level_endpoint))
        .route("/api/v1/salary-gaps", post(salary_gaps_endpoint))
        .route("/api/v1/take-home", post(take_home_endpoint))
        .route("/api/v1/cost-of-living/adjust", post(col_adjust_endpoint))
        .route("/api/v1/compare", post(compare_endpoint))
        .layer(Extension(services))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn occupations_endpoint(
    Extension(services): Extension<Arc<WageServices>>,
) -> Json<Vec<OccupationRecord>> {
    Json(services.catalog.as_ref().clone())
}

pub(crate) async fn states_endpoint() -> Json<&'static [UsState]> {
    Json(reference::states())
}

pub(crate) async fn wage_level_endpoint(
    Extension(services): Extension<Arc<WageServices>>,
    Json(payload): Json<WageLevelRequest>,
) -> Result<Json<WageLevelResponse>, AppError> {
    let salary = payload.salary.dollars()?;
    let occupation_title = payload
        .occupation_code
        .as_deref()
        .and_then(|code| services.occupation_title(code))
        .map(str::to_string);

    let query = WageQuery {
        salary,
        occupation_code: payload.occupation_code,
        area_code: payload.area_code,
        county: CountyLocation::from_fips(&payload.county_fips),
    };
    let estimate = services.estimator.estimate(&query);
    debug!(
        county = %query.county.fips,
        level = estimate.level_value,
        source = ?estimate.source,
        "classified salary"
    );

    Ok(Json(WageLevelResponse {
        salary,
        occupation_title,
        estimate,
    }))
}

pub(crate) async fn salary_gaps_endpoint(
    Extension(services): Extension<Arc<WageServices>>,
    Json(payload): Json<SalaryGapsRequest>,
) -> Result<Json<SalaryGaps>, AppError> {
    let salary = payload.salary.dollars()?;
    let thresholds = services
        .estimator
        .table()
        .get(&payload.area_code, &payload.occupation_code)
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "no wage data for occupation {} in area {}",
                payload.occupation_code, payload.area_code
            ))
        })?;

    Ok(Json(services.comparison.salary_gaps(salary, thresholds)))
}

pub(crate) async fn take_home_endpoint(
    Extension(services): Extension<Arc<WageServices>>,
    Json(payload): Json<TakeHomeRequest>,
) -> Result<Json<TaxBreakdown>, AppError> {
    let salary = payload.salary.dollars()?;
    Ok(Json(
        services
            .comparison
            .tax()
            .take_home(salary, &payload.state_code),
    ))
}

pub(crate) async fn col_adjust_endpoint(
    Extension(services): Extension<Arc<WageServices>>,
    Json(payload): Json<ColAdjustRequest>,
) -> Result<Json<ColAdjustment>, AppError> {
    let salary = payload.salary.dollars()?;
    Ok(Json(services.comparison.adjust_for_col(
        salary,
        &payload.from_area,
        &payload.to_area,
    )))
}

pub(crate) async fn compare_endpoint(
    Extension(services): Extension<Arc<WageServices>>,
    Json(payload): Json<CompareRequest>,
) -> Result<Json<TakeHomeComparison>, AppError> {
    let salary = payload.salary.dollars()?;
    Ok(Json(services.comparison.compare_take_home(
        salary,
        &payload.from,
        &payload.to,
    )))
}
