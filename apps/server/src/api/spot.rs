use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use spotfix_core::InstrumentRequest;

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{PolicyInfo, ReportRequest, Resolution, ResolveQuery, SpotReport},
};

/// Resolve a company name or ticker to a provider symbol.
#[utoipa::path(
    get,
    path = "/api/v1/resolve",
    params(ResolveQuery),
    responses((status = 200, body = Resolution))
)]
pub async fn resolve_symbol(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ResolveQuery>,
) -> ApiResult<Json<Resolution>> {
    let resolution = state.spot_service.resolve(&params.query).await;
    Ok(Json(Resolution::from(resolution)))
}

/// Fetch fixings and compute per-instrument and global spots.
#[utoipa::path(
    post,
    path = "/api/v1/spot/report",
    request_body = ReportRequest,
    responses(
        (status = 200, body = SpotReport),
        (status = 400, description = "Invalid instruments or weights")
    )
)]
pub async fn compute_report(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ReportRequest>,
) -> ApiResult<Json<SpotReport>> {
    let policy = payload.policy_or(state.spot_service.default_policy());
    let instruments: Vec<InstrumentRequest> = payload
        .instruments
        .into_iter()
        .map(InstrumentRequest::from)
        .collect();
    let report = state
        .spot_service
        .compute_report(instruments, policy)
        .await?;
    Ok(Json(SpotReport::from(report)))
}

/// Supported aggregation policies.
#[utoipa::path(get, path = "/api/v1/spot/policies", responses((status = 200, body = [PolicyInfo])))]
pub async fn list_policies(State(state): State<Arc<AppState>>) -> Json<Vec<PolicyInfo>> {
    Json(PolicyInfo::list(state.spot_service.default_policy()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/resolve", get(resolve_symbol))
        .route("/spot/report", post(compute_report))
        .route("/spot/policies", get(list_policies))
}
