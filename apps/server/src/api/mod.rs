use std::sync::Arc;

use axum::{http::HeaderValue, routing::get, Json, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    config::Config,
    main_lib::AppState,
    models::{
        InstrumentInput, PolicyInfo, ReportRequest, ReportRow, ReportWarning, Resolution,
        SpotReport,
    },
};

pub mod health;
pub mod spot;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        health::readyz,
        spot::resolve_symbol,
        spot::compute_report,
        spot::list_policies
    ),
    components(schemas(
        Resolution,
        InstrumentInput,
        ReportRequest,
        ReportRow,
        ReportWarning,
        SpotReport,
        PolicyInfo
    )),
    tags((name = "spotfix", description = "Fixing retrieval and spot calculation"))
)]
pub struct ApiDoc;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin {}", o);
                    None
                }
            })
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };

    let openapi = ApiDoc::openapi();

    let api = Router::new().merge(health::router()).merge(spot::router());

    Router::new()
        .nest("/api/v1", api)
        .route(
            "/openapi.json",
            get(move || {
                let doc = openapi.clone();
                async move { Json(doc) }
            }),
        )
        .with_state(state)
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
