//! # API REST
//!
//! REST API implementation for the diagnosis mapper.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialisation, CORS, mock ABHA token checks, simulated latency)
//!
//! Uses `api-shared` for wire types and `namaste-core` for lookups.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::auth::{self, ABHA_TOKEN_HEADER};
use api_shared::wire;
use api_shared::HealthService;
use namaste_core::{CoreConfig, MapperService, Resolution, SAMPLE_DIAGNOSES};

type HandlerError = (StatusCode, &'static str);

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    cfg: Arc<CoreConfig>,
    mapper: MapperService,
    simulated_latency: Duration,
}

impl AppState {
    pub fn new(cfg: Arc<CoreConfig>, mapper: MapperService) -> Self {
        Self {
            cfg,
            mapper,
            simulated_latency: Duration::ZERO,
        }
    }

    /// Delay lookup and confirmation responses, for exercising client loading states.
    pub fn with_simulated_latency(mut self, latency: Duration) -> Self {
        self.simulated_latency = latency;
        self
    }

    async fn simulate_latency(&self) {
        if !self.simulated_latency.is_zero() {
            tokio::time::sleep(self.simulated_latency).await;
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        login,
        list_diagnoses,
        suggestions,
        resolve_diagnosis,
        confirm_diagnosis,
    ),
    components(schemas(
        wire::HealthRes,
        wire::LoginReq,
        wire::LoginRes,
        wire::ListDiagnosesRes,
        wire::SuggestionsRes,
        wire::ResolveReq,
        wire::ResolveRes,
        wire::DiagnosisRes,
        wire::ConfirmReq,
        wire::ConfirmRes,
    ))
)]
pub struct ApiDoc;

/// Build the REST router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/login", post(login))
        .route("/diagnoses", get(list_diagnoses))
        .route("/suggestions", get(suggestions))
        .route("/diagnoses/resolve", post(resolve_diagnosis))
        .route("/diagnoses/confirm", post(confirm_diagnosis))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn require_token(headers: &HeaderMap) -> Result<(), HandlerError> {
    let token = headers
        .get(ABHA_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());

    auth::validate_abha_token(token)
        .map_err(|_| (StatusCode::UNAUTHORIZED, "Missing x-abha-token header"))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = wire::HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<wire::HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = wire::LoginReq,
    responses(
        (status = 200, description = "Token accepted", body = wire::LoginRes),
        (status = 401, description = "Blank token")
    )
)]
/// Mock login.
///
/// Accepts any non-blank ABHA token. Nothing is verified and no session is stored; clients send
/// the same token in the `x-abha-token` header on subsequent requests.
#[axum::debug_handler]
async fn login(
    State(_state): State<AppState>,
    Json(req): Json<wire::LoginReq>,
) -> Result<Json<wire::LoginRes>, HandlerError> {
    auth::validate_abha_token(Some(&req.abha_token))
        .map_err(|_| (StatusCode::UNAUTHORIZED, "ABHA token is required"))?;

    tracing::info!("mock login accepted");
    Ok(Json(wire::LoginRes {
        authenticated: true,
        message: "Welcome! Testing mode enabled.".into(),
    }))
}

#[utoipa::path(
    get,
    path = "/diagnoses",
    responses(
        (status = 200, description = "Known diagnoses", body = wire::ListDiagnosesRes),
        (status = 401, description = "Missing ABHA token")
    )
)]
/// List every diagnosis in the vocabulary, plus the sample names.
#[axum::debug_handler]
async fn list_diagnoses(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<wire::ListDiagnosesRes>, HandlerError> {
    require_token(&headers)?;

    let vocabulary = state.mapper.vocabulary();
    let samples = SAMPLE_DIAGNOSES
        .iter()
        .filter(|sample| state.mapper.resolve(sample).is_found())
        .map(|sample| sample.to_string())
        .collect();

    Ok(Json(wire::ListDiagnosesRes {
        names: vocabulary.names().map(str::to_owned).collect(),
        samples,
    }))
}

#[utoipa::path(
    get,
    path = "/suggestions",
    params(wire::SuggestionsQuery),
    responses(
        (status = 200, description = "Ranked suggestions", body = wire::SuggestionsRes),
        (status = 400, description = "Malformed query string"),
        (status = 401, description = "Missing ABHA token")
    )
)]
/// Autocomplete suggestions for a partial diagnosis name.
///
/// `max` defaults to the configured default and is clamped to the configured limit.
#[axum::debug_handler]
async fn suggestions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<wire::SuggestionsQuery>,
) -> Result<Json<wire::SuggestionsRes>, HandlerError> {
    require_token(&headers)?;
    state.simulate_latency().await;

    let max = state.cfg.effective_max_suggestions(query.max);
    let suggestions = state.mapper.suggest(&query.q, max);

    Ok(Json(wire::SuggestionsRes {
        query: query.q,
        suggestions,
    }))
}

#[utoipa::path(
    post,
    path = "/diagnoses/resolve",
    request_body = wire::ResolveReq,
    responses(
        (status = 200, description = "Resolution result; `found` is false for unknown names", body = wire::ResolveRes),
        (status = 400, description = "Blank diagnosis name"),
        (status = 401, description = "Missing ABHA token")
    )
)]
/// Resolve a diagnosis name to its NAMASTE and ICD-11 codes.
#[axum::debug_handler]
async fn resolve_diagnosis(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<wire::ResolveReq>,
) -> Result<Json<wire::ResolveRes>, HandlerError> {
    require_token(&headers)?;
    if req.diagnosis_name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "diagnosis_name is required"));
    }
    state.simulate_latency().await;

    let resolution = state.mapper.resolve(&req.diagnosis_name);
    if !resolution.is_found() {
        tracing::info!("no codes found for {:?}", req.diagnosis_name);
    }

    Ok(Json(wire::ResolveRes::from(&resolution)))
}

#[utoipa::path(
    post,
    path = "/diagnoses/confirm",
    request_body = wire::ConfirmReq,
    responses(
        (status = 200, description = "Diagnosis confirmed", body = wire::ConfirmRes),
        (status = 400, description = "Blank diagnosis name"),
        (status = 401, description = "Missing ABHA token"),
        (status = 404, description = "Diagnosis does not resolve"),
        (status = 500, description = "Internal server error")
    )
)]
/// Confirm a diagnosis.
///
/// The name is resolved again here; only a successful resolution reaches the confirmation sink.
///
/// # Errors
/// Returns `404 Not Found` if the name does not resolve, and `500 Internal Server Error` if the
/// sink rejects the entry.
#[axum::debug_handler]
async fn confirm_diagnosis(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<wire::ConfirmReq>,
) -> Result<Json<wire::ConfirmRes>, HandlerError> {
    require_token(&headers)?;
    if req.diagnosis_name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "diagnosis_name is required"));
    }
    state.simulate_latency().await;

    let resolved = match state.mapper.resolve(&req.diagnosis_name) {
        Resolution::Found(resolved) => resolved,
        Resolution::NotFound => {
            tracing::warn!("confirm requested for unknown diagnosis {:?}", req.diagnosis_name);
            return Err((StatusCode::NOT_FOUND, "Diagnosis not found"));
        }
    };

    match state.mapper.confirm_with_receipt(&resolved) {
        Ok(receipt) => Ok(Json(wire::ConfirmRes::from(&receipt))),
        Err(e) => {
            tracing::error!("Confirm diagnosis error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}
