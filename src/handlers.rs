use crate::config::Config;
use crate::errors::{AppError, LookupError};
use crate::form::CepForm;
use crate::models::{Address, InputRequest};
use crate::presentation::ScreenView;
use crate::services::{CepLookup, ViaCepService};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

const BUSY_MESSAGE: &str = "Consulta em andamento";

/// Shared application state injected into handlers.
#[derive(Debug)]
pub struct AppState {
    /// Client for the ViaCEP lookup service.
    pub viacep: ViaCepService,
    /// The single CEP screen served by this process.
    pub form: Mutex<CepForm>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let viacep = ViaCepService::new(config)?;
        Ok(Self {
            viacep,
            form: Mutex::new(CepForm::new()),
        })
    }
}

/// Builds the HTTP router with tracing, CORS and a small body limit.
pub fn router(state: Arc<AppState>) -> Router {
    let form_routes = Router::new()
        .route("/api/v1/form", get(get_form))
        .route("/api/v1/form/input", put(update_input))
        .route("/api/v1/form/search", post(search))
        .route("/api/v1/form/clear", post(clear))
        .route("/api/v1/cep/:cep", get(lookup_cep))
        .layer(RequestBodyLimitLayer::new(64 * 1024));

    Router::new()
        .route("/health", get(health))
        .merge(form_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "rust-cep-api",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// GET /api/v1/form
pub async fn get_form(State(state): State<Arc<AppState>>) -> Json<ScreenView> {
    let form = state.form.lock().await;
    Json(ScreenView::from_form(&form))
}

/// PUT /api/v1/form/input
///
/// The field is read-only while a lookup is running.
pub async fn update_input(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<InputRequest>,
) -> Result<Json<ScreenView>, AppError> {
    let mut form = state.form.lock().await;
    if form.is_loading() {
        return Err(AppError::Conflict(BUSY_MESSAGE.to_string()));
    }

    form.set_input(&payload.text);
    Ok(Json(ScreenView::from_form(&form)))
}

/// POST /api/v1/form/search
///
/// The lock is released while ViaCEP is being queried so `GET /api/v1/form`
/// can report the loading state. A second search during that window is
/// rejected.
///
/// The lookup runs on its own task, so the screen leaves the loading state
/// even if the client goes away before the answer arrives.
pub async fn search(State(state): State<Arc<AppState>>) -> Result<Json<ScreenView>, AppError> {
    let cep = {
        let mut form = state.form.lock().await;
        if form.is_loading() {
            return Err(AppError::Conflict(BUSY_MESSAGE.to_string()));
        }
        match form.begin_search() {
            Some(cep) => cep,
            None => return Ok(Json(ScreenView::from_form(&form))),
        }
    };

    let task_state = state.clone();
    let lookup = tokio::spawn(async move {
        let outcome = task_state.viacep.lookup(&cep).await;

        let mut form = task_state.form.lock().await;
        form.finish_search(outcome);
        ScreenView::from_form(&form)
    });

    match lookup.await {
        Ok(view) => Ok(Json(view)),
        Err(e) => {
            // The task never recorded an outcome
            let mut form = state.form.lock().await;
            if form.is_loading() {
                form.finish_search(Err(LookupError::Transport(format!(
                    "lookup task failed: {}",
                    e
                ))));
            }
            Err(AppError::InternalError(format!("Lookup task failed: {}", e)))
        }
    }
}

/// POST /api/v1/form/clear
pub async fn clear(State(state): State<Arc<AppState>>) -> Result<Json<ScreenView>, AppError> {
    let mut form = state.form.lock().await;
    if form.is_loading() {
        return Err(AppError::Conflict(BUSY_MESSAGE.to_string()));
    }

    form.clear();
    Ok(Json(ScreenView::from_form(&form)))
}

/// GET /api/v1/cep/:cep
///
/// Stateless lookup that does not touch the screen.
pub async fn lookup_cep(
    State(state): State<Arc<AppState>>,
    Path(cep): Path<String>,
) -> Result<Json<Address>, AppError> {
    let address = state.viacep.fetch_address(&cep).await?;
    Ok(Json(address))
}
