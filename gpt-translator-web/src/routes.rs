use axum::{
    Json, Router,
    extract::State,
    http::{HeaderValue, Method, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use gpt_translator::language::{self, Language};
use gpt_translator::{CompletionProvider, FAILURE_MESSAGE, TranslationRequest};

fn default_source_language() -> String {
    language::DEFAULT_SOURCE.code.to_string()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateRequest {
    #[serde(default = "default_source_language")]
    pub source_language: String,
    pub target_language: String,
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translation: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub source: Vec<Language>,
    pub target: Vec<Language>,
}

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn CompletionProvider>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Build the application router
///
/// Cross-origin access is off unless an origin is given; the page is served
/// from the same origin as the API.
pub fn router(state: AppState, allow_origin: Option<HeaderValue>) -> Router {
    let app = Router::new()
        .route("/", get(serve_index))
        .route("/health", get(health))
        .route("/api/languages", get(list_languages))
        .route("/api/translate", post(translate_text))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    match allow_origin {
        Some(origin) => app.layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        ),
        None => app,
    }
}

async fn serve_index() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        include_str!("static/index.html"),
    )
}

async fn health() -> &'static str {
    "ok"
}

async fn list_languages() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        source: language::source_languages().to_vec(),
        target: language::target_languages().collect(),
    })
}

async fn translate_text(
    State(state): State<AppState>,
    Json(body): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let request = TranslationRequest::from_codes(&body.source_language, &body.target_language, body.text)
        .map_err(|e| {
            warn!(error = %e, "rejected translation request");
            api_error(StatusCode::BAD_REQUEST, e.to_string())
        })?;

    info!(
        from = request.source().code,
        to = request.target().code,
        chars = request.text().chars().count(),
        "translation requested"
    );

    match state.provider.translate(&request).await {
        Ok(translation) => Ok(Json(TranslateResponse { translation })),
        Err(e) if e.is_validation() => {
            warn!(error = %e, "rejected translation request");
            Err(api_error(StatusCode::BAD_REQUEST, e.to_string()))
        }
        Err(e) => {
            error!(
                provider = state.provider.provider_name(),
                error = %e,
                "translation failed"
            );
            Err(api_error(StatusCode::BAD_GATEWAY, FAILURE_MESSAGE))
        }
    }
}
