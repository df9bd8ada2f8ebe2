use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{info, warn};

use umlgen_agent::{DiagramGenerator, GenerateError};

// Application state
#[derive(Clone)]
pub struct AppState {
    // None when GEMINI_API_KEY is absent; the server still answers health
    // probes and reports the missing credential per request.
    pub generator: Option<Arc<DiagramGenerator>>,
}

// API types
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub diagram_type: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub plant_uml_code: String,
    pub image_url: String,
    pub diagram_type: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub has_api_key: bool,
    pub timestamp: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter("umlgen_web_server=info,tower_http=debug")
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let generator = match DiagramGenerator::from_env() {
        Ok(generator) => Some(Arc::new(generator)),
        Err(e) => {
            warn!("Diagram generator not configured: {}", e);
            None
        }
    };

    let app = create_router(AppState { generator });

    // Determine port
    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()
        .unwrap_or(3000);

    let addr = format!("0.0.0.0:{}", port);
    info!("Starting server on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn create_router(state: AppState) -> Router {
    Router::new()
        // API routes
        .route("/api/health", get(health_check))
        .route("/api/generate-diagram", post(generate_diagram))
        // Serve the chat UI
        .fallback_service(ServeDir::new("static"))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

// Health check endpoint - reports whether the generation credential is
// configured, nothing more
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        has_api_key: state.generator.is_some(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

// Generate a PlantUML diagram from a natural-language description
async fn generate_diagram(
    State(state): State<AppState>,
    request: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, (StatusCode, Json<ErrorResponse>)> {
    // An unparseable body must come back in the same failure envelope as
    // every other error, not as axum's plain-text rejection
    let Json(request) = request.map_err(|rejection| {
        (
            rejection.status(),
            Json(ErrorResponse {
                success: false,
                error: rejection.body_text(),
            }),
        )
    })?;

    // Validate input before touching the generator so a missing credential
    // does not mask a client error
    if request.description.trim().is_empty() || request.diagram_type.trim().is_empty() {
        return Err(error_response(&GenerateError::InvalidInput));
    }

    let Some(generator) = &state.generator else {
        return Err(error_response(&GenerateError::Configuration(
            "GEMINI_API_KEY environment variable not set".to_string(),
        )));
    };

    match generator
        .generate(&request.description, &request.diagram_type)
        .await
    {
        Ok(result) => Ok(Json(GenerateResponse {
            success: true,
            plant_uml_code: result.plant_uml_code.into_inner(),
            image_url: result.image_url,
            diagram_type: result.diagram_type.label().to_string(),
        })),
        Err(e) => {
            warn!("Failed to generate diagram: {}", e);
            Err(error_response(&e))
        }
    }
}

fn error_response(error: &GenerateError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match error {
        GenerateError::InvalidInput => StatusCode::BAD_REQUEST,
        GenerateError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        GenerateError::GenerationFailed(_) => StatusCode::BAD_GATEWAY,
    };
    (
        status,
        Json(ErrorResponse {
            success: false,
            error: error.to_string(),
        }),
    )
}
