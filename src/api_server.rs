// Axum API Server Module
//
// Purpose: REST API around the crop advisor. Serves ranked crop advice for a
// location, accepts new site readings, and exposes the active catalog and
// market table.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::advisor::{CropAdvice, CropAdvisor};
use crate::catalog::Catalog;
use crate::config::ServerConfig;
use crate::context::{FarmerPreferences, SoilReading, WaterReading, WeatherReading};
use crate::market::MarketSignals;
use crate::store::{load_site_context, ContextSource, ReadingStore, Recorded, StoreError};

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub advisor: Arc<CropAdvisor>,

    /// Write side for the ingestion endpoints
    pub readings: Arc<ReadingStore>,

    /// Read side for the advice endpoint; defaults to `readings`
    pub context_source: Arc<dyn ContextSource>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> anyhow::Result<Self> {
        tracing::info!("Loading crop catalog...");
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_json_file(path)
                .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
            None => Catalog::default(),
        };
        tracing::info!("Loaded {} crop candidates", catalog.len());
        if catalog.is_empty() {
            tracing::warn!("Crop catalog is empty; advice will contain no recommendations");
        }

        tracing::info!("Initializing reading store...");
        let readings = match &config.readings_path {
            Some(path) => ReadingStore::from_json_file(path)
                .with_context(|| format!("Failed to seed readings from {}", path.display()))?,
            None => ReadingStore::new(),
        };
        tracing::info!("Reading store holds {} readings", readings.reading_count()?);

        let advisor = CropAdvisor::new(catalog, MarketSignals::default(), config.advisor.clone());
        Ok(Self::from_parts(advisor, readings))
    }

    pub fn from_parts(advisor: CropAdvisor, readings: ReadingStore) -> Self {
        let readings = Arc::new(readings);
        Self {
            advisor: Arc::new(advisor),
            context_source: readings.clone(),
            readings,
        }
    }

    /// Read site context from somewhere other than the ingestion store
    pub fn with_context_source(mut self, source: Arc<dyn ContextSource>) -> Self {
        self.context_source = source;
        self
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Advice
        .route("/api/crop-advice", post(crop_advice))

        // Reading ingestion
        .route("/api/readings/soil", post(record_soil))
        .route("/api/readings/weather", post(record_weather))
        .route("/api/readings/water", post(record_water))

        // Read-only views
        .route("/api/crops", get(list_crops))
        .route("/api/market-signals", get(market_signals))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Rank the catalog for a location
///
/// POST /api/crop-advice {"location": "Ludhiana", "soilType": "loamy", ...}
async fn crop_advice(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CropAdviceRequest>,
) -> Result<Json<CropAdviceResponse>, AppError> {
    let (location, preferences) = payload.into_parts()?;

    let context = load_site_context(state.context_source.as_ref(), &location);
    let advice = state.advisor.advise(&context, &preferences);

    tracing::info!(
        "Crop advice for '{}': {} recommendations, top pick {:?}",
        location,
        advice.recommended_crops.len(),
        advice.top_pick().map(|r| r.name.as_str())
    );

    Ok(Json(CropAdviceResponse {
        advice,
        diagnostics: Diagnostics {
            location,
            soil: context.soil,
            weather: context.weather,
            water: context.water,
            market: state.advisor.market().clone(),
        },
    }))
}

async fn record_soil(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ReadingRequest<SoilReading>>,
) -> Result<(StatusCode, Json<Recorded<SoilReading>>), AppError> {
    let location = payload.location()?;
    let record = state.readings.record_soil(&location, payload.reading)?;
    tracing::debug!("Recorded soil reading {} for '{}'", record.id, record.location);
    Ok((StatusCode::CREATED, Json(record)))
}

async fn record_weather(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ReadingRequest<WeatherReading>>,
) -> Result<(StatusCode, Json<Recorded<WeatherReading>>), AppError> {
    let location = payload.location()?;
    let record = state.readings.record_weather(&location, payload.reading)?;
    tracing::debug!("Recorded weather reading {} for '{}'", record.id, record.location);
    Ok((StatusCode::CREATED, Json(record)))
}

async fn record_water(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ReadingRequest<WaterReading>>,
) -> Result<(StatusCode, Json<Recorded<WaterReading>>), AppError> {
    let location = payload.location()?;
    let record = state.readings.record_water(&location, payload.reading)?;
    tracing::debug!("Recorded water reading {} for '{}'", record.id, record.location);
    Ok((StatusCode::CREATED, Json(record)))
}

async fn list_crops(State(state): State<AppState>) -> Json<Catalog> {
    Json(state.advisor.catalog().clone())
}

async fn market_signals(State(state): State<AppState>) -> Json<MarketSignals> {
    Json(state.advisor.market().clone())
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// `Json` extractor whose rejections render through `AppError`
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
struct JsonBody<T>(T);

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct CropAdviceRequest {
    location: Option<String>,
    soil_type: Option<String>,
    season: Option<String>,
    current_crop: Option<String>,
}

impl CropAdviceRequest {
    fn into_parts(self) -> Result<(String, FarmerPreferences), AppError> {
        let location = required_location(self.location)?;
        let preferences = FarmerPreferences {
            soil_type: self.soil_type,
            season: self.season,
            current_crop: self.current_crop,
        }
        .normalized();
        Ok((location, preferences))
    }
}

#[derive(Deserialize, Debug)]
struct ReadingRequest<T> {
    location: Option<String>,
    #[serde(flatten)]
    reading: T,
}

impl<T> ReadingRequest<T> {
    fn location(&self) -> Result<String, AppError> {
        required_location(self.location.clone())
    }
}

fn required_location(location: Option<String>) -> Result<String, AppError> {
    location
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .ok_or_else(|| AppError::BadRequest("Location is required".to_string()))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CropAdviceResponse {
    #[serde(flatten)]
    advice: CropAdvice,
    diagnostics: Diagnostics,
}

/// Raw inputs the advice was computed from
#[derive(Serialize)]
struct Diagnostics {
    location: String,
    soil: Option<SoilReading>,
    weather: Option<WeatherReading>,
    water: Option<WaterReading>,
    market: MarketSignals,
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    BadJson(#[from] JsonRejection),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::BadJson(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
            AppError::Store(e) => {
                tracing::error!("Reading store error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to access reading store".to_string())
            }
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
