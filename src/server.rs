use crate::config::Config;
use crate::detection::{language_name, Classifier, LanguageScore, SUPPORTED_LANGUAGES};
use crate::engine::OcrEngine;
use crate::engines;
use crate::error::CodeshotError;
use crate::extract::{extract, Extraction};
use crate::preprocessing::{buffer, EnhancementSettings, Pipeline, Preset};
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Room for multipart boundaries and the small text fields next to the file
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<Classifier>,
    pub engine: Option<Arc<dyn OcrEngine>>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Build state from config, compiling the language table and loading OCR
    pub fn new(config: Config) -> Result<Self, CodeshotError> {
        let classifier = Classifier::builtin()?;
        tracing::info!(
            languages = classifier.table().len(),
            "language table compiled"
        );
        let engine = engines::load(&config)?;

        Ok(Self {
            classifier: Arc::new(classifier),
            engine,
            config: Arc::new(config),
        })
    }
}

#[derive(Deserialize)]
pub struct ClassifyRequest {
    pub text: String,
}

#[derive(Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub language: String,
    pub name: String,
    pub score: u32,
    pub candidates: Vec<Candidate>,
}

#[derive(Serialize, Deserialize)]
pub struct Candidate {
    pub language: String,
    pub score: u32,
}

impl From<LanguageScore> for Candidate {
    fn from(s: LanguageScore) -> Self {
        Self {
            language: s.language.to_string(),
            score: s.score,
        }
    }
}

#[derive(Serialize)]
pub struct PresetInfo {
    pub name: &'static str,
    pub settings: EnhancementSettings,
}

#[derive(Serialize)]
pub struct LanguageInfo {
    pub tag: &'static str,
    pub name: String,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Server info response
#[derive(Serialize)]
pub struct InfoResponse {
    pub version: String,
    pub ocr_engine: Option<String>,
    pub max_file_size_bytes: usize,
    pub default_preset: String,
    pub detectable_languages: usize,
}

/// Build the router for `state`
pub fn router(state: AppState) -> Router {
    let max_body = state.config.max_file_size + MULTIPART_OVERHEAD;

    Router::new()
        .route("/enhance", post(handle_enhance))
        .route("/extract", post(handle_extract))
        .route("/classify", post(handle_classify))
        .route("/presets", get(handle_presets))
        .route("/languages", get(handle_languages))
        .route("/health", get(handle_health))
        .route("/info", get(handle_info))
        .layer(DefaultBodyLimit::max(max_body))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server
pub async fn run(config: Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(config)?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Image upload plus the settings it should be enhanced with
struct Upload {
    data: Bytes,
    settings: EnhancementSettings,
}

/// Parse a multipart form with `file`, optional `preset` and optional `settings`
///
/// Explicit `settings` JSON wins over `preset`; with neither, the configured
/// default preset applies.
async fn read_upload(state: &AppState, mut multipart: Multipart) -> Result<Upload, CodeshotError> {
    let mut file_data: Option<Bytes> = None;
    let mut content_type: Option<String> = None;
    let mut preset: Option<Preset> = None;
    let mut explicit: Option<EnhancementSettings> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| CodeshotError::InvalidRequest(format!("Failed to parse multipart: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "file" => {
                content_type = field.content_type().map(|s| s.to_string());
                file_data = Some(field.bytes().await.map_err(|e| {
                    CodeshotError::InvalidRequest(format!("Failed to read file data: {}", e))
                })?);
            }
            "preset" => {
                let value = field.text().await.map_err(|e| {
                    CodeshotError::InvalidRequest(format!("Invalid preset: {}", e))
                })?;
                preset = Some(value.trim().parse()?);
            }
            "settings" => {
                let value = field.text().await.map_err(|e| {
                    CodeshotError::InvalidRequest(format!("Invalid settings: {}", e))
                })?;
                explicit = Some(serde_json::from_str(&value).map_err(|e| {
                    CodeshotError::InvalidRequest(format!("Invalid settings JSON: {}", e))
                })?);
            }
            _ => {
                // Ignore unknown fields
            }
        }
    }

    let data = file_data.ok_or(CodeshotError::MissingFile)?;

    if data.len() > state.config.max_file_size {
        return Err(CodeshotError::ImageTooLarge {
            size: data.len(),
            max: state.config.max_file_size,
        });
    }

    if let Some(mime) = content_type.as_deref() {
        if !mime.starts_with("image/") {
            tracing::warn!("Received file with content type: {}", mime);
        }
    }

    let settings = explicit
        .or_else(|| preset.map(|p| p.settings()))
        .unwrap_or_else(|| state.config.default_preset.settings());

    Ok(Upload { data, settings })
}

/// Run CPU-bound work off the async runtime
async fn blocking<T, F>(f: F) -> Result<T, CodeshotError>
where
    F: FnOnce() -> Result<T, CodeshotError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| CodeshotError::Internal(format!("worker task failed: {}", e)))?
}

/// Enhance an uploaded image and return it as PNG
async fn handle_enhance(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, CodeshotError> {
    let start = Instant::now();
    let upload = read_upload(&state, multipart).await?;
    let settings = upload.settings;

    let (png, steps) = blocking(move || {
        let image = buffer::decode(&upload.data)?;
        let result = Pipeline::new(settings)?.process(&image)?;
        Ok((buffer::encode_png(&result.image)?, result.steps.len()))
    })
    .await?;

    let processing_time_ms = start.elapsed().as_millis() as u64;
    tracing::info!(
        "Enhancement completed in {}ms, {} steps, {} bytes out",
        processing_time_ms,
        steps,
        png.len()
    );

    let mut response = ([(header::CONTENT_TYPE, "image/png")], png).into_response();
    response.headers_mut().insert(
        "x-processing-time-ms",
        HeaderValue::from(processing_time_ms),
    );
    Ok(response)
}

/// Enhance, OCR and classify an uploaded image
async fn handle_extract(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Extraction>, CodeshotError> {
    let engine = state.engine.clone().ok_or(CodeshotError::EngineUnavailable)?;
    let upload = read_upload(&state, multipart).await?;
    let settings = upload.settings;

    let extraction = blocking(move || {
        let image = buffer::decode(&upload.data)?;
        extract(engine.as_ref(), &image, &settings)
    })
    .await?;

    Ok(Json(extraction))
}

/// Classify a block of text
async fn handle_classify(
    State(state): State<AppState>,
    Json(request): Json<ClassifyRequest>,
) -> Json<ClassifyResponse> {
    let classification = state.classifier.classify(&request.text);
    let candidates = state
        .classifier
        .scores(&request.text)
        .into_iter()
        .map(Candidate::from)
        .collect();

    tracing::info!(
        "Classified {} chars as {} (score {})",
        request.text.len(),
        classification.language,
        classification.score
    );

    Json(ClassifyResponse {
        language: classification.language.to_string(),
        name: classification.name,
        score: classification.score,
        candidates,
    })
}

/// List the preset catalog
async fn handle_presets() -> impl IntoResponse {
    let presets: Vec<PresetInfo> = Preset::ALL
        .iter()
        .map(|p| PresetInfo {
            name: p.as_str(),
            settings: p.settings(),
        })
        .collect();
    Json(presets)
}

/// List editor-selectable languages
async fn handle_languages() -> impl IntoResponse {
    let languages: Vec<LanguageInfo> = SUPPORTED_LANGUAGES
        .iter()
        .map(|&tag| LanguageInfo {
            tag,
            name: language_name(tag),
        })
        .collect();
    Json(languages)
}

/// Handle health check requests
async fn handle_health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handle info requests
async fn handle_info(State(state): State<AppState>) -> impl IntoResponse {
    Json(InfoResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        ocr_engine: state.engine.as_ref().map(|e| e.name().to_string()),
        max_file_size_bytes: state.config.max_file_size,
        default_preset: state.config.default_preset.to_string(),
        detectable_languages: state.classifier.table().len(),
    })
}
