use axum::{
    extract::{Multipart, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{ClientError, ValidationError};
use crate::health::ConnectionStatus;
use crate::languages::{self, LanguageKind};
use crate::state::AppState;
use crate::translate::MediaFile;
use crate::upload::ProgressCallback;

/// Header naming the logical slot for "latest request wins" translation.
pub const REQUEST_SLOT_HEADER: &str = "x-request-slot";

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

fn api_error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message.into() })))
}

fn client_error(err: ClientError) -> (StatusCode, Json<Value>) {
    let status = if err.is_validation() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::BAD_GATEWAY
    };
    api_error(status, err.to_string())
}

fn validation_error(err: ValidationError) -> (StatusCode, Json<Value>) {
    client_error(err.into())
}

fn check_language(code: &str) -> Result<(), (StatusCode, Json<Value>)> {
    if languages::is_supported(code) {
        Ok(())
    } else {
        Err(validation_error(ValidationError::InvalidLanguage(code.to_string())))
    }
}

fn to_json<T: serde::Serialize>(value: T) -> ApiResult {
    serde_json::to_value(value)
        .map(Json)
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let connected = state.probe.check_health().await;
    let status = ConnectionStatus::from_probe(connected);
    state.set_connection_status(status).await;

    Json(json!({
        "status": status,
        "connected": connected
    }))
}

pub async fn connection_status(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "status": state.connection_status().await }))
}

pub async fn supported_languages(State(state): State<AppState>) -> ApiResult {
    to_json(state.translator.supported_languages().await)
}

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    kind: Option<String>,
}

pub async fn language_catalog(Query(query): Query<CatalogQuery>) -> ApiResult {
    match query.kind.as_deref() {
        None => to_json(languages::all()),
        Some(kind) => match LanguageKind::parse(kind) {
            Some(kind) => to_json(languages::list_by_kind(kind)),
            None => Err(api_error(
                StatusCode::BAD_REQUEST,
                format!("Unknown language kind: {}", kind),
            )),
        },
    }
}

pub async fn language_pairs() -> ApiResult {
    to_json(languages::default_pairs())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateBody {
    text: String,
    source_language: String,
    target_language: String,
}

pub async fn translate_text(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<TranslateBody>,
) -> ApiResult {
    check_language(&body.source_language)?;
    check_language(&body.target_language)?;

    let max = state.config.limits.max_text_length;
    let length = body.text.chars().count();
    if length > max {
        return Err(validation_error(ValidationError::TextTooLong { length, max }));
    }

    let slot = headers
        .get(REQUEST_SLOT_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let translator = Arc::clone(&state.translator);
    let work = async move {
        translator
            .translate_text(&body.text, &body.source_language, &body.target_language)
            .await
    };

    let outcome = match slot {
        Some(slot) => state
            .slots
            .run(&slot, work)
            .await
            .map_err(|e| api_error(StatusCode::CONFLICT, e.to_string()))?,
        None => work.await,
    };

    let result = outcome.map_err(client_error)?;
    if result.is_fallback() {
        warn!("API connection failed. Showing demo translation.");
    }
    to_json(result)
}

/// Collected multipart fields for a video translation.
#[derive(Default)]
struct VideoForm {
    video: Option<MediaFile>,
    source_language: Option<String>,
    target_language: Option<String>,
}

async fn read_media_field(
    field: axum::extract::multipart::Field<'_>,
) -> Result<MediaFile, (StatusCode, Json<Value>)> {
    let file_name = field.file_name().unwrap_or("upload").to_string();
    let content_type = field.content_type().map(|s| s.to_string());
    let bytes = field
        .bytes()
        .await
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;

    let mut media = MediaFile::new(file_name, bytes.to_vec());
    media.content_type = content_type;
    Ok(media)
}

pub async fn translate_video(State(state): State<AppState>, mut multipart: Multipart) -> ApiResult {
    let mut form = VideoForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "video" => form.video = Some(read_media_field(field).await?),
            "sourceLanguage" | "targetLanguage" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;
                if name == "sourceLanguage" {
                    form.source_language = Some(value);
                } else {
                    form.target_language = Some(value);
                }
            }
            other => debug!("Ignoring multipart field {}", other),
        }
    }

    let video = form
        .video
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "No video file provided"))?;
    let source = form.source_language.unwrap_or_else(|| "asl".to_string());
    let target = form.target_language.unwrap_or_else(|| "en".to_string());
    check_language(&source)?;
    check_language(&target)?;

    let result = state
        .translator
        .translate_sign_to_text(video, &source, &target)
        .await
        .map_err(client_error)?;
    to_json(result)
}

#[derive(Debug, Deserialize)]
pub struct DetectBody {
    text: String,
}

pub async fn detect_language(
    State(state): State<AppState>,
    Json(body): Json<DetectBody>,
) -> ApiResult {
    let language = state
        .translator
        .detect_language(&body.text)
        .await
        .map_err(client_error)?;
    Ok(Json(json!({ "language": language })))
}

pub async fn upload_file(State(state): State<AppState>, mut multipart: Multipart) -> ApiResult {
    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?
    {
        if field.name() == Some("file") {
            file = Some(read_media_field(field).await?);
        }
    }

    let file = file.ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "No file provided"))?;
    let file_name = file.file_name.clone();
    let progress: ProgressCallback = Arc::new(move |percent: u8| {
        debug!("Uploading {}: {}%", file_name, percent);
    });

    let result = state
        .uploader
        .upload_file(file, Some(progress))
        .await
        .map_err(client_error)?;
    to_json(result)
}

pub async fn translation_history(State(state): State<AppState>) -> ApiResult {
    let history = state
        .accounts
        .translation_history()
        .await
        .map_err(client_error)?;
    Ok(Json(history))
}
