use async_trait::async_trait;
use reqwest::{multipart, Method};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::fallback;
use super::interface::{
    MediaFile, Payload, SignTranslator, TranslationMode, TranslationRequest, TranslationResult,
};
use crate::config::LimitsConfig;
use crate::error::{ClientError, TransportError, ValidationError};
use crate::languages::SupportedLanguages;
use crate::transport::{HttpTransport, RequestBody};

/// Request path and body combinations tried for text translation, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestShape {
    /// `POST /api/translate {text, sourceLanguage, targetLanguage, type}`
    Primary,
    /// `POST /translate {input, from, to}`
    Alternate,
}

impl RequestShape {
    pub fn path(&self) -> &'static str {
        match self {
            RequestShape::Primary => "/api/translate",
            RequestShape::Alternate => "/translate",
        }
    }

    pub fn body(&self, text: &str, request: &TranslationRequest) -> Value {
        match self {
            RequestShape::Primary => json!({
                "text": text,
                "sourceLanguage": request.source_language,
                "targetLanguage": request.target_language,
                "type": request.mode.as_str(),
            }),
            RequestShape::Alternate => json!({
                "input": text,
                "from": request.source_language,
                "to": request.target_language,
            }),
        }
    }
}

/// Progress of a single text translation.
///
/// Transitions only move forward: each shape is tried at most once.
#[derive(Debug)]
enum AttemptState {
    TryingPrimary,
    TryingAlternate,
    Fallback,
    Done(TranslationResult),
}

/// Client for the remote translation service
#[derive(Debug, Clone)]
pub struct TranslationClient {
    transport: HttpTransport,
    limits: LimitsConfig,
}

impl TranslationClient {
    pub fn new(transport: HttpTransport, limits: LimitsConfig) -> Self {
        Self { transport, limits }
    }

    pub async fn translate_text(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<TranslationResult, ClientError> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyInput.into());
        }

        let request = TranslationRequest::text(text, source_language, target_language);
        debug!(
            "Translating {} chars {} -> {}",
            text.chars().count(),
            source_language,
            target_language
        );

        let mut state = AttemptState::TryingPrimary;
        loop {
            state = match state {
                AttemptState::TryingPrimary => {
                    match self.attempt(RequestShape::Primary, text, &request).await {
                        Ok(result) => AttemptState::Done(result),
                        Err(e) => {
                            warn!("Primary translate request failed, trying alternate: {}", e);
                            AttemptState::TryingAlternate
                        }
                    }
                }
                AttemptState::TryingAlternate => {
                    match self.attempt(RequestShape::Alternate, text, &request).await {
                        Ok(result) => AttemptState::Done(result),
                        Err(e) => {
                            warn!("Alternate translate request failed: {}", e);
                            AttemptState::Fallback
                        }
                    }
                }
                AttemptState::Fallback => {
                    warn!(
                        "Translation service unavailable, using fallback phrase for {}",
                        request.pair_key()
                    );
                    AttemptState::Done(fallback::fallback_result(
                        &request.source_language,
                        &request.target_language,
                    ))
                }
                AttemptState::Done(result) => return Ok(result),
            };
        }
    }

    async fn attempt(
        &self,
        shape: RequestShape,
        text: &str,
        request: &TranslationRequest,
    ) -> Result<TranslationResult, TransportError> {
        let response = self
            .transport
            .send(
                Method::POST,
                shape.path(),
                RequestBody::Json(shape.body(text, request)),
            )
            .await?;

        let body = read_body(response).await?;
        debug!("{:?} shape succeeded", shape);
        Ok(TranslationResult::from_response(&body))
    }

    pub async fn translate_sign_to_text(
        &self,
        video: MediaFile,
        source_language: &str,
        target_language: &str,
    ) -> Result<TranslationResult, ClientError> {
        if video.is_empty() {
            return Err(ValidationError::EmptyInput.into());
        }
        if video.len() > self.limits.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size: video.len(),
                max: self.limits.max_file_size,
            }
            .into());
        }

        let request = TranslationRequest::video(video, source_language, target_language);
        let form = video_form(request).map_err(ClientError::Translation)?;

        let response = self
            .transport
            .send(Method::POST, "/api/translate/video", RequestBody::Multipart(form))
            .await
            .map_err(ClientError::Translation)?;
        let body = read_body(response).await.map_err(ClientError::Translation)?;

        info!("Sign-to-text translation completed");
        Ok(TranslationResult::from_response(&body))
    }

    pub async fn get_supported_languages(&self) -> SupportedLanguages {
        match self
            .transport
            .send_json::<SupportedLanguages>(Method::GET, "/api/languages", RequestBody::Empty)
            .await
        {
            Ok(languages) => languages,
            Err(e) => {
                warn!("Falling back to built-in language list: {}", e);
                SupportedLanguages::builtin()
            }
        }
    }

    pub async fn detect_language(&self, text: &str) -> Result<String, ClientError> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyInput.into());
        }

        let body: Value = self
            .transport
            .send_json(
                Method::POST,
                "/api/detect-language",
                RequestBody::Json(json!({ "text": text })),
            )
            .await
            .map_err(ClientError::Detection)?;

        detected_code(&body).ok_or_else(|| {
            ClientError::Detection(TransportError::Decode(format!(
                "no language code in response: {}",
                body
            )))
        })
    }
}

/// Read a body as JSON, treating anything unparseable as `null`.
async fn read_body(response: reqwest::Response) -> Result<Value, TransportError> {
    let raw = response.text().await?;
    Ok(serde_json::from_str(&raw).unwrap_or(Value::Null))
}

fn video_form(request: TranslationRequest) -> Result<multipart::Form, TransportError> {
    let video = match request.payload {
        Payload::Binary(video) => video,
        Payload::Text(_) => {
            return Err(TransportError::Request(
                "video translation needs a binary payload".to_string(),
            ))
        }
    };

    let mut part = multipart::Part::bytes(video.bytes).file_name(video.file_name);
    if let Some(content_type) = &video.content_type {
        part = part
            .mime_str(content_type)
            .map_err(|e| TransportError::Request(e.to_string()))?;
    }

    Ok(multipart::Form::new()
        .part("video", part)
        .text("sourceLanguage", request.source_language)
        .text("targetLanguage", request.target_language)
        .text("type", TranslationMode::SignToText.as_str()))
}

/// Language code from `language`, `code`, `detectedLanguage`, or a bare string.
fn detected_code(body: &Value) -> Option<String> {
    ["language", "code", "detectedLanguage"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .or_else(|| body.as_str())
        .filter(|code| !code.is_empty())
        .map(|code| code.to_string())
}

#[async_trait]
impl SignTranslator for TranslationClient {
    async fn translate_text(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<TranslationResult, ClientError> {
        TranslationClient::translate_text(self, text, source_language, target_language).await
    }

    async fn translate_sign_to_text(
        &self,
        video: MediaFile,
        source_language: &str,
        target_language: &str,
    ) -> Result<TranslationResult, ClientError> {
        TranslationClient::translate_sign_to_text(self, video, source_language, target_language)
            .await
    }

    async fn supported_languages(&self) -> SupportedLanguages {
        self.get_supported_languages().await
    }

    async fn detect_language(&self, text: &str) -> Result<String, ClientError> {
        TranslationClient::detect_language(self, text).await
    }
}
