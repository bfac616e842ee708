use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClientError;
use crate::languages::SupportedLanguages;

pub const DEFAULT_COMPLETION_MESSAGE: &str = "Translation completed successfully!";

/// Where a translation result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Remote,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub text: String,
    pub origin: Origin,
}

impl TranslationResult {
    pub fn remote(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: Origin::Remote,
        }
    }

    pub fn fallback(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: Origin::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == Origin::Fallback
    }

    /// Build a remote result from any known reply shape.
    ///
    /// Precedence: a non-empty `translation` string, then a non-empty `text`
    /// string, then [`DEFAULT_COMPLETION_MESSAGE`]. Bodies that are not JSON
    /// objects fall through to the default.
    pub fn from_response(body: &Value) -> Self {
        let field = |name: &str| {
            body.get(name)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        };

        let text = field("translation")
            .or_else(|| field("text"))
            .unwrap_or(DEFAULT_COMPLETION_MESSAGE);

        Self::remote(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranslationMode {
    #[serde(rename = "text-to-sign")]
    TextToSign,
    #[serde(rename = "sign-to-text")]
    SignToText,
}

impl TranslationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationMode::TextToSign => "text-to-sign",
            TranslationMode::SignToText => "sign-to-text",
        }
    }
}

/// A captured frame, recorded clip or picked file.
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lowercased extension of the file name, if any.
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }
}

#[derive(Debug, Clone)]
pub enum Payload {
    Text(String),
    Binary(MediaFile),
}

/// One user action, built per request and never stored.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub payload: Payload,
    pub source_language: String,
    pub target_language: String,
    pub mode: TranslationMode,
}

impl TranslationRequest {
    pub fn text(text: &str, source: &str, target: &str) -> Self {
        Self {
            payload: Payload::Text(text.to_string()),
            source_language: source.to_string(),
            target_language: target.to_string(),
            mode: TranslationMode::TextToSign,
        }
    }

    pub fn video(video: MediaFile, source: &str, target: &str) -> Self {
        Self {
            payload: Payload::Binary(video),
            source_language: source.to_string(),
            target_language: target.to_string(),
            mode: TranslationMode::SignToText,
        }
    }

    /// Fallback table key, `"{source}-{target}"`.
    pub fn pair_key(&self) -> String {
        format!("{}-{}", self.source_language, self.target_language)
    }
}

/// Translation operations consumed by the HTTP facade.
#[async_trait]
pub trait SignTranslator: Send + Sync {
    /// Translate text, never failing on transport errors.
    ///
    /// Only validation problems are returned as errors; everything else
    /// degrades to a result tagged [`Origin::Fallback`].
    async fn translate_text(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<TranslationResult, ClientError>;

    /// Translate a recorded sign-language clip to text.
    async fn translate_sign_to_text(
        &self,
        video: MediaFile,
        source_language: &str,
        target_language: &str,
    ) -> Result<TranslationResult, ClientError>;

    async fn supported_languages(&self) -> SupportedLanguages;

    async fn detect_language(&self, text: &str) -> Result<String, ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn translation_field_wins() {
        let r = TranslationResult::from_response(&json!({"translation": "a", "text": "b"}));
        assert_eq!(r, TranslationResult::remote("a"));
    }

    #[test]
    fn text_field_is_second() {
        let r = TranslationResult::from_response(&json!({"translation": "", "text": "b"}));
        assert_eq!(r.text, "b");
        assert_eq!(r.origin, Origin::Remote);
    }

    #[test]
    fn unknown_shapes_use_default_message() {
        for body in [json!({}), json!({"translation": 3}), json!("plain"), Value::Null] {
            let r = TranslationResult::from_response(&body);
            assert_eq!(r.text, DEFAULT_COMPLETION_MESSAGE);
            assert!(!r.is_fallback());
        }
    }

    #[test]
    fn origin_serializes_lowercase() {
        let value = serde_json::to_value(TranslationResult::fallback("x")).unwrap();
        assert_eq!(value, json!({"text": "x", "origin": "fallback"}));
    }

    #[test]
    fn media_extension_is_lowercased() {
        let clip = MediaFile::new("Clip.WebM", vec![1, 2, 3]);
        assert_eq!(clip.extension().as_deref(), Some("webm"));
        assert_eq!(clip.len(), 3);
        assert_eq!(MediaFile::new("noext", vec![]).extension(), None);
    }

    #[test]
    fn request_pair_key() {
        let req = TranslationRequest::text("Hello", "en", "asl");
        assert_eq!(req.pair_key(), "en-asl");
        assert_eq!(req.mode.as_str(), "text-to-sign");
    }
}
