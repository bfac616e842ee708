//! Multipart file upload with progress reporting.

use axum::body::Bytes;
use futures::StreamExt;
use reqwest::{multipart, Body, Method};
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::LimitsConfig;
use crate::error::{ClientError, TransportError, ValidationError};
use crate::translate::MediaFile;
use crate::transport::{HttpTransport, RequestBody};

const UPLOAD_PATH: &str = "/api/upload";
const CHUNK_SIZE: usize = 64 * 1024;

/// Called with the percentage (0..=100) of the file handed to the transport.
pub type ProgressCallback = Arc<dyn Fn(u8) + Send + Sync>;

#[derive(Debug, Clone, Serialize)]
pub struct UploadResult {
    pub body: Value,
    pub bytes_sent: u64,
}

/// Tracks bytes sent and emits non-decreasing percentages.
struct ProgressReporter {
    total: u64,
    sent: AtomicU64,
    last: AtomicU8,
    callback: Option<ProgressCallback>,
}

impl ProgressReporter {
    fn new(total: u64, callback: Option<ProgressCallback>) -> Self {
        Self {
            total,
            sent: AtomicU64::new(0),
            last: AtomicU8::new(0),
            callback,
        }
    }

    fn advance(&self, bytes: u64) {
        let sent = self.sent.fetch_add(bytes, Ordering::SeqCst) + bytes;
        self.emit(percent(sent, self.total));
    }

    fn emit(&self, percent: u8) {
        let previous = self.last.fetch_max(percent, Ordering::SeqCst);
        if let Some(callback) = &self.callback {
            callback(previous.max(percent));
        }
    }

    fn finish(&self) {
        if self.last.load(Ordering::SeqCst) < 100 {
            self.emit(100);
        }
    }

    fn bytes_sent(&self) -> u64 {
        self.sent.load(Ordering::SeqCst)
    }
}

/// Rounded percentage, capped at 100. An empty file counts as complete.
fn percent(sent: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let value = (sent.saturating_mul(100) + total / 2) / total;
    value.min(100) as u8
}

#[derive(Debug, Clone)]
pub struct UploadHelper {
    transport: HttpTransport,
    limits: LimitsConfig,
}

impl UploadHelper {
    pub fn new(transport: HttpTransport, limits: LimitsConfig) -> Self {
        Self { transport, limits }
    }

    fn validate(&self, file: &MediaFile) -> Result<(), ValidationError> {
        if file.len() > self.limits.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size: file.len(),
                max: self.limits.max_file_size,
            });
        }
        match file.extension() {
            Some(ext) if self.limits.accepts_extension(&ext) => Ok(()),
            Some(ext) => Err(ValidationError::UnsupportedFormat(ext)),
            None => Err(ValidationError::UnsupportedFormat(file.file_name.clone())),
        }
    }

    /// Upload `file` in a single multipart request. No retry.
    pub async fn upload_file(
        &self,
        file: MediaFile,
        on_progress: Option<ProgressCallback>,
    ) -> Result<UploadResult, ClientError> {
        self.validate(&file)?;

        let total = file.len();
        let reporter = Arc::new(ProgressReporter::new(total, on_progress));
        let form = upload_form(file, reporter.clone()).map_err(upload_error)?;

        debug!("Uploading {} bytes to {}", total, UPLOAD_PATH);
        let response = self
            .transport
            .send(Method::POST, UPLOAD_PATH, RequestBody::Multipart(form))
            .await
            .map_err(upload_error)?;
        let raw = response
            .text()
            .await
            .map_err(|e| upload_error(TransportError::from(e)))?;

        reporter.finish();
        let bytes_sent = reporter.bytes_sent();
        info!("File uploaded ({} bytes)", bytes_sent);

        let body = serde_json::from_str(&raw).unwrap_or(Value::String(raw));
        Ok(UploadResult { body, bytes_sent })
    }
}

fn upload_error(err: TransportError) -> ClientError {
    warn!("File upload failed: {}", err);
    ClientError::Upload {
        message: err.to_string(),
    }
}

/// Splits the buffer into `CHUNK_SIZE` views without copying it.
fn chunked(data: Bytes) -> impl Iterator<Item = Bytes> + Send + Sync {
    let len = data.len();
    (0..len)
        .step_by(CHUNK_SIZE)
        .map(move |start| data.slice(start..len.min(start + CHUNK_SIZE)))
}

fn upload_form(
    file: MediaFile,
    reporter: Arc<ProgressReporter>,
) -> Result<multipart::Form, TransportError> {
    let total = file.len();
    let stream = futures::stream::iter(chunked(Bytes::from(file.bytes))).map(move |chunk| {
        reporter.advance(chunk.len() as u64);
        Ok::<_, std::io::Error>(chunk)
    });

    let mut part = multipart::Part::stream_with_length(Body::wrap_stream(stream), total)
        .file_name(file.file_name);
    if let Some(content_type) = &file.content_type {
        part = part
            .mime_str(content_type)
            .map_err(|e| TransportError::Request(e.to_string()))?;
    }

    Ok(multipart::Form::new().part("file", part))
}
