use reqwest::{multipart::Form, Client, Method, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::config::ApiConfig;
use crate::error::TransportError;

/// Diagnostic classification of a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusClass {
    Unauthorized,
    Forbidden,
    NotFound,
    ServerError,
    NetworkUnreachable,
    Unknown,
}

impl StatusClass {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => StatusClass::Unauthorized,
            403 => StatusClass::Forbidden,
            404 => StatusClass::NotFound,
            500..=599 => StatusClass::ServerError,
            _ => StatusClass::Unknown,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            StatusClass::Unauthorized => "Unauthorized access",
            StatusClass::Forbidden => "Forbidden access",
            StatusClass::NotFound => "Resource not found",
            StatusClass::ServerError => "Internal server error",
            StatusClass::NetworkUnreachable => "Network error - no response received",
            StatusClass::Unknown => "Unclassified request error",
        }
    }
}

/// Request payload accepted by [`HttpTransport::send`].
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(Form),
}

/// HTTP client bound to the translation service base URL
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(api: &ApiConfig) -> Result<Self, TransportError> {
        let timeout = Duration::from_millis(api.timeout_ms);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Send a request and return the response if its status is 2xx.
    ///
    /// Every response status is logged; failures are classified and logged
    /// before being returned.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<Response, TransportError> {
        let url = self.url(path);
        let mut request = self.client.request(method.clone(), &url);
        request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(value) => request.json(&value),
            RequestBody::Multipart(form) => request.multipart(form),
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let err = TransportError::from(e);
                log_failure(&method, &url, &err);
                return Err(err);
            }
        };

        let status = response.status().as_u16();
        debug!("{} {} -> {}", method, url, status);

        if response.status().is_success() {
            Ok(response)
        } else {
            let err = TransportError::Status {
                status,
                class: StatusClass::from_status(status),
            };
            log_failure(&method, &url, &err);
            Err(err)
        }
    }

    /// Send a request and decode a JSON response body.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<T, TransportError> {
        let response = self.send(method, path, body).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}

fn log_failure(method: &Method, url: &str, err: &TransportError) {
    let class = err.class();
    match err {
        TransportError::Status { status, .. } if *status >= 500 => {
            error!("API Error: {} {} -> {} ({})", method, url, status, class.describe());
        }
        _ => {
            warn!("API Error: {} {}: {} ({})", method, url, err, class.describe());
        }
    }
}
