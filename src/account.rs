//! Account and history endpoints. Single-shot calls with no local state.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::ClientError;
use crate::transport::{HttpTransport, RequestBody};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct AccountClient {
    transport: HttpTransport,
}

impl AccountClient {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<Value, ClientError> {
        self.call("Login", Method::POST, "/api/auth/login", json_body(credentials)?)
            .await
    }

    pub async fn register(&self, registration: &Registration) -> Result<Value, ClientError> {
        self.call(
            "Registration",
            Method::POST,
            "/api/auth/register",
            json_body(registration)?,
        )
        .await
    }

    pub async fn profile(&self) -> Result<Value, ClientError> {
        self.call("Fetching profile", Method::GET, "/api/user/profile", RequestBody::Empty)
            .await
    }

    pub async fn translation_history(&self) -> Result<Value, ClientError> {
        self.call(
            "Fetching translation history",
            Method::GET,
            "/api/translation-history",
            RequestBody::Empty,
        )
        .await
    }

    async fn call(
        &self,
        operation: &'static str,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<Value, ClientError> {
        debug!("{}: {} {}", operation, method, path);
        self.transport
            .send_json(method, path, body)
            .await
            .map_err(|source| ClientError::Request { operation, source })
    }
}

fn json_body<T: Serialize>(value: &T) -> Result<RequestBody, ClientError> {
    serde_json::to_value(value)
        .map(RequestBody::Json)
        .map_err(|e| ClientError::Request {
            operation: "Encoding request",
            source: crate::error::TransportError::Request(e.to_string()),
        })
}
