#![allow(dead_code)]

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use dashmap::DashMap;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use sign_translate::{Config, HttpTransport, TranslationClient};

#[derive(Clone)]
struct Reply {
    status: u16,
    body: String,
    delay: Option<Duration>,
}

/// Stand-in for the remote translation service.
///
/// Unregistered paths answer 404. Every request is counted per path and its
/// body is kept for inspection.
#[derive(Default)]
pub struct MockServiceBuilder {
    replies: HashMap<String, Reply>,
}

impl MockServiceBuilder {
    pub fn json(mut self, path: &str, status: u16, body: Value) -> Self {
        self.replies.insert(
            path.to_string(),
            Reply {
                status,
                body: body.to_string(),
                delay: None,
            },
        );
        self
    }

    pub fn raw(mut self, path: &str, status: u16, body: &str) -> Self {
        self.replies.insert(
            path.to_string(),
            Reply {
                status,
                body: body.to_string(),
                delay: None,
            },
        );
        self
    }

    pub fn delayed(mut self, path: &str, delay: Duration, body: Value) -> Self {
        self.replies.insert(
            path.to_string(),
            Reply {
                status: 200,
                body: body.to_string(),
                delay: Some(delay),
            },
        );
        self
    }

    pub async fn start(self) -> MockService {
        let shared = Shared {
            replies: Arc::new(self.replies),
            hits: Arc::new(DashMap::new()),
            bodies: Arc::new(DashMap::new()),
        };

        let app = Router::new().fallback(handle).with_state(shared.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockService {
            base_url: format!("http://{}", addr),
            shared,
        }
    }
}

#[derive(Clone)]
struct Shared {
    replies: Arc<HashMap<String, Reply>>,
    hits: Arc<DashMap<String, usize>>,
    bodies: Arc<DashMap<String, Vec<u8>>>,
}

async fn handle(State(shared): State<Shared>, request: Request) -> Response {
    let path = request.uri().path().to_string();
    *shared.hits.entry(path.clone()).or_insert(0) += 1;

    let body = axum::body::to_bytes(request.into_body(), usize::MAX)
        .await
        .unwrap_or_default();
    shared.bodies.insert(path.clone(), body.to_vec());

    match shared.replies.get(&path) {
        Some(reply) => {
            if let Some(delay) = reply.delay {
                tokio::time::sleep(delay).await;
            }
            let status = StatusCode::from_u16(reply.status).unwrap();
            (
                status,
                [(header::CONTENT_TYPE, "application/json")],
                Body::from(reply.body.clone()),
            )
                .into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub struct MockService {
    pub base_url: String,
    shared: Shared,
}

impl MockService {
    pub fn builder() -> MockServiceBuilder {
        MockServiceBuilder::default()
    }

    pub fn hits(&self, path: &str) -> usize {
        self.shared.hits.get(path).map(|h| *h).unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.shared.hits.iter().map(|entry| *entry.value()).sum()
    }

    pub fn body_json(&self, path: &str) -> Value {
        let body = self.shared.bodies.get(path).expect("no request recorded");
        serde_json::from_slice(body.value()).expect("request body is not JSON")
    }

    pub fn body_text(&self, path: &str) -> String {
        let body = self.shared.bodies.get(path).expect("no request recorded");
        String::from_utf8_lossy(body.value()).to_string()
    }
}

pub fn config_for(base_url: &str) -> Config {
    let mut config = Config::default();
    config.api.base_url = base_url.to_string();
    config
}

pub fn transport_for(base_url: &str) -> HttpTransport {
    HttpTransport::new(&config_for(base_url).api).unwrap()
}

pub fn translation_client(base_url: &str) -> TranslationClient {
    let config = config_for(base_url);
    TranslationClient::new(HttpTransport::new(&config.api).unwrap(), config.limits)
}

/// A local address with nothing listening on it.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
