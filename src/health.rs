use reqwest::Method;
use serde::Serialize;
use tracing::{debug, warn};

use crate::transport::{HttpTransport, RequestBody};

/// Reachability of the translation service as last observed by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    #[default]
    Unknown,
    Connected,
    Disconnected,
}

impl ConnectionStatus {
    pub fn from_probe(reachable: bool) -> Self {
        if reachable {
            ConnectionStatus::Connected
        } else {
            ConnectionStatus::Disconnected
        }
    }
}

/// Checks that the service root answers, without a dedicated health endpoint.
#[derive(Debug, Clone)]
pub struct CapabilityProbe {
    transport: HttpTransport,
}

impl CapabilityProbe {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// `true` only when `GET /` answers with exactly 200. Never fails.
    pub async fn check_health(&self) -> bool {
        match self.transport.send(Method::GET, "/", RequestBody::Empty).await {
            Ok(response) => {
                let ok = response.status().as_u16() == 200;
                debug!("Connection test to {}: {}", self.transport.base_url(), ok);
                ok
            }
            Err(e) => {
                warn!("Connection test to {} failed: {}", self.transport.base_url(), e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_to_unknown() {
        assert_eq!(ConnectionStatus::default(), ConnectionStatus::Unknown);
        assert_eq!(ConnectionStatus::from_probe(true), ConnectionStatus::Connected);
        assert_eq!(ConnectionStatus::from_probe(false), ConnectionStatus::Disconnected);
        assert_eq!(
            serde_json::to_value(ConnectionStatus::Disconnected).unwrap(),
            "disconnected"
        );
    }
}
