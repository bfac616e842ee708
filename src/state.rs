use std::sync::Arc;
use tokio::sync::RwLock;

use crate::account::AccountClient;
use crate::config::Config;
use crate::error::TransportError;
use crate::health::{CapabilityProbe, ConnectionStatus};
use crate::slots::RequestSlots;
use crate::translate::{SignTranslator, TranslationClient};
use crate::transport::HttpTransport;
use crate::upload::UploadHelper;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub translator: Arc<dyn SignTranslator>,
    pub probe: Arc<CapabilityProbe>,
    pub uploader: Arc<UploadHelper>,
    pub accounts: Arc<AccountClient>,
    pub connection: Arc<RwLock<ConnectionStatus>>,
    pub slots: RequestSlots,
}

impl AppState {
    /// Wire every client to one transport built from `config.api`.
    pub fn new(config: Config) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(&config.api)?;

        Ok(Self {
            translator: Arc::new(TranslationClient::new(
                transport.clone(),
                config.limits.clone(),
            )),
            probe: Arc::new(CapabilityProbe::new(transport.clone())),
            uploader: Arc::new(UploadHelper::new(transport.clone(), config.limits.clone())),
            accounts: Arc::new(AccountClient::new(transport)),
            connection: Arc::new(RwLock::new(ConnectionStatus::Unknown)),
            slots: RequestSlots::new(),
            config: Arc::new(config),
        })
    }

    pub fn with_translator(mut self, translator: Arc<dyn SignTranslator>) -> Self {
        self.translator = translator;
        self
    }

    pub async fn connection_status(&self) -> ConnectionStatus {
        *self.connection.read().await
    }

    pub async fn set_connection_status(&self, status: ConnectionStatus) {
        *self.connection.write().await = status;
    }
}
