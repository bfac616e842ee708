//! Client for a remote sign-language translation service, plus a small
//! HTTP facade for browser front-ends.

pub mod account;
pub mod config;
pub mod error;
pub mod handlers;
pub mod health;
pub mod languages;
pub mod routes;
pub mod slots;
pub mod state;
pub mod translate;
pub mod transport;
pub mod upload;

pub use crate::config::Config;
pub use error::{ClientError, TransportError, ValidationError};
pub use health::{CapabilityProbe, ConnectionStatus};
pub use state::AppState;
pub use translate::{MediaFile, Origin, SignTranslator, TranslationClient, TranslationResult};
pub use transport::HttpTransport;
pub use upload::{ProgressCallback, UploadHelper, UploadResult};
