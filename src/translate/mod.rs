pub mod interface;
pub mod client;
pub mod fallback;

pub use interface::{
    MediaFile, Origin, SignTranslator, TranslationMode, TranslationRequest, TranslationResult,
};
pub use client::{RequestShape, TranslationClient};
