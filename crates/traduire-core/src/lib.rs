pub mod client;
pub mod config;
pub mod error;
pub mod history;
pub mod language;
pub mod settings;

// Re-export main types for convenience
pub use client::{TranslationClient, TranslationRequest, DEFAULT_ENDPOINT};
pub use config::Config;
pub use error::{TranslateError, TranslateResult};
pub use history::{HistoryStore, TranslationResult};
pub use language::Language;
pub use settings::{FileSettings, MemorySettings, SettingsStore};
