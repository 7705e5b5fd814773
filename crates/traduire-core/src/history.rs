//! Append-only translation history
//!
//! Records are kept as a newline-joined `"<original> -> <translated>"` blob
//! under a single settings key, the same format earlier builds wrote, so
//! existing history keeps loading.

use anyhow::Result;

use crate::settings::SettingsStore;

pub const HISTORY_KEY: &str = "translationHistory";

const RECORD_SEPARATOR: &str = " -> ";

/// A successful translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    pub original_text: String,
    pub translated_text: String,
}

impl TranslationResult {
    pub fn new(original_text: &str, translated_text: &str) -> Self {
        Self {
            original_text: original_text.to_string(),
            translated_text: translated_text.to_string(),
        }
    }

    /// The single history line for this result
    pub fn to_record(&self) -> String {
        format!(
            "{}{}{}",
            single_line(&self.original_text),
            RECORD_SEPARATOR,
            single_line(&self.translated_text)
        )
    }
}

// A record must never span lines or `list` would split it.
fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

pub struct HistoryStore {
    settings: Box<dyn SettingsStore>,
}

impl HistoryStore {
    pub fn new(settings: Box<dyn SettingsStore>) -> Self {
        Self { settings }
    }

    /// The persisted blob, empty when there is no history
    pub fn raw(&self) -> Result<String> {
        Ok(self.settings.get(HISTORY_KEY)?.unwrap_or_default())
    }

    pub fn append(&mut self, result: &TranslationResult) -> Result<()> {
        let mut blob = self.raw()?;
        if !blob.is_empty() {
            blob.push('\n');
        }
        blob.push_str(&result.to_record());

        self.settings.set(HISTORY_KEY, &blob)
    }

    /// History lines, oldest first
    pub fn list(&self) -> Result<Vec<String>> {
        let blob = self.raw()?;
        if blob.is_empty() {
            return Ok(Vec::new());
        }
        Ok(blob.split('\n').map(str::to_string).collect())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.settings.set(HISTORY_KEY, "")
    }
}
