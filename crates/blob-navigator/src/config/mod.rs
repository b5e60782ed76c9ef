//! Viewer settings.
//!
//! Settings are split into one file per category. [`ViewerSettings`]
//! aggregates all categories and merges partial JSON payloads or TOML files
//! into the defaults.

pub(crate) mod blame;
pub(crate) mod decorations;
pub(crate) mod logging;
pub(crate) mod notices;
pub(crate) mod prefetch;
pub(crate) mod schema;

use std::{collections::HashMap, path::Path};

use blame::BlameSettingsPatch;
pub use blame::{
    BlameSettings, MAX_MESSAGE_MAX_LENGTH, MAX_NAME_MAX_LENGTH, MIN_MESSAGE_MAX_LENGTH, MIN_NAME_MAX_LENGTH,
};
use decorations::DecorationSettingsPatch;
pub use decorations::{DecorationSettings, MAX_OVERSCAN_LINES};
use logging::LoggingSettingsPatch;
pub use logging::{LogLevel, LoggingSettings};
use notices::NoticeSettingsPatch;
pub use notices::{MAX_NOTICE_DURATION_MS, MIN_NOTICE_DURATION_MS, NoticeSettings};
use prefetch::PrefetchSettingsPatch;
pub use prefetch::{MAX_PREFETCH_DEBOUNCE_MS, PrefetchSettings};
pub use schema::{SchemaField, SchemaType, generate_configuration_markdown, schema_fields};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

pub const SETTINGS_SECTION_KEY: &str = "blob-navigator";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML settings: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON settings: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewerSettings {
    pub prefetch: PrefetchSettings,
    pub blame: BlameSettings,
    pub notices: NoticeSettings,
    pub decorations: DecorationSettings,
    pub logging: LoggingSettings,
}

impl ViewerSettings {
    pub fn from_payload(payload: Option<&Value>) -> Self {
        let mut settings = Self::default();
        if let Some(payload) = payload {
            settings = settings.merged_with_payload(payload);
        }
        settings
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let payload: Value = serde_json::from_str(json)?;
        Ok(Self::from_payload(Some(&payload)))
    }

    pub fn from_toml(source: &str) -> Result<Self, SettingsError> {
        let table: toml::Value = toml::from_str(source)?;
        let payload = serde_json::to_value(table)?;
        Ok(Self::from_payload(Some(&payload)))
    }

    /// Load a `.json` or `.toml` settings file, chosen by extension.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let source = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&source),
            _ => Self::from_toml(&source),
        }
    }

    pub fn merged_with_payload(
        &self,
        payload: &Value,
    ) -> Self {
        let mut merged = self.clone();

        for candidate in payload_candidates(payload) {
            match serde_json::from_value::<ViewerSettingsPatch>(candidate.clone()) {
                Ok(patch) => merged.apply_patch(patch),
                Err(error) => warn!("[settings] ignoring invalid settings payload: {error}"),
            }
        }

        merged.normalize();
        merged
    }

    fn apply_patch(
        &mut self,
        patch: ViewerSettingsPatch,
    ) {
        if let Some(p) = patch.prefetch {
            self.prefetch.apply_patch(p);
        }
        if let Some(p) = patch.blame {
            self.blame.apply_patch(p);
        }
        if let Some(p) = patch.notices {
            self.notices.apply_patch(p);
        }
        if let Some(p) = patch.decorations {
            self.decorations.apply_patch(p);
        }
        if let Some(p) = patch.logging {
            self.logging.apply_patch(p);
        }
    }

    fn normalize(&mut self) {
        self.prefetch.normalize();
        self.blame.normalize();
        self.notices.normalize();
        self.decorations.normalize();
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct ViewerSettingsPatch {
    prefetch: Option<PrefetchSettingsPatch>,
    blame: Option<BlameSettingsPatch>,
    notices: Option<NoticeSettingsPatch>,
    decorations: Option<DecorationSettingsPatch>,
    logging: Option<LoggingSettingsPatch>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

fn payload_candidates(payload: &Value) -> Vec<Value> {
    let mut candidates = Vec::new();
    candidates.push(payload.clone());
    if let Some(scoped) = payload.get(SETTINGS_SECTION_KEY) {
        candidates.push(scoped.clone());
    }
    candidates
}

#[cfg(test)]
#[path = "../../tests/src/config/settings_tests.rs"]
mod tests;
