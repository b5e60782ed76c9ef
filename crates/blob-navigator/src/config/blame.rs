use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

pub const MIN_NAME_MAX_LENGTH: usize = 4;
pub const MAX_NAME_MAX_LENGTH: usize = 200;
pub const MIN_MESSAGE_MAX_LENGTH: usize = 4;
pub const MAX_MESSAGE_MAX_LENGTH: usize = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct BlameSettings {
    pub visible: bool,
    /// Site root that relative commit URLs are resolved against.
    pub base_url: String,
    pub name_max_length: usize,
    pub message_max_length: usize,
}

impl Default for BlameSettings {
    fn default() -> Self {
        Self {
            visible: false,
            base_url: "https://sourcegraph.com".to_string(),
            name_max_length: 25,
            message_max_length: 45,
        }
    }
}

impl BlameSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: BlameSettingsPatch,
    ) {
        if let Some(v) = patch.visible {
            self.visible = v;
        }
        if let Some(v) = patch.base_url {
            self.base_url = v;
        }
        if let Some(v) = patch.name_max_length {
            self.name_max_length = v;
        }
        if let Some(v) = patch.message_max_length {
            self.message_max_length = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.name_max_length = self.name_max_length.clamp(MIN_NAME_MAX_LENGTH, MAX_NAME_MAX_LENGTH);
        self.message_max_length = self.message_max_length.clamp(MIN_MESSAGE_MAX_LENGTH, MAX_MESSAGE_MAX_LENGTH);
        let trimmed = self.base_url.trim();
        self.base_url = if trimmed.is_empty() {
            BlameSettings::default().base_url
        } else {
            trimmed.to_string()
        };
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct BlameSettingsPatch {
    pub(crate) visible: Option<bool>,
    pub(crate) base_url: Option<String>,
    pub(crate) name_max_length: Option<usize>,
    pub(crate) message_max_length: Option<usize>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}
