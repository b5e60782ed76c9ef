use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

pub const MAX_PREFETCH_DEBOUNCE_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq)]
pub struct PrefetchSettings {
    /// Resolve definition links for the visible viewport in the background.
    pub enable: bool,
    pub debounce_ms: u64,
}

impl Default for PrefetchSettings {
    fn default() -> Self {
        Self {
            enable: true,
            debounce_ms: 200,
        }
    }
}

impl PrefetchSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: PrefetchSettingsPatch,
    ) {
        if let Some(v) = patch.enable {
            self.enable = v;
        }
        if let Some(v) = patch.debounce_ms {
            self.debounce_ms = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.debounce_ms = self.debounce_ms.min(MAX_PREFETCH_DEBOUNCE_MS);
    }

    pub fn debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct PrefetchSettingsPatch {
    pub(crate) enable: Option<bool>,
    pub(crate) debounce_ms: Option<u64>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}
