use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

pub const MAX_OVERSCAN_LINES: u32 = 1_000;

#[derive(Debug, Clone, PartialEq)]
pub struct DecorationSettings {
    /// Lines rendered above and below the viewport, so short scrolls reuse
    /// the cached overlay.
    pub overscan_lines: u32,
}

impl Default for DecorationSettings {
    fn default() -> Self {
        Self {
            overscan_lines: 50,
        }
    }
}

impl DecorationSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: DecorationSettingsPatch,
    ) {
        if let Some(v) = patch.overscan_lines {
            self.overscan_lines = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.overscan_lines = self.overscan_lines.min(MAX_OVERSCAN_LINES);
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct DecorationSettingsPatch {
    pub(crate) overscan_lines: Option<u32>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}
