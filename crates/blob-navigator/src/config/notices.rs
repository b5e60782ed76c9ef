use std::{collections::HashMap, time::Duration};

use serde::Deserialize;
use serde_json::Value;

pub const MIN_NOTICE_DURATION_MS: u64 = 250;
pub const MAX_NOTICE_DURATION_MS: u64 = 30_000;

#[derive(Debug, Clone, PartialEq)]
pub struct NoticeSettings {
    pub duration_ms: u64,
}

impl Default for NoticeSettings {
    fn default() -> Self {
        Self {
            duration_ms: 2_000,
        }
    }
}

impl NoticeSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: NoticeSettingsPatch,
    ) {
        if let Some(v) = patch.duration_ms {
            self.duration_ms = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.duration_ms = self.duration_ms.clamp(MIN_NOTICE_DURATION_MS, MAX_NOTICE_DURATION_MS);
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct NoticeSettingsPatch {
    pub(crate) duration_ms: Option<u64>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}
