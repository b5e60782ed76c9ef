use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::{
    blame::{format_date_for_blame, recency_color, truncate},
    config::BlameSettings,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlameUser {
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default, rename = "avatarURL")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlamePerson {
    #[serde(default)]
    pub email: String,
    pub display_name: String,
    #[serde(default, rename = "avatarURL")]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub user: Option<BlameUser>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlameAuthor {
    pub person: BlamePerson,
    /// RFC 3339 commit date.
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlameCommit {
    pub url: String,
}

/// One blame hunk as returned by the blame service. `start_line` is 1-based
/// and inclusive, `end_line` is 1-based and exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlameHunkData {
    pub start_line: u32,
    pub end_line: u32,
    pub author: BlameAuthor,
    pub message: String,
    pub rev: String,
    pub commit: BlameCommit,
}

impl BlameHunkData {
    pub fn commit_date(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.author.date).ok().map(|date| date.with_timezone(&Utc))
    }

    /// Zero-based line the hunk's annotation is attached to.
    pub fn first_line(&self) -> u32 {
        self.start_line.saturating_sub(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlameDisplayInfo {
    pub display_name: String,
    /// `"(login) "` when the author has an account, otherwise empty.
    pub username: String,
    pub date_string: String,
    pub timestamp_string: String,
    pub link_url: String,
    pub message: String,
    pub commit_date: Option<DateTime<Utc>>,
    /// Ramp colour of the gutter bar.
    pub recency_color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlameHunk {
    pub data: BlameHunkData,
    pub display: BlameDisplayInfo,
}

impl BlameHunk {
    pub fn new(
        data: BlameHunkData,
        settings: &BlameSettings,
        now: DateTime<Utc>,
    ) -> Self {
        let display = display_info(&data, settings, now);
        Self {
            data,
            display,
        }
    }
}

fn display_info(
    data: &BlameHunkData,
    settings: &BlameSettings,
    now: DateTime<Utc>,
) -> BlameDisplayInfo {
    let person = &data.author.person;
    let commit_date = data.commit_date();
    if commit_date.is_none() {
        debug!("[blame] unparseable commit date {:?} for {}", data.author.date, data.rev);
    }

    BlameDisplayInfo {
        display_name: truncate(&person.display_name, settings.name_max_length),
        username: person.user.as_ref().map(|user| format!("({}) ", user.username)).unwrap_or_default(),
        date_string: commit_date.map(|date| format_date_for_blame(date, now)).unwrap_or_default(),
        timestamp_string: commit_date
            .map(|date| date.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string())
            .unwrap_or_default(),
        link_url: link_url(&settings.base_url, &data.commit.url),
        message: truncate(&data.message, settings.message_max_length),
        commit_date,
        recency_color: recency_color(commit_date, None, now),
    }
}

fn link_url(
    base_url: &str,
    commit_url: &str,
) -> String {
    match Url::parse(base_url).and_then(|base| base.join(commit_url)) {
        Ok(url) => url.to_string(),
        Err(error) => {
            debug!("[blame] cannot resolve commit url {commit_url:?} against {base_url:?}: {error}");
            commit_url.to_string()
        },
    }
}

/// Attach display fields computed for `now` to fetched hunks.
pub fn display_hunks(
    hunks: &[BlameHunkData],
    settings: &BlameSettings,
    now: DateTime<Utc>,
) -> Vec<BlameHunk> {
    hunks.iter().cloned().map(|data| BlameHunk::new(data, settings, now)).collect()
}

#[cfg(test)]
#[path = "../../tests/src/blame/hunk_tests.rs"]
mod tests;
