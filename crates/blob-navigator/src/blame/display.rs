use chrono::{DateTime, Datelike, Duration, Utc};

/// Recency ramp, oldest first.
pub const BLAME_COLORS: [&str; 10] = [
    "#001933", "#072c52", "#0e4277", "#0e4277", "#0d4781", "#125aa1", "#1e69b4", "#327dc7", "#448ed6", "#68aced",
];

const RECENT_WINDOW_DAYS: i64 = 30;

/// Date shown next to a blame hunk.
///
/// Commits from the last 30 days (and commits dated in the future) get a
/// relative distance such as `"5 minutes ago"`. Older commits show the
/// month and day, plus the year when it is not the current one.
pub fn format_date_for_blame(
    commit: DateTime<Utc>,
    now: DateTime<Utc>,
) -> String {
    if now.signed_duration_since(commit) < Duration::days(RECENT_WINDOW_DAYS) {
        return format_distance_strict(commit, now);
    }
    if commit.year() == now.year() {
        return commit.format("%b %-d").to_string();
    }
    commit.format("%b %-d, %Y").to_string()
}

/// Distance between two instants in the single largest unit that fits,
/// rounded to the nearest whole unit: `"1 day ago"`, `"in 3 hours"`.
pub fn format_distance_strict(
    date: DateTime<Utc>,
    now: DateTime<Utc>,
) -> String {
    let millis = now.signed_duration_since(date).num_milliseconds();
    let seconds = millis.unsigned_abs() as f64 / 1000.0;
    let minutes = seconds / 60.0;
    let hours = minutes / 60.0;
    let days = hours / 24.0;

    let (value, unit) = if seconds < 60.0 {
        (seconds, "second")
    } else if minutes < 60.0 {
        (minutes, "minute")
    } else if hours < 24.0 {
        (hours, "hour")
    } else if days < 30.0 {
        (days, "day")
    } else if days < 365.0 {
        (days / 30.0, "month")
    } else {
        (days / 365.0, "year")
    };

    let count = value.round() as u64;
    let plural = if count == 1 { "" } else { "s" };
    if date > now {
        format!("in {count} {unit}{plural}")
    } else {
        format!("{count} {unit}{plural} ago")
    }
}

/// Truncate to at most `max_chars` characters, ending with `"..."` when
/// anything was cut.
pub fn truncate(
    text: &str,
    max_chars: usize,
) -> String {
    const OMISSION: &str = "...";
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(OMISSION.len())).collect();
    format!("{kept}{OMISSION}")
}

/// Ramp colour for a commit, scaled between the repository's creation (at
/// least a year back) and `now`.
pub fn recency_color(
    commit: Option<DateTime<Utc>>,
    repo_created: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> &'static str {
    let Some(commit) = commit else {
        return BLAME_COLORS[0];
    };
    let created = repo_created.unwrap_or_else(|| now - Duration::days(3 * 365));
    let start = created.min(now - Duration::days(365));

    let span = (now - start).num_milliseconds() as f64;
    let age = (now - commit).num_milliseconds() as f64;
    let recency = if span > 0.0 { (age / span).clamp(0.0, 1.0) } else { 0.0 };

    let step = (recency * 10.0).ceil() as usize;
    let index = 10usize.saturating_sub(step).min(BLAME_COLORS.len() - 1);
    BLAME_COLORS[index]
}

#[cfg(test)]
#[path = "../../tests/src/blame/display_tests.rs"]
mod tests;
