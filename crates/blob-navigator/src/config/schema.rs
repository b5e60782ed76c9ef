use serde_json::Value;

use crate::config::{
    SETTINGS_SECTION_KEY,
    blame::{MAX_MESSAGE_MAX_LENGTH, MAX_NAME_MAX_LENGTH, MIN_MESSAGE_MAX_LENGTH, MIN_NAME_MAX_LENGTH},
    decorations::MAX_OVERSCAN_LINES,
    notices::{MAX_NOTICE_DURATION_MS, MIN_NOTICE_DURATION_MS},
    prefetch::MAX_PREFETCH_DEBOUNCE_MS,
};

/// One entry in the generated settings documentation.
#[derive(Debug, Clone)]
pub struct SchemaField {
    pub key: String,
    pub description: String,
    pub schema_type: SchemaType,
    pub default: Value,
}

#[derive(Debug, Clone)]
pub enum SchemaType {
    Bool,
    String,
    Integer {
        minimum: Option<i64>,
        maximum: Option<i64>,
    },
    StringEnum {
        values: Vec<&'static str>,
    },
}

impl SchemaType {
    fn describe(&self) -> String {
        match self {
            SchemaType::Bool => "boolean".to_string(),
            SchemaType::String => "string".to_string(),
            SchemaType::Integer {
                minimum,
                maximum,
            } => match (minimum, maximum) {
                (Some(min), Some(max)) => format!("integer, {min}..={max}"),
                (Some(min), None) => format!("integer, >= {min}"),
                (None, Some(max)) => format!("integer, <= {max}"),
                (None, None) => "integer".to_string(),
            },
            SchemaType::StringEnum {
                values,
            } => values.iter().map(|v| format!("`{v}`")).collect::<Vec<_>>().join(" | "),
        }
    }
}

impl SchemaField {
    pub fn to_markdown(&self) -> String {
        format!(
            "- `{SETTINGS_SECTION_KEY}.{}` ({}, default `{}`) - {}",
            self.key,
            self.schema_type.describe(),
            self.default,
            self.description
        )
    }
}

/// Return the full list of schema fields for every setting.
pub fn schema_fields() -> Vec<SchemaField> {
    vec![
        SchemaField {
            key: "prefetch.enable".into(),
            description: "Resolve go-to-definition links for visible tokens in the background.".into(),
            schema_type: SchemaType::Bool,
            default: Value::Bool(true),
        },
        SchemaField {
            key: "prefetch.debounceMs".into(),
            description: "Quiet period after the last viewport change before links are fetched.".into(),
            schema_type: SchemaType::Integer {
                minimum: Some(0),
                maximum: Some(MAX_PREFETCH_DEBOUNCE_MS as i64),
            },
            default: Value::Number(200.into()),
        },
        SchemaField {
            key: "blame.visible".into(),
            description: "Show git blame annotations next to each hunk.".into(),
            schema_type: SchemaType::Bool,
            default: Value::Bool(false),
        },
        SchemaField {
            key: "blame.baseUrl".into(),
            description: "Site root used to turn relative commit URLs into links.".into(),
            schema_type: SchemaType::String,
            default: Value::String("https://sourcegraph.com".into()),
        },
        SchemaField {
            key: "blame.nameMaxLength".into(),
            description: "Author names longer than this are truncated with `...`.".into(),
            schema_type: SchemaType::Integer {
                minimum: Some(MIN_NAME_MAX_LENGTH as i64),
                maximum: Some(MAX_NAME_MAX_LENGTH as i64),
            },
            default: Value::Number(25.into()),
        },
        SchemaField {
            key: "blame.messageMaxLength".into(),
            description: "Commit messages longer than this are truncated with `...`.".into(),
            schema_type: SchemaType::Integer {
                minimum: Some(MIN_MESSAGE_MAX_LENGTH as i64),
                maximum: Some(MAX_MESSAGE_MAX_LENGTH as i64),
            },
            default: Value::Number(45.into()),
        },
        SchemaField {
            key: "notices.durationMs".into(),
            description: "How long go-to-definition notices stay visible.".into(),
            schema_type: SchemaType::Integer {
                minimum: Some(MIN_NOTICE_DURATION_MS as i64),
                maximum: Some(MAX_NOTICE_DURATION_MS as i64),
            },
            default: Value::Number(2000.into()),
        },
        SchemaField {
            key: "decorations.overscanLines".into(),
            description: "Extra lines decorated above and below the viewport.".into(),
            schema_type: SchemaType::Integer {
                minimum: Some(0),
                maximum: Some(MAX_OVERSCAN_LINES as i64),
            },
            default: Value::Number(50.into()),
        },
        SchemaField {
            key: "logging.level".into(),
            description: "Minimum log level.".into(),
            schema_type: SchemaType::StringEnum {
                values: vec!["error", "warn", "info", "debug", "trace"],
            },
            default: Value::String("info".into()),
        },
    ]
}

/// Generate markdown documentation for all settings.
pub fn generate_configuration_markdown() -> String {
    let mut out = String::new();

    let mut current_section = String::new();
    for field in &schema_fields() {
        let section = field.key.split('.').next().unwrap_or("");
        if section != current_section {
            current_section = section.to_string();
            let title = match section {
                "prefetch" => "Prefetch",
                "blame" => "Blame",
                "notices" => "Notices",
                "decorations" => "Decorations",
                "logging" => "Logging",
                other => other,
            };
            out.push_str(&format!("\n## {title}\n\n"));
        }
        out.push_str(&field.to_markdown());
        out.push('\n');
    }

    out
}
