//! Breadcrumb payload as recorded by an error-reporting client.
//!
//! The list core treats this as opaque row data; only the cell renderers in
//! `view::cells` look inside it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Kind of event a breadcrumb records. Drives the icon in the Type column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreadcrumbType {
    /// Generic breadcrumb.
    #[default]
    Default,
    /// Outgoing HTTP request.
    Http,
    /// Route / page change.
    Navigation,
    /// Error logged before the reported one.
    Error,
    /// Captured exception.
    Exception,
    /// Warning.
    Warning,
    /// Debug output.
    Debug,
    /// Informational output.
    Info,
    /// User interaction.
    User,
    /// UI event (click, key press).
    Ui,
    /// Database query.
    Query,
    /// System event.
    System,
    /// Session lifecycle.
    Session,
    /// Transaction boundary.
    Transaction,
    /// Any type this viewer does not know about.
    #[serde(other)]
    Unknown,
}

impl BreadcrumbType {
    /// Whether rows of this type are highlighted as errors.
    pub fn is_error(self) -> bool {
        matches!(self, BreadcrumbType::Error | BreadcrumbType::Exception)
    }
}

/// Severity of a breadcrumb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Unrecoverable failure.
    Fatal,
    /// Error.
    Error,
    /// Warning.
    Warning,
    /// Informational.
    #[default]
    Info,
    /// Debug.
    Debug,
    /// Missing or unrecognized level.
    #[serde(other)]
    Undefined,
}

impl Level {
    /// Lowercase label shown in the Level column.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Fatal => "fatal",
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Info => "info",
            Level::Debug => "debug",
            Level::Undefined => "undefined",
        }
    }
}

/// One recorded breadcrumb.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Breadcrumb {
    /// Breadcrumb kind (`type` on the wire).
    #[serde(rename = "type", default)]
    pub kind: BreadcrumbType,
    /// Free-form category such as `console`, `xhr` or `ui.click`.
    #[serde(default)]
    pub category: Option<String>,
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Structured payload.
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
    /// Severity.
    #[serde(default)]
    pub level: Level,
    /// When the breadcrumb was recorded. Accepts RFC 3339 strings or epoch seconds.
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Id of the event this breadcrumb links to, if any.
    #[serde(default)]
    pub event_id: Option<String>,
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(raw)) => DateTime::parse_from_rfc3339(&raw)
            .map(|ts| Some(ts.with_timezone(&Utc)))
            .map_err(|e| D::Error::custom(format!("invalid timestamp '{raw}': {e}"))),
        Some(Value::Number(n)) => {
            let secs = n
                .as_f64()
                .ok_or_else(|| D::Error::custom(format!("invalid timestamp {n}")))?;
            let whole = secs.trunc() as i64;
            let nanos = ((secs - secs.trunc()) * 1_000_000_000.0).round() as u32;
            DateTime::from_timestamp(whole, nanos.min(999_999_999))
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {n}")))
        }
        Some(other) => Err(D::Error::custom(format!(
            "timestamp must be a string or number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_breadcrumb() {
        let raw = r#"{"type":"http","category":"xhr","message":null,
            "data":{"method":"GET","url":"/api/0/","status_code":200},
            "level":"info","timestamp":"2020-05-01T10:00:00Z","event_id":null}"#;
        let crumb: Breadcrumb = serde_json::from_str(raw).unwrap();
        assert_eq!(crumb.kind, BreadcrumbType::Http);
        assert_eq!(crumb.category.as_deref(), Some("xhr"));
        assert_eq!(crumb.level, Level::Info);
        assert_eq!(
            crumb.data.as_ref().and_then(|d| d.get("method")),
            Some(&Value::String("GET".to_string()))
        );
        assert!(crumb.timestamp.is_some());
    }

    #[test]
    fn missing_fields_use_defaults() {
        let crumb: Breadcrumb = serde_json::from_str("{}").unwrap();
        assert_eq!(crumb.kind, BreadcrumbType::Default);
        assert_eq!(crumb.level, Level::Info);
        assert_eq!(crumb.category, None);
        assert_eq!(crumb.timestamp, None);
    }

    #[test]
    fn unknown_type_and_level_map_to_fallbacks() {
        let crumb: Breadcrumb =
            serde_json::from_str(r#"{"type":"telepathy","level":"loud"}"#).unwrap();
        assert_eq!(crumb.kind, BreadcrumbType::Unknown);
        assert_eq!(crumb.level, Level::Undefined);
    }

    #[test]
    fn epoch_seconds_timestamp_is_accepted() {
        let crumb: Breadcrumb = serde_json::from_str(r#"{"timestamp":1588327200.5}"#).unwrap();
        let ts = crumb.timestamp.unwrap();
        assert_eq!(ts.timestamp(), 1_588_327_200);
        assert_eq!(ts.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn garbage_timestamp_is_rejected() {
        let result: Result<Breadcrumb, _> = serde_json::from_str(r#"{"timestamp":"yesterday"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn error_types_are_flagged() {
        assert!(BreadcrumbType::Error.is_error());
        assert!(BreadcrumbType::Exception.is_error());
        assert!(!BreadcrumbType::Http.is_error());
    }
}
