//! Cargo value decoding.
//!
//! Cargo hands every field back as a string (or occasionally a bare number
//! or `null`), with blanks for missing values. These helpers turn that into
//! typed `Option`s; blanks and unparseable values both become `None`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Deserialize a Cargo cell into `Option<String>`, mapping `""` to `None`.
/// Bare JSON numbers and booleans are stringified.
pub(super) fn cell<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<serde_json::Value>::deserialize(de)?;
    Ok(match v {
        Some(serde_json::Value::String(s)) => text(&s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(if b { "1" } else { "0" }.to_string()),
        _ => None,
    })
}

pub(super) fn text(raw: &str) -> Option<String> {
    let s = raw.trim();
    if s.is_empty() { None } else { Some(s.to_string()) }
}

pub(super) fn flag(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|s| s.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "yes" | "true")
    )
}

/// Integer cell; tolerates thousands separators (`"12,345"`).
pub(super) fn int<T: std::str::FromStr>(raw: Option<&str>) -> Option<T> {
    let cleaned: String = raw?.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    cleaned.parse().ok()
}

/// `mm:ss` or `h:mm:ss` → seconds.
pub(super) fn duration_seconds(raw: Option<&str>) -> Option<u32> {
    let parts: Vec<u32> = raw?
        .trim()
        .split(':')
        .map(|p| p.parse().ok())
        .collect::<Option<_>>()?;
    match parts.as_slice() {
        [m, s] if *s < 60 => m.checked_mul(60)?.checked_add(*s),
        [h, m, s] if *m < 60 && *s < 60 => h.checked_mul(3600)?.checked_add(m * 60 + s),
        _ => None,
    }
}

/// `YYYY-MM-DD HH:MM:SS`, always UTC on the wiki.
pub(super) fn timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M"))
        .ok()
        .map(|dt| dt.and_utc())
}

pub(super) fn date(raw: Option<&str>) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw?.trim(), "%Y-%m-%d").ok()
}

/// List field (`List (;) of String` / `List (,) of String`).
pub(super) fn list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split([';', ','])
            .filter_map(text)
            .collect()
    })
    .unwrap_or_default()
}
