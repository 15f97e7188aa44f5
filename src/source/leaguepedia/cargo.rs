//! `action=cargoquery` request building and response envelopes.

use serde::Deserialize;
use serde::de::DeserializeOwned;

/// One Cargo query, minus paging. Paging parameters are added per request
/// by [`CargoQuery::params`].
#[derive(Debug, Clone, Default)]
pub(super) struct CargoQuery {
    tables: String,
    fields: String,
    where_clause: Option<String>,
    join_on: Option<String>,
    group_by: Option<String>,
    order_by: Option<String>,
}

impl CargoQuery {
    pub fn new<S: AsRef<str>>(tables: impl Into<String>, fields: &[S]) -> Self {
        Self {
            tables: tables.into(),
            fields: fields.iter().map(|f| f.as_ref()).collect::<Vec<&str>>().join(","),
            ..Self::default()
        }
    }

    pub fn filter(mut self, clause: impl Into<String>) -> Self {
        self.where_clause = Some(clause.into());
        self
    }

    pub fn join_on(mut self, join: impl Into<String>) -> Self {
        self.join_on = Some(join.into());
        self
    }

    pub fn group_by(mut self, field: impl Into<String>) -> Self {
        self.group_by = Some(field.into());
        self
    }

    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(field.into());
        self
    }

    pub fn tables(&self) -> &str {
        &self.tables
    }

    /// Full query-string parameters for one page.
    pub fn params(&self, limit: u32, offset: usize) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("action", "cargoquery".to_string()),
            ("format", "json".to_string()),
            ("tables", self.tables.clone()),
            ("fields", self.fields.clone()),
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ];
        let optional = [
            ("where", &self.where_clause),
            ("join_on", &self.join_on),
            ("group_by", &self.group_by),
            ("order_by", &self.order_by),
        ];
        params.extend(
            optional
                .into_iter()
                .filter_map(|(key, value)| value.as_ref().map(|v| (key, v.clone()))),
        );
        params
    }
}

/// Quote a string literal for a Cargo `where` clause.
pub(super) fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

// ── Response envelopes ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
pub(super) struct CargoResponse<T> {
    #[serde(default = "Vec::new")]
    pub cargoquery: Vec<CargoRow<T>>,
}

#[derive(Debug, Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
pub(super) struct CargoRow<T> {
    pub title: T,
}

/// MediaWiki error envelope: `{"error": {"code": "...", "info": "..."}}`.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub info: String,
}
