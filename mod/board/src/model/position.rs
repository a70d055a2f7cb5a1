use serde::{Deserialize, Serialize};

use openjobs_sql::Value;

/// An open position at an organization. `id` is store-assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: i64,
    pub title: String,
    pub salary: Option<i64>,
    /// Fractional equity share, at most 1.0.
    pub equity: Option<f64>,
    pub organization_handle: String,
}

/// Position as nested under its organization in a single-record fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSummary {
    pub id: i64,
    pub title: String,
    pub salary: Option<i64>,
    pub equity: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewPosition {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i64>,
    #[serde(default)]
    pub equity: Option<f64>,
    pub organization_handle: String,
}

/// Sparse field map for partial update. Public names equal column names
/// for positions, so the translation table is empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PositionPatch {
    pub title: Option<String>,
    pub salary: Option<i64>,
    pub equity: Option<f64>,
}

impl PositionPatch {
    pub(crate) fn fields(&self) -> Vec<(&'static str, Value)> {
        let mut fields = Vec::new();
        if let Some(ref title) = self.title {
            fields.push(("title", Value::Text(title.clone())));
        }
        if let Some(salary) = self.salary {
            fields.push(("salary", Value::Integer(salary)));
        }
        if let Some(equity) = self.equity {
            fields.push(("equity", Value::Real(equity)));
        }
        fields
    }
}

/// Optional search filters for positions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PositionFilter {
    pub min_salary: Option<i64>,
    /// `Some(true)` keeps only positions with equity above zero;
    /// `Some(false)` and `None` filter nothing.
    pub has_equity: Option<bool>,
    /// Substring match on the title, case-insensitive.
    pub title: Option<String>,
}
