use serde::{Deserialize, Serialize};

use openjobs_sql::Value;

/// An organization record. `positions` is populated only by the
/// single-record fetch (`Some`, possibly empty) and omitted from JSON
/// everywhere else.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Natural key, caller-assigned and immutable.
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i64>,
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positions: Option<Vec<super::PositionSummary>>,
}

/// Fully-specified field set for create.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewOrganization {
    pub handle: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub num_employees: Option<i64>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Sparse field map for partial update — present fields change, absent
/// fields are left untouched. The handle is immutable and not patchable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OrganizationPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub num_employees: Option<i64>,
    pub logo_url: Option<String>,
}

impl OrganizationPatch {
    /// Present fields as (public name, value) pairs, in declaration
    /// order. Public names are the closed set the SET-clause builder
    /// may splice — never raw request text.
    pub(crate) fn fields(&self) -> Vec<(&'static str, Value)> {
        let mut fields = Vec::new();
        if let Some(ref name) = self.name {
            fields.push(("name", Value::Text(name.clone())));
        }
        if let Some(ref description) = self.description {
            fields.push(("description", Value::Text(description.clone())));
        }
        if let Some(n) = self.num_employees {
            fields.push(("numEmployees", Value::Integer(n)));
        }
        if let Some(ref url) = self.logo_url {
            fields.push(("logoUrl", Value::Text(url.clone())));
        }
        fields
    }
}

/// Optional search filters for organizations.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OrganizationFilter {
    pub min_employees: Option<i64>,
    pub max_employees: Option<i64>,
    /// Substring match on the name, case-insensitive.
    pub name: Option<String>,
}
