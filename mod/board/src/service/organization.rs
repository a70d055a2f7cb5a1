//! Organization search assembly and data access.

use openjobs_core::ServiceError;
use openjobs_sql::{Row, Value};

use crate::model::{
    NewOrganization, Organization, OrganizationFilter, OrganizationPatch, PositionSummary,
};
use crate::service::{insert_error, storage_error, update_set, BoardService};

const RETURNING: &str = "handle, name, description, num_employees, logo_url";

/// Public field name → column name, for the fields where they differ.
const COLUMNS: &[(&str, &str)] = &[
    ("numEmployees", "num_employees"),
    ("logoUrl", "logo_url"),
];

/// Assemble the filtered search statement for organizations.
///
/// Pure: no I/O. Filters are appended in a fixed canonical order
/// (bounds, then text) so placeholder numbering is reproducible.
pub fn search_query(filter: &OrganizationFilter) -> Result<(String, Vec<Value>), ServiceError> {
    if let (Some(min), Some(max)) = (filter.min_employees, filter.max_employees) {
        // Equal bounds are a valid zero-or-one-row query.
        if min > max {
            return Err(ServiceError::InvalidFilter(
                "minEmployees cannot be greater than maxEmployees".into(),
            ));
        }
    }

    let mut sql = String::from(
        "SELECT handle, name, description, num_employees, logo_url FROM organizations",
    );
    let mut predicates: Vec<String> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(min) = filter.min_employees {
        values.push(Value::Integer(min));
        predicates.push(format!("num_employees >= ${}", values.len()));
    }
    if let Some(max) = filter.max_employees {
        values.push(Value::Integer(max));
        predicates.push(format!("num_employees <= ${}", values.len()));
    }
    if let Some(ref name) = filter.name {
        values.push(Value::Text(format!("%{name}%")));
        predicates.push(format!("name LIKE ${}", values.len()));
    }

    if !predicates.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&predicates.join(" AND "));
    }
    sql.push_str(" ORDER BY name");

    Ok((sql, values))
}

impl BoardService {
    /// Create an organization. The handle is probed before insert so a
    /// duplicate fails cleanly; a lost race still maps via the store's
    /// UNIQUE constraint.
    pub fn create_organization(
        &self,
        new: &NewOrganization,
    ) -> Result<Organization, ServiceError> {
        let probe = self
            .sql
            .query(
                "SELECT handle FROM organizations WHERE handle = $1",
                &[Value::Text(new.handle.clone())],
            )
            .map_err(storage_error)?;
        if !probe.is_empty() {
            return Err(ServiceError::DuplicateKey(format!(
                "organization '{}' already exists",
                new.handle
            )));
        }

        let sql = format!(
            "INSERT INTO organizations (handle, name, description, num_employees, logo_url) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {RETURNING}"
        );
        let rows = self
            .sql
            .query(
                &sql,
                &[
                    Value::Text(new.handle.clone()),
                    Value::Text(new.name.clone()),
                    Value::Text(new.description.clone()),
                    opt_integer(new.num_employees),
                    opt_text(&new.logo_url),
                ],
            )
            .map_err(insert_error)?;

        let row = rows
            .first()
            .ok_or_else(|| ServiceError::Storage("insert returned no row".into()))?;
        row_to_organization(row)
    }

    /// List organizations matching the filter, ordered by name.
    pub fn list_organizations(
        &self,
        filter: &OrganizationFilter,
    ) -> Result<Vec<Organization>, ServiceError> {
        let (sql, values) = search_query(filter)?;
        let rows = self.sql.query(&sql, &values).map_err(storage_error)?;
        rows.iter().map(row_to_organization).collect()
    }

    /// Fetch one organization by handle, with its positions nested.
    ///
    /// Two independent statements, no cross-statement transaction: the
    /// nested list may reflect a position added or removed in between.
    pub fn get_organization(&self, handle: &str) -> Result<Organization, ServiceError> {
        let rows = self
            .sql
            .query(
                "SELECT handle, name, description, num_employees, logo_url \
                 FROM organizations WHERE handle = $1",
                &[Value::Text(handle.to_string())],
            )
            .map_err(storage_error)?;
        let row = rows
            .first()
            .ok_or_else(|| ServiceError::NotFound(format!("organization '{handle}' not found")))?;
        let mut org = row_to_organization(row)?;

        let rows = self
            .sql
            .query(
                "SELECT id, title, salary, equity FROM positions \
                 WHERE organization_handle = $1 ORDER BY id",
                &[Value::Text(handle.to_string())],
            )
            .map_err(storage_error)?;
        org.positions = Some(
            rows.iter()
                .map(row_to_summary)
                .collect::<Result<Vec<_>, _>>()?,
        );

        Ok(org)
    }

    /// Partial update: only the fields present in the patch change.
    pub fn update_organization(
        &self,
        handle: &str,
        patch: &OrganizationPatch,
    ) -> Result<Organization, ServiceError> {
        let (set, mut values) = update_set(&patch.fields(), COLUMNS)?;
        values.push(Value::Text(handle.to_string()));

        let sql = format!(
            "UPDATE organizations SET {set} WHERE handle = ${} RETURNING {RETURNING}",
            values.len()
        );
        let rows = self.sql.query(&sql, &values).map_err(storage_error)?;
        let row = rows
            .first()
            .ok_or_else(|| ServiceError::NotFound(format!("organization '{handle}' not found")))?;
        row_to_organization(row)
    }

    /// Delete an organization; its positions cascade.
    pub fn remove_organization(&self, handle: &str) -> Result<(), ServiceError> {
        let rows = self
            .sql
            .query(
                "DELETE FROM organizations WHERE handle = $1 RETURNING handle",
                &[Value::Text(handle.to_string())],
            )
            .map_err(storage_error)?;
        if rows.is_empty() {
            return Err(ServiceError::NotFound(format!(
                "organization '{handle}' not found"
            )));
        }
        Ok(())
    }
}

fn opt_text(v: &Option<String>) -> Value {
    match v {
        Some(s) => Value::Text(s.clone()),
        None => Value::Null,
    }
}

fn opt_integer(v: Option<i64>) -> Value {
    match v {
        Some(i) => Value::Integer(i),
        None => Value::Null,
    }
}

fn row_to_organization(row: &Row) -> Result<Organization, ServiceError> {
    Ok(Organization {
        handle: required_str(row, "handle")?,
        name: required_str(row, "name")?,
        description: required_str(row, "description")?,
        num_employees: row.get_i64("num_employees"),
        logo_url: row.get_str("logo_url").map(str::to_string),
        positions: None,
    })
}

fn row_to_summary(row: &Row) -> Result<PositionSummary, ServiceError> {
    Ok(PositionSummary {
        id: row
            .get_i64("id")
            .ok_or_else(|| ServiceError::Storage("missing id column".into()))?,
        title: required_str(row, "title")?,
        salary: row.get_i64("salary"),
        equity: row.get_f64("equity"),
    })
}

pub(crate) fn required_str(row: &Row, name: &str) -> Result<String, ServiceError> {
    row.get_str(name)
        .map(str::to_string)
        .ok_or_else(|| ServiceError::Storage(format!("missing {name} column")))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use openjobs_sql::{SqlStore, SqliteStore};

    use crate::model::NewPosition;

    fn filter(
        min: Option<i64>,
        max: Option<i64>,
        name: Option<&str>,
    ) -> OrganizationFilter {
        OrganizationFilter {
            min_employees: min,
            max_employees: max,
            name: name.map(str::to_string),
        }
    }

    #[test]
    fn no_filters_means_no_where() {
        let (sql, values) = search_query(&filter(None, None, None)).unwrap();
        assert_eq!(
            sql,
            "SELECT handle, name, description, num_employees, logo_url \
             FROM organizations ORDER BY name"
        );
        assert!(values.is_empty());
    }

    #[test]
    fn bounds_come_before_text_filters() {
        let (sql, values) = search_query(&filter(Some(10), None, Some("tech"))).unwrap();
        assert!(sql.ends_with(
            "WHERE num_employees >= $1 AND name LIKE $2 ORDER BY name"
        ));
        assert_eq!(
            values,
            vec![Value::Integer(10), Value::Text("%tech%".into())]
        );
    }

    #[test]
    fn all_three_filters_number_in_canonical_order() {
        let (sql, values) = search_query(&filter(Some(1), Some(50), Some("net"))).unwrap();
        assert!(sql.contains(
            "WHERE num_employees >= $1 AND num_employees <= $2 AND name LIKE $3"
        ));
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn min_above_max_is_invalid_filter() {
        let err = search_query(&filter(Some(10), Some(5), None)).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidFilter(_)));
    }

    #[test]
    fn equal_bounds_are_valid() {
        let (sql, values) = search_query(&filter(Some(7), Some(7), None)).unwrap();
        assert!(sql.contains("num_employees >= $1 AND num_employees <= $2"));
        assert_eq!(values, vec![Value::Integer(7), Value::Integer(7)]);
    }

    #[test]
    fn assembly_is_deterministic() {
        let f = filter(Some(3), Some(9), Some("co"));
        let first = search_query(&f).unwrap();
        let second = search_query(&f).unwrap();
        assert_eq!(first.0, second.0);
        assert_eq!(first.1, second.1);
    }

    // ── Data access against an in-memory store ──

    fn test_service() -> BoardService {
        let sql: Arc<dyn SqlStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
        BoardService::new(sql).unwrap()
    }

    fn acme() -> NewOrganization {
        NewOrganization {
            handle: "acme".into(),
            name: "Acme Corp".into(),
            description: "Makers of everything".into(),
            num_employees: Some(100),
            logo_url: None,
        }
    }

    #[test]
    fn create_and_get() {
        let service = test_service();
        let created = service.create_organization(&acme()).unwrap();
        assert_eq!(created.handle, "acme");
        assert_eq!(created.num_employees, Some(100));
        assert_eq!(created.logo_url, None);

        let got = service.get_organization("acme").unwrap();
        assert_eq!(got.name, "Acme Corp");
    }

    #[test]
    fn duplicate_handle_is_rejected() {
        let service = test_service();
        service.create_organization(&acme()).unwrap();
        let err = service.create_organization(&acme()).unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateKey(_)));
    }

    #[test]
    fn get_missing_is_not_found() {
        let service = test_service();
        let err = service.get_organization("ghost").unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn get_nests_positions_and_distinguishes_empty() {
        let service = test_service();
        service.create_organization(&acme()).unwrap();

        // Present organization with zero positions: Some([]).
        let got = service.get_organization("acme").unwrap();
        assert!(got.positions.unwrap().is_empty());

        service
            .create_position(&NewPosition {
                title: "Engineer".into(),
                salary: Some(90000),
                equity: Some(0.01),
                organization_handle: "acme".into(),
            })
            .unwrap();

        let got = service.get_organization("acme").unwrap();
        let positions = got.positions.unwrap();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].title, "Engineer");
    }

    #[test]
    fn list_respects_filters() {
        let service = test_service();
        service.create_organization(&acme()).unwrap();
        service
            .create_organization(&NewOrganization {
                handle: "tiny".into(),
                name: "Tiny Tech".into(),
                description: "Small shop".into(),
                num_employees: Some(3),
                logo_url: None,
            })
            .unwrap();

        let all = service.list_organizations(&filter(None, None, None)).unwrap();
        assert_eq!(all.len(), 2);
        // ORDER BY name: Acme Corp before Tiny Tech.
        assert_eq!(all[0].handle, "acme");

        let big = service
            .list_organizations(&filter(Some(50), None, None))
            .unwrap();
        assert_eq!(big.len(), 1);
        assert_eq!(big[0].handle, "acme");

        let named = service
            .list_organizations(&filter(None, None, Some("tiny")))
            .unwrap();
        assert_eq!(named.len(), 1);
        assert_eq!(named[0].handle, "tiny");

        // Listed records never carry the nested positions.
        assert!(all[0].positions.is_none());
    }

    #[test]
    fn partial_update_changes_only_present_fields() {
        let service = test_service();
        service.create_organization(&acme()).unwrap();

        let updated = service
            .update_organization(
                "acme",
                &OrganizationPatch {
                    num_employees: Some(250),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.num_employees, Some(250));
        assert_eq!(updated.name, "Acme Corp");
        assert_eq!(updated.description, "Makers of everything");
    }

    #[test]
    fn update_missing_is_not_found_never_empty_success() {
        let service = test_service();
        let err = service
            .update_organization(
                "ghost",
                &OrganizationPatch {
                    name: Some("Ghost".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn empty_patch_is_rejected_before_the_store() {
        let service = test_service();
        service.create_organization(&acme()).unwrap();
        let err = service
            .update_organization("acme", &OrganizationPatch::default())
            .unwrap_err();
        assert!(matches!(err, ServiceError::NoFields(_)));
    }

    #[test]
    fn remove_deletes_and_cascades_to_positions() {
        let service = test_service();
        service.create_organization(&acme()).unwrap();
        service
            .create_position(&NewPosition {
                title: "Engineer".into(),
                salary: None,
                equity: None,
                organization_handle: "acme".into(),
            })
            .unwrap();

        service.remove_organization("acme").unwrap();
        assert!(matches!(
            service.get_organization("acme").unwrap_err(),
            ServiceError::NotFound(_)
        ));

        let positions = service.list_positions(&Default::default()).unwrap();
        assert!(positions.is_empty());
    }

    #[test]
    fn remove_missing_is_not_found() {
        let service = test_service();
        let err = service.remove_organization("ghost").unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
