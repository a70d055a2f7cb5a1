//! Position search assembly and data access.

use openjobs_core::ServiceError;
use openjobs_sql::{Row, Value};

use crate::model::{NewPosition, Position, PositionFilter, PositionPatch};
use crate::service::organization::required_str;
use crate::service::{insert_error, storage_error, update_set, BoardService};

const RETURNING: &str = "id, title, salary, equity, organization_handle";

/// Public names equal column names for positions.
const COLUMNS: &[(&str, &str)] = &[];

/// Assemble the filtered search statement for positions.
///
/// Canonical filter order is bounds, then text, then boolean. The
/// equity filter is a fixed predicate with no placeholder and no value,
/// emitted only for `hasEquity=true` — false and absent filter nothing.
pub fn search_query(filter: &PositionFilter) -> Result<(String, Vec<Value>), ServiceError> {
    let mut sql = String::from(
        "SELECT id, title, salary, equity, organization_handle FROM positions",
    );
    let mut predicates: Vec<String> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(min) = filter.min_salary {
        values.push(Value::Integer(min));
        predicates.push(format!("salary >= ${}", values.len()));
    }
    if let Some(ref title) = filter.title {
        values.push(Value::Text(format!("%{title}%")));
        predicates.push(format!("title LIKE ${}", values.len()));
    }
    if filter.has_equity == Some(true) {
        predicates.push("equity > 0".to_string());
    }

    if !predicates.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&predicates.join(" AND "));
    }
    sql.push_str(" ORDER BY organization_handle");

    Ok((sql, values))
}

impl BoardService {
    /// Create a position. No pre-insert probe: the id is store-assigned
    /// and a bad organization handle surfaces as a store constraint
    /// failure.
    pub fn create_position(&self, new: &NewPosition) -> Result<Position, ServiceError> {
        let sql = format!(
            "INSERT INTO positions (title, salary, equity, organization_handle) \
             VALUES ($1, $2, $3, $4) RETURNING {RETURNING}"
        );
        let rows = self
            .sql
            .query(
                &sql,
                &[
                    Value::Text(new.title.clone()),
                    match new.salary {
                        Some(s) => Value::Integer(s),
                        None => Value::Null,
                    },
                    match new.equity {
                        Some(e) => Value::Real(e),
                        None => Value::Null,
                    },
                    Value::Text(new.organization_handle.clone()),
                ],
            )
            .map_err(insert_error)?;

        let row = rows
            .first()
            .ok_or_else(|| ServiceError::Storage("insert returned no row".into()))?;
        row_to_position(row)
    }

    /// List positions matching the filter, ordered by organization.
    pub fn list_positions(&self, filter: &PositionFilter) -> Result<Vec<Position>, ServiceError> {
        let (sql, values) = search_query(filter)?;
        let rows = self.sql.query(&sql, &values).map_err(storage_error)?;
        rows.iter().map(row_to_position).collect()
    }

    /// Partial update by id.
    pub fn update_position(
        &self,
        id: i64,
        patch: &PositionPatch,
    ) -> Result<Position, ServiceError> {
        let (set, mut values) = update_set(&patch.fields(), COLUMNS)?;
        values.push(Value::Integer(id));

        let sql = format!(
            "UPDATE positions SET {set} WHERE id = ${} RETURNING {RETURNING}",
            values.len()
        );
        let rows = self.sql.query(&sql, &values).map_err(storage_error)?;
        let row = rows
            .first()
            .ok_or_else(|| ServiceError::NotFound(format!("position {id} not found")))?;
        row_to_position(row)
    }

    /// Delete a position by id.
    pub fn remove_position(&self, id: i64) -> Result<(), ServiceError> {
        let rows = self
            .sql
            .query(
                "DELETE FROM positions WHERE id = $1 RETURNING id",
                &[Value::Integer(id)],
            )
            .map_err(storage_error)?;
        if rows.is_empty() {
            return Err(ServiceError::NotFound(format!("position {id} not found")));
        }
        Ok(())
    }
}

fn row_to_position(row: &Row) -> Result<Position, ServiceError> {
    Ok(Position {
        id: row
            .get_i64("id")
            .ok_or_else(|| ServiceError::Storage("missing id column".into()))?,
        title: required_str(row, "title")?,
        salary: row.get_i64("salary"),
        equity: row.get_f64("equity"),
        organization_handle: required_str(row, "organization_handle")?,
    })
}
