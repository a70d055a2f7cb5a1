pub mod organization;
pub mod position;
pub mod schema;

use std::sync::Arc;

use openjobs_core::ServiceError;
use openjobs_sql::{SqlError, SqlStore, Value};

/// Board service — data access for organizations and positions.
pub struct BoardService {
    pub(crate) sql: Arc<dyn SqlStore>,
}

impl BoardService {
    /// Create the service and initialise the schema.
    pub fn new(sql: Arc<dyn SqlStore>) -> Result<Self, ServiceError> {
        schema::init(sql.as_ref())?;
        Ok(Self { sql })
    }
}

/// Build a parameterized SET clause from a sparse field map.
///
/// `fields` is the (public name, value) pairs of a partial update, in a
/// fixed order; `columns` translates public names that differ from
/// their column name — any name absent from the table is used verbatim.
/// Returns the clause text (`"name"=$1, "num_employees"=$2`) and the
/// values in matching order.
///
/// Column names are spliced as literal text, which is safe only because
/// both inputs come from closed, developer-controlled enumerations
/// (see the patch types' `fields()`), never from raw request text.
pub fn update_set(
    fields: &[(&str, Value)],
    columns: &[(&str, &str)],
) -> Result<(String, Vec<Value>), ServiceError> {
    if fields.is_empty() {
        return Err(ServiceError::NoFields("no fields to update".into()));
    }

    let mut fragments = Vec::with_capacity(fields.len());
    let mut values = Vec::with_capacity(fields.len());

    for (i, (name, value)) in fields.iter().enumerate() {
        let column = columns
            .iter()
            .find(|(public, _)| public == name)
            .map(|(_, col)| *col)
            .unwrap_or(name);
        fragments.push(format!("\"{column}\"=${}", i + 1));
        values.push(value.clone());
    }

    Ok((fragments.join(", "), values))
}

/// Map a store failure on insert: a UNIQUE-constraint violation is a
/// natural-key collision, anything else is infrastructure.
pub(crate) fn insert_error(e: SqlError) -> ServiceError {
    let msg = e.to_string();
    if msg.contains("UNIQUE constraint") {
        ServiceError::DuplicateKey(msg)
    } else {
        ServiceError::Storage(msg)
    }
}

pub(crate) fn storage_error(e: SqlError) -> ServiceError {
    ServiceError::Storage(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_field_with_translation() {
        let (set, values) =
            update_set(&[("Name", Value::Text("test1".into()))], &[("Name", "name")]).unwrap();
        assert_eq!(set, "\"name\"=$1");
        assert_eq!(values, vec![Value::Text("test1".into())]);
    }

    #[test]
    fn two_fields_number_placeholders_in_order() {
        let (set, values) = update_set(
            &[
                ("Name", Value::Text("test1".into())),
                ("Age", Value::Integer(25)),
            ],
            &[("Name", "name"), ("Age", "age")],
        )
        .unwrap();
        assert_eq!(set, "\"name\"=$1, \"age\"=$2");
        assert_eq!(values, vec![Value::Text("test1".into()), Value::Integer(25)]);
    }

    #[test]
    fn untranslated_names_pass_through_verbatim() {
        let (set, values) = update_set(
            &[
                ("description", Value::Text("d".into())),
                ("numEmployees", Value::Integer(3)),
            ],
            &[("numEmployees", "num_employees")],
        )
        .unwrap();
        assert_eq!(set, "\"description\"=$1, \"num_employees\"=$2");
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn value_count_matches_field_count() {
        let fields: Vec<(&str, Value)> = vec![
            ("a", Value::Integer(1)),
            ("b", Value::Integer(2)),
            ("c", Value::Integer(3)),
        ];
        let (set, values) = update_set(&fields, &[]).unwrap();
        assert_eq!(values.len(), fields.len());
        assert_eq!(set, "\"a\"=$1, \"b\"=$2, \"c\"=$3");
    }

    #[test]
    fn empty_field_map_is_rejected() {
        let err = update_set(&[], &[("Name", "name")]).unwrap_err();
        assert!(matches!(err, ServiceError::NoFields(_)));
    }
}
