use openjobs_core::ServiceError;
use openjobs_sql::SqlStore;
use tracing::debug;

/// SQL schema for the board tables.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS organizations (
        handle        TEXT PRIMARY KEY,
        name          TEXT NOT NULL,
        description   TEXT NOT NULL,
        num_employees INTEGER CHECK (num_employees >= 0),
        logo_url      TEXT
    )",
    "CREATE TABLE IF NOT EXISTS positions (
        id                  INTEGER PRIMARY KEY AUTOINCREMENT,
        title               TEXT NOT NULL,
        salary              INTEGER CHECK (salary >= 0),
        equity              REAL CHECK (equity <= 1.0),
        organization_handle TEXT NOT NULL
            REFERENCES organizations(handle) ON DELETE CASCADE
    )",
    "CREATE INDEX IF NOT EXISTS idx_position_organization
        ON positions(organization_handle)",
];

/// Create the board tables if they don't exist.
pub fn init(sql: &dyn SqlStore) -> Result<(), ServiceError> {
    for stmt in SCHEMA {
        sql.exec(stmt, &[])
            .map_err(|e| ServiceError::Storage(format!("board schema init: {e}")))?;
    }
    debug!("board schema initialised");
    Ok(())
}
