//! Classification helpers for PostgreSQL constraint violations.

pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    db_err.is_unique_violation()
}

pub fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    db_err.is_foreign_key_violation()
}

/// True when a delete was rejected because dependent rows still reference it.
pub fn is_restrict_violation_on(e: &sqlx::Error, constraint: &str) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    db_err.is_foreign_key_violation() && db_err.constraint() == Some(constraint)
}
