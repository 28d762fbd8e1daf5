pub mod attendance;
pub mod employees;
pub mod tokens;
pub mod users;

/// SQLite reports UNIQUE violations as extended result codes 2067
/// (SQLITE_CONSTRAINT_UNIQUE) and 1555 (SQLITE_CONSTRAINT_PRIMARYKEY).
/// Returns the constraint message so callers can name the field.
pub(crate) fn unique_violation(e: &sqlx::Error) -> Option<String> {
    if let sqlx::Error::Database(db_err) = e {
        if matches!(db_err.code().as_deref(), Some("2067") | Some("1555")) {
            return Some(db_err.message().to_string());
        }
    }
    None
}

/// SQLITE_CONSTRAINT_FOREIGNKEY
pub(crate) fn foreign_key_violation(e: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = e {
        return db_err.code().as_deref() == Some("787");
    }
    false
}
