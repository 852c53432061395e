use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to load environment variables for database connection: {0}")]
    ConnectionConfigError(String),

    #[error("A uniqueness constraint was violated: {0}")]
    UniqueViolation(String),

    #[error("Database query failed: {0}")]
    QueryError(sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}

impl DbError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, DbError::UniqueViolation(_))
    }
}

/// Separates duplicate-key rejections from every other driver error, so
/// callers can answer with a conflict instead of a generic failure.
impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return DbError::UniqueViolation(db_err.message().to_string());
            }
        }
        DbError::QueryError(e)
    }
}
