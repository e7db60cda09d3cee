//! Error type shared by both gather modes.

#[derive(Debug, thiserror::Error)]
pub enum GatherError {
    #[error("missing database URL; pass --database-url or set DATABASE_URL")]
    MissingDatabaseUrl,
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}
