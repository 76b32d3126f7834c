use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    Unavailable(String),
}

impl AppError {
    /// Text shown to the user when an operation fails.
    ///
    /// Storage failures are logged and replaced by `fallback`; everything
    /// else carries a message meant for the user already.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Database(e) => {
                error!("database error: {}", e);
                fallback.to_string()
            }
            AppError::Migration(e) => {
                error!("migration error: {}", e);
                fallback.to_string()
            }
            AppError::Unavailable(msg) if msg.is_empty() => fallback.to_string(),
            other => other.to_string(),
        }
    }
}
