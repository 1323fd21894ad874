use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("constraint violated on `{table}`: {message}")]
    Constraint { table: String, message: String },

    #[error("unknown table `{0}`")]
    UnknownTable(String),

    #[error("unsupported statement: {0}")]
    Unsupported(String),

    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl DbError {
    pub fn constraint(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Constraint {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Maps a driver error raised while writing `table`, surfacing unique
    /// violations as [`DbError::Constraint`].
    pub(crate) fn from_write(table: &str, err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return Self::constraint(table, db_err.message());
            }
        }
        Self::Sqlx(err)
    }
}

/// The step of the seed sequence that was running when it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedStep {
    Roles,
    AdminUser,
    AdminRole,
    /// Adding the foreign key on the named fulfillment table.
    ForeignKey(&'static str),
}

impl fmt::Display for SeedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Roles => f.write_str("roles"),
            Self::AdminUser => f.write_str("admin-user"),
            Self::AdminRole => f.write_str("admin-role"),
            Self::ForeignKey(table) => write!(f, "foreign-key({table})"),
        }
    }
}

#[derive(Debug, Error)]
#[error("seed step `{step}` failed: {source}")]
pub struct SeedError {
    pub step: SeedStep,
    #[source]
    pub source: DbError,
}

impl SeedError {
    pub(crate) fn at(step: SeedStep) -> impl FnOnce(DbError) -> Self {
        move |source| Self { step, source }
    }
}
