//! Database layer for InvSys.
//!
//! Everything above this crate talks to storage through the [`Database`]
//! capability. [`MySqlDatabase`] is the production backend; [`MemoryDatabase`]
//! backs `memory://` URLs.

use std::sync::Arc;

use async_trait::async_trait;

pub mod error;
pub mod memory;
pub mod models;
pub mod mysql;
pub mod password;
pub mod schema;
pub mod seed;

pub use error::{DbError, SeedError, SeedStep};
pub use memory::MemoryDatabase;
pub use models::{NewUser, Role, User, UserRole};
pub use mysql::MySqlDatabase;
pub use schema::TableSchema;

const MEMORY_SCHEME: &str = "memory://";

/// Session capability over the relational store.
#[async_trait]
pub trait Database: Send + Sync {
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    /// Drop `tables` if present and recreate them. Destroys all their rows.
    async fn reset_schema(&self, tables: &[TableSchema]) -> Result<(), DbError>;

    async fn insert_role(&self, role: &Role) -> Result<(), DbError>;

    async fn insert_user(&self, user: &NewUser) -> Result<User, DbError>;

    async fn insert_user_role(&self, link: &UserRole) -> Result<(), DbError>;

    /// Run a raw statement and return the affected row count.
    async fn execute(&self, sql: &str) -> Result<u64, DbError>;

    async fn count_rows(&self, table: &str) -> Result<u64, DbError>;
}

/// Open the backend selected by `url`.
pub async fn connect(url: &str, max_connections: u32) -> Result<Arc<dyn Database>, DbError> {
    if url.starts_with(MEMORY_SCHEME) {
        tracing::warn!(target: "invsys-db", "using in-memory database; data is not persisted");
        return Ok(Arc::new(MemoryDatabase::new()));
    }

    let db = MySqlDatabase::connect(url, max_connections).await?;
    tracing::info!(target: "invsys-db", max_connections, "connected to MySQL");
    Ok(Arc::new(db))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_url_selects_memory_backend() {
        let db = connect("memory://", 1).await.unwrap();
        assert_eq!(db.backend(), "memory");
    }
}
