use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use crate::models::{NewUser, Role, User, UserRole};
use crate::schema::{self, TableSchema};
use crate::{Database, DbError};

/// [`Database`] backed by a sqlx MySQL pool.
#[derive(Clone)]
pub struct MySqlDatabase {
    pool: MySqlPool,
}

impl MySqlDatabase {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, DbError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl Database for MySqlDatabase {
    fn backend(&self) -> &'static str {
        "mysql"
    }

    /// Drops every table in reverse order with foreign key checks off, then
    /// recreates them in order. The whole reset is one multi-statement script
    /// so it runs on a single connection, where `FOREIGN_KEY_CHECKS` applies.
    async fn reset_schema(&self, tables: &[TableSchema]) -> Result<(), DbError> {
        tracing::debug!(tables = tables.len(), "resetting schema");
        let script = reset_script(tables);
        sqlx::raw_sql(&script).execute(&self.pool).await?;
        Ok(())
    }

    async fn insert_role(&self, role: &Role) -> Result<(), DbError> {
        sqlx::query("INSERT INTO roles (id, name) VALUES (?, ?)")
            .bind(role.id)
            .bind(&role.name)
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::from_write(schema::ROLES.name, e))?;
        Ok(())
    }

    async fn insert_user(&self, user: &NewUser) -> Result<User, DbError> {
        let result = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
            .bind(&user.username)
            .bind(&user.password)
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::from_write(schema::USERS.name, e))?;

        Ok(User {
            id: result.last_insert_id(),
            username: user.username.clone(),
            password: user.password.clone(),
        })
    }

    async fn insert_user_role(&self, link: &UserRole) -> Result<(), DbError> {
        sqlx::query("INSERT INTO user_roles (roleId, username) VALUES (?, ?)")
            .bind(link.role_id)
            .bind(&link.username)
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::from_write(schema::USER_ROLES.name, e))?;
        Ok(())
    }

    async fn execute(&self, sql: &str) -> Result<u64, DbError> {
        let result = sqlx::raw_sql(sql).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn count_rows(&self, table: &str) -> Result<u64, DbError> {
        if !schema::is_identifier(table) {
            return Err(DbError::UnknownTable(table.to_string()));
        }

        let sql = format!("SELECT COUNT(*) FROM `{table}`");
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(u64::try_from(count).unwrap_or_default())
    }
}

fn reset_script(tables: &[TableSchema]) -> String {
    let mut script = String::from("SET FOREIGN_KEY_CHECKS = 0;\n");
    for table in tables.iter().rev() {
        script.push_str(&format!("DROP TABLE IF EXISTS `{}`;\n", table.name));
    }
    script.push_str("SET FOREIGN_KEY_CHECKS = 1;\n");
    for table in tables {
        script.push_str(table.create.trim().trim_end_matches(';'));
        script.push_str(";\n");
    }
    script
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn reset_script_drops_in_reverse_then_creates_in_order() {
        let script = reset_script(&schema::ALL);
        let lines: Vec<&str> = script.lines().collect();

        assert_eq!(lines[0], "SET FOREIGN_KEY_CHECKS = 0;");
        assert_eq!(
            lines[1],
            "DROP TABLE IF EXISTS `proceeded_stud_service_requests`;"
        );
        assert_eq!(lines[schema::ALL.len()], "DROP TABLE IF EXISTS `roles`;");
        assert_eq!(lines[schema::ALL.len() + 1], "SET FOREIGN_KEY_CHECKS = 1;");

        let creates = &script[script.find("SET FOREIGN_KEY_CHECKS = 1;").unwrap()..];
        let roles = creates.find("CREATE TABLE roles (").unwrap();
        let issued = creates
            .find("CREATE TABLE issued_aca_item_requests (")
            .unwrap();
        assert!(roles < issued);
    }

    #[test]
    fn empty_reset_only_toggles_checks() {
        assert_eq!(
            reset_script(&[]),
            "SET FOREIGN_KEY_CHECKS = 0;\nSET FOREIGN_KEY_CHECKS = 1;\n"
        );
    }

    async fn test_database() -> MySqlDatabase {
        let url = std::env::var("INVSYS_TEST_MYSQL_URL")
            .expect("INVSYS_TEST_MYSQL_URL must point at a disposable MySQL database");
        MySqlDatabase::connect(&url, 2).await.unwrap()
    }

    #[tokio::test]
    #[ignore = "Requires database"]
    async fn reset_and_seed_against_mysql() {
        let db = test_database().await;

        db.reset_schema(&schema::ALL).await.unwrap();
        seed::initial(&db).await.unwrap();

        assert_eq!(db.count_rows("roles").await.unwrap(), 4);
        assert_eq!(db.count_rows("users").await.unwrap(), 1);
        assert_eq!(db.count_rows("user_roles").await.unwrap(), 1);

        // A second reset must get past the foreign keys the seed added.
        db.reset_schema(&schema::ALL).await.unwrap();
        assert_eq!(db.count_rows("users").await.unwrap(), 0);
    }

    #[tokio::test]
    #[ignore = "Requires database"]
    async fn duplicate_username_is_a_constraint_error() {
        let db = test_database().await;
        db.reset_schema(&schema::ALL).await.unwrap();

        let user = NewUser {
            username: "admin".to_string(),
            password: "x".to_string(),
        };
        db.insert_user(&user).await.unwrap();

        let err = db.insert_user(&user).await.unwrap_err();
        assert!(matches!(err, DbError::Constraint { ref table, .. } if table == "users"));
    }
}
