//! In-process [`Database`] used for local runs without MySQL and for tests.
//!
//! It keeps the rows the seed sequence writes and enforces the same keys the
//! MySQL schema declares. Of raw statements it understands only the
//! `ALTER TABLE .. ADD FOREIGN KEY` form.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::models::{NewUser, Role, User, UserRole};
use crate::schema::{self, TableSchema};
use crate::{Database, DbError};

/// A foreign key recorded by [`MemoryDatabase::execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub table: String,
    pub column: String,
    pub references: String,
    pub referenced_column: String,
}

#[derive(Debug, Default)]
struct State {
    tables: Vec<String>,
    roles: Vec<Role>,
    users: Vec<User>,
    user_roles: Vec<UserRole>,
    foreign_keys: Vec<ForeignKey>,
    next_user_id: u64,
}

impl State {
    fn require(&self, table: &str) -> Result<(), DbError> {
        if self.tables.iter().any(|t| t == table) {
            Ok(())
        } else {
            Err(DbError::UnknownTable(table.to_string()))
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryDatabase {
    state: Mutex<State>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn tables(&self) -> Vec<String> {
        self.state().tables.clone()
    }

    pub fn roles(&self) -> Vec<Role> {
        self.state().roles.clone()
    }

    pub fn users(&self) -> Vec<User> {
        self.state().users.clone()
    }

    pub fn user_roles(&self) -> Vec<UserRole> {
        self.state().user_roles.clone()
    }

    pub fn foreign_keys(&self) -> Vec<ForeignKey> {
        self.state().foreign_keys.clone()
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn reset_schema(&self, tables: &[TableSchema]) -> Result<(), DbError> {
        let mut state = self.state();
        *state = State {
            tables: tables.iter().map(|t| t.name.to_string()).collect(),
            ..State::default()
        };
        Ok(())
    }

    async fn insert_role(&self, role: &Role) -> Result<(), DbError> {
        let mut state = self.state();
        state.require(schema::ROLES.name)?;

        if state.roles.iter().any(|r| r.id == role.id) {
            return Err(DbError::constraint(
                schema::ROLES.name,
                format!("duplicate role id {}", role.id),
            ));
        }
        state.roles.push(role.clone());
        Ok(())
    }

    async fn insert_user(&self, user: &NewUser) -> Result<User, DbError> {
        let mut state = self.state();
        state.require(schema::USERS.name)?;

        if state.users.iter().any(|u| u.username == user.username) {
            return Err(DbError::constraint(
                schema::USERS.name,
                format!("duplicate username `{}`", user.username),
            ));
        }

        state.next_user_id += 1;
        let stored = User {
            id: state.next_user_id,
            username: user.username.clone(),
            password: user.password.clone(),
        };
        state.users.push(stored.clone());
        Ok(stored)
    }

    async fn insert_user_role(&self, link: &UserRole) -> Result<(), DbError> {
        let mut state = self.state();
        state.require(schema::USER_ROLES.name)?;

        if state.user_roles.contains(link) {
            return Err(DbError::constraint(
                schema::USER_ROLES.name,
                format!(
                    "duplicate assignment of role {} to `{}`",
                    link.role_id, link.username
                ),
            ));
        }
        state.user_roles.push(link.clone());
        Ok(())
    }

    async fn execute(&self, sql: &str) -> Result<u64, DbError> {
        let key = parse_foreign_key(sql)
            .ok_or_else(|| DbError::Unsupported(sql.trim().to_string()))?;

        let mut state = self.state();
        state.require(&key.table)?;
        state.require(&key.references)?;
        state.foreign_keys.push(key);
        Ok(0)
    }

    async fn count_rows(&self, table: &str) -> Result<u64, DbError> {
        let state = self.state();
        state.require(table)?;

        let rows = match table {
            t if t == schema::ROLES.name => state.roles.len(),
            t if t == schema::USERS.name => state.users.len(),
            t if t == schema::USER_ROLES.name => state.user_roles.len(),
            _ => 0,
        };
        Ok(rows as u64)
    }
}

/// Parses `ALTER TABLE <t> ADD FOREIGN KEY (<c>) REFERENCES <p>(<pc>)`,
/// case-insensitive on keywords and tolerant of any whitespace.
fn parse_foreign_key(sql: &str) -> Option<ForeignKey> {
    let normalized = sql.split_whitespace().collect::<Vec<_>>().join(" ");
    let statement = normalized.trim_end_matches(';').trim_end();

    let rest = strip_keyword(statement, "ALTER TABLE ")?;
    let (table, rest) = rest.split_once(' ')?;
    let rest = strip_keyword(rest, "ADD FOREIGN KEY")?.trim_start();
    let (column, rest) = rest.strip_prefix('(')?.split_once(')')?;
    let rest = strip_keyword(rest.trim_start(), "REFERENCES ")?;
    let (references, rest) = rest.split_once('(')?;
    let (referenced_column, trailing) = rest.split_once(')')?;

    if !trailing.trim().is_empty() {
        return None;
    }

    let field = |s: &str| {
        let s = s.trim();
        schema::is_identifier(s).then(|| s.to_string())
    };

    Some(ForeignKey {
        table: field(table)?,
        column: field(column)?,
        references: field(references)?,
        referenced_column: field(referenced_column)?,
    })
}

fn strip_keyword<'a>(input: &'a str, keyword: &str) -> Option<&'a str> {
    let head = input.get(..keyword.len())?;
    head.eq_ignore_ascii_case(keyword)
        .then(|| &input[keyword.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn with_all_tables() -> MemoryDatabase {
        let db = MemoryDatabase::new();
        db.reset_schema(&schema::ALL).await.unwrap();
        db
    }

    #[test]
    fn parses_multiline_foreign_key_statement() {
        let key = parse_foreign_key(
            "\n      ALTER TABLE issued_aca_item_requests\n      ADD FOREIGN KEY (requestId) REFERENCES academic_item_requests(requestId);\n    ",
        )
        .unwrap();

        assert_eq!(key.table, "issued_aca_item_requests");
        assert_eq!(key.column, "requestId");
        assert_eq!(key.references, "academic_item_requests");
        assert_eq!(key.referenced_column, "requestId");
    }

    #[test]
    fn rejects_other_statements() {
        assert!(parse_foreign_key("DROP TABLE users").is_none());
        assert!(parse_foreign_key("ALTER TABLE users ADD COLUMN age INT").is_none());
        assert!(parse_foreign_key(
            "ALTER TABLE a ADD FOREIGN KEY (x) REFERENCES b(x) ON DELETE CASCADE"
        )
        .is_none());
    }

    #[tokio::test]
    async fn inserts_require_created_tables() {
        let db = MemoryDatabase::new();
        let result = db.insert_role(&Role::new(1, "admin")).await;
        assert!(matches!(result, Err(DbError::UnknownTable(t)) if t == "roles"));
    }

    #[tokio::test]
    async fn enforces_unique_keys() {
        let db = with_all_tables().await;

        db.insert_role(&Role::new(1, "admin")).await.unwrap();
        assert!(matches!(
            db.insert_role(&Role::new(1, "other")).await,
            Err(DbError::Constraint { .. })
        ));

        let user = NewUser {
            username: "admin".to_string(),
            password: "hash".to_string(),
        };
        assert_eq!(db.insert_user(&user).await.unwrap().id, 1);
        assert!(matches!(db.insert_user(&user).await, Err(DbError::Constraint { .. })));

        let link = UserRole {
            role_id: 1,
            username: "admin".to_string(),
        };
        db.insert_user_role(&link).await.unwrap();
        assert!(matches!(
            db.insert_user_role(&link).await,
            Err(DbError::Constraint { .. })
        ));

        assert_eq!(db.count_rows("roles").await.unwrap(), 1);
        assert_eq!(db.count_rows("users").await.unwrap(), 1);
        assert_eq!(db.count_rows("user_roles").await.unwrap(), 1);
        assert_eq!(db.count_rows("items").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn foreign_key_needs_both_tables() {
        let db = MemoryDatabase::new();
        db.reset_schema(&[schema::ISSUED_STUD_ITEM_REQUESTS])
            .await
            .unwrap();

        let result = db
            .execute("ALTER TABLE issued_stud_item_requests ADD FOREIGN KEY (requestId) REFERENCES reviewed_item_requests(requestId);")
            .await;

        assert!(matches!(result, Err(DbError::UnknownTable(t)) if t == "reviewed_item_requests"));
        assert!(db.foreign_keys().is_empty());
    }

    #[tokio::test]
    async fn reset_discards_rows() {
        let db = with_all_tables().await;
        db.insert_role(&Role::new(4, "student")).await.unwrap();

        db.reset_schema(&schema::ALL).await.unwrap();

        assert!(db.roles().is_empty());
        assert_eq!(db.tables().len(), schema::ALL.len());
    }
}
