//! Startup seed sequence: fixed roles, the admin account, and the foreign keys
//! linking fulfillment tables to the requests they act on.
//!
//! Steps run strictly in order and stop at the first failure. Nothing is rolled
//! back; whatever was written before the failure stays.

use crate::error::{SeedError, SeedStep};
use crate::models::{NewUser, Role, UserRole};
use crate::schema::{self, TableSchema};
use crate::{password, Database};

pub const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "admin";
pub const ADMIN_ROLE_ID: i32 = 1;

/// bcrypt cost for the seeded admin password.
pub const PASSWORD_COST: u32 = 8;

pub const ROLES: [(i32, &str); 4] = [
    (1, "admin"),
    (2, "non-academic"),
    (3, "academic"),
    (4, "student"),
];

/// `(fulfillment table, request table)` pairs joined on `requestId`.
pub const REQUEST_LINKS: [(&str, &str); 4] = [
    (
        schema::ISSUED_ACA_ITEM_REQUESTS.name,
        schema::ACADEMIC_ITEM_REQUESTS.name,
    ),
    (
        schema::PROCEEDED_ACA_SERVICE_REQUESTS.name,
        schema::ACADEMIC_SERVICE_REQUESTS.name,
    ),
    (
        schema::ISSUED_STUD_ITEM_REQUESTS.name,
        schema::REVIEWED_ITEM_REQUESTS.name,
    ),
    (
        schema::PROCEEDED_STUD_SERVICE_REQUESTS.name,
        schema::REVIEWED_SERVICE_REQUESTS.name,
    ),
];

pub fn foreign_key_statement(table: &str, references: &str) -> String {
    format!("ALTER TABLE {table} ADD FOREIGN KEY (requestId) REFERENCES {references}(requestId);")
}

/// The four `ALTER TABLE` statements, keyed by the table they alter.
pub fn foreign_key_statements() -> Vec<(&'static str, String)> {
    REQUEST_LINKS
        .iter()
        .map(|&(table, references)| (table, foreign_key_statement(table, references)))
        .collect()
}

/// Insert seed rows and add the request foreign keys.
///
/// Expects a freshly reset schema. Returns the first failure tagged with the
/// step that raised it.
pub async fn initial(db: &dyn Database) -> Result<(), SeedError> {
    for (id, name) in ROLES {
        db.insert_role(&Role::new(id, name))
            .await
            .map_err(SeedError::at(SeedStep::Roles))?;
    }

    let password = password::hash(ADMIN_PASSWORD, PASSWORD_COST)
        .await
        .map_err(SeedError::at(SeedStep::AdminUser))?;
    let admin = db
        .insert_user(&NewUser {
            username: ADMIN_USERNAME.to_string(),
            password,
        })
        .await
        .map_err(SeedError::at(SeedStep::AdminUser))?;

    db.insert_user_role(&UserRole {
        role_id: ADMIN_ROLE_ID,
        username: admin.username,
    })
    .await
    .map_err(SeedError::at(SeedStep::AdminRole))?;

    for (table, statement) in foreign_key_statements() {
        db.execute(&statement)
            .await
            .map_err(SeedError::at(SeedStep::ForeignKey(table)))?;
        tracing::debug!(table, "foreign key added");
    }

    Ok(())
}

/// Run [`initial`] and log the outcome. Failures are not propagated.
pub async fn run(db: &dyn Database) {
    match initial(db).await {
        Ok(()) => tracing::info!("initial data and constraints have been set up successfully"),
        Err(e) => tracing::error!(
            step = %e.step,
            error = %e.source,
            "error during initial database setup"
        ),
    }
}

/// Drop and recreate `tables`, then seed them.
///
/// A reset failure is logged and seeding is skipped.
pub async fn reset_and_seed(db: &dyn Database, tables: &[TableSchema]) {
    if let Err(e) = db.reset_schema(tables).await {
        tracing::error!(error = %e, "failed to reset database schema; skipping seed");
        return;
    }

    tracing::info!(
        backend = db.backend(),
        tables = tables.len(),
        "drop and resync db"
    );
    run(db).await;
}
