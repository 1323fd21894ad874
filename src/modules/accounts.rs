//! Account modules: roles, users, role assignments, and profiles.

use std::sync::Arc;

use invsys_db::schema;
use invsys_kernel::Module;

use super::resource::ResourceModule;

pub fn auth() -> Arc<dyn Module> {
    Arc::new(ResourceModule::new("auth", "Auth", &[schema::ROLES]))
}

pub fn user() -> Arc<dyn Module> {
    Arc::new(ResourceModule::new("user", "Users", &[schema::USERS]))
}

pub fn user_role() -> Arc<dyn Module> {
    Arc::new(ResourceModule::new(
        "user-role",
        "User roles",
        &[schema::USER_ROLES],
    ))
}

/// Profiles are read from `users`, which the `user` module owns.
pub fn profile() -> Arc<dyn Module> {
    Arc::new(ResourceModule::new("profile", "Profile", &[]))
}
