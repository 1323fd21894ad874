//! Catalog modules: the items and services that can be requested.

use std::sync::Arc;

use invsys_db::schema;
use invsys_kernel::Module;

use super::resource::ResourceModule;

pub fn item() -> Arc<dyn Module> {
    Arc::new(ResourceModule::new("item", "Items", &[schema::ITEMS]))
}

pub fn service() -> Arc<dyn Module> {
    Arc::new(ResourceModule::new("service", "Services", &[schema::SERVICES]))
}
