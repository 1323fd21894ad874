//! Fulfillment modules.
//!
//! Academic staff review student requests; non-academic staff issue items and
//! proceed with services for reviewed student requests and for academic
//! requests directly.

use std::sync::Arc;

use invsys_db::schema;
use invsys_kernel::Module;

use super::resource::ResourceModule;

pub fn reviewed_item_req() -> Arc<dyn Module> {
    Arc::new(ResourceModule::new(
        "reviewed-item-req",
        "Reviews",
        &[schema::REVIEWED_ITEM_REQUESTS],
    ))
}

pub fn reviewed_service_req() -> Arc<dyn Module> {
    Arc::new(ResourceModule::new(
        "reviewed-service-req",
        "Reviews",
        &[schema::REVIEWED_SERVICE_REQUESTS],
    ))
}

pub fn issued_aca_item() -> Arc<dyn Module> {
    Arc::new(ResourceModule::new(
        "issued-aca-item",
        "Issued items",
        &[schema::ISSUED_ACA_ITEM_REQUESTS],
    ))
}

pub fn issued_stud_item() -> Arc<dyn Module> {
    Arc::new(ResourceModule::new(
        "issued-stud-item",
        "Issued items",
        &[schema::ISSUED_STUD_ITEM_REQUESTS],
    ))
}

pub fn proceeded_aca_service() -> Arc<dyn Module> {
    Arc::new(ResourceModule::new(
        "proceeded-aca-service",
        "Proceeded services",
        &[schema::PROCEEDED_ACA_SERVICE_REQUESTS],
    ))
}

pub fn proceeded_stud_service() -> Arc<dyn Module> {
    Arc::new(ResourceModule::new(
        "proceeded-stud-service",
        "Proceeded services",
        &[schema::PROCEEDED_STUD_SERVICE_REQUESTS],
    ))
}
