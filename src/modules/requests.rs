//! Request modules. Students and academic staff file item and service requests.

use std::sync::Arc;

use invsys_db::schema;
use invsys_kernel::Module;

use super::resource::ResourceModule;

pub fn student_item_req() -> Arc<dyn Module> {
    Arc::new(ResourceModule::new(
        "student-item-req",
        "Student requests",
        &[schema::STUDENT_ITEM_REQUESTS],
    ))
}

pub fn student_service_req() -> Arc<dyn Module> {
    Arc::new(ResourceModule::new(
        "student-service-req",
        "Student requests",
        &[schema::STUDENT_SERVICE_REQUESTS],
    ))
}

pub fn academic_item_req() -> Arc<dyn Module> {
    Arc::new(ResourceModule::new(
        "academic-item-req",
        "Academic requests",
        &[schema::ACADEMIC_ITEM_REQUESTS],
    ))
}

pub fn academic_service_req() -> Arc<dyn Module> {
    Arc::new(ResourceModule::new(
        "academic-service-req",
        "Academic requests",
        &[schema::ACADEMIC_SERVICE_REQUESTS],
    ))
}
