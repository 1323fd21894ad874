pub mod accounts;
pub mod catalog;
pub mod fulfillment;
pub mod requests;
pub mod resource;

use invsys_kernel::ModuleRegistry;

/// Register the sixteen route modules, in mount order
pub fn register_all(registry: &mut ModuleRegistry) -> anyhow::Result<()> {
    let modules = [
        accounts::auth(),
        accounts::user(),
        catalog::item(),
        catalog::service(),
        accounts::user_role(),
        requests::student_item_req(),
        requests::student_service_req(),
        requests::academic_item_req(),
        requests::academic_service_req(),
        accounts::profile(),
        fulfillment::reviewed_item_req(),
        fulfillment::reviewed_service_req(),
        fulfillment::issued_aca_item(),
        fulfillment::issued_stud_item(),
        fulfillment::proceeded_aca_service(),
        fulfillment::proceeded_stud_service(),
    ];

    for module in modules {
        registry.register(module)?;
    }

    Ok(())
}
