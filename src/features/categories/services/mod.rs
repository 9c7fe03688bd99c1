mod category_admin_service;
mod category_service;
pub mod rules;

pub use category_admin_service::CategoryAdminService;
pub use category_service::CategoryService;
