pub mod category_admin_handler;
pub mod category_handler;
