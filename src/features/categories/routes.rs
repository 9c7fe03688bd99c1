use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::categories::handlers::{category_admin_handler, category_handler};
use crate::features::categories::services::{CategoryAdminService, CategoryService};

/// Create routes for the public category surface
///
/// Note: this surface is public (no authentication required)
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/api/categories", get(category_handler::list_categories))
        .route(
            "/api/categories/{*path}",
            get(category_handler::get_category_by_path),
        )
        .with_state(service)
}

/// Create routes for the administrative category surface
///
/// Mounted behind the Basic-auth middleware under `/api/admin`.
pub fn admin_routes(service: Arc<CategoryAdminService>) -> Router {
    Router::new()
        .route(
            "/categories",
            get(category_admin_handler::list_categories)
                .post(category_admin_handler::create_category),
        )
        .route(
            "/categories/{id}",
            get(category_admin_handler::get_category)
                .put(category_admin_handler::update_category)
                .delete(category_admin_handler::delete_category),
        )
        .route(
            "/categories/activate",
            post(category_admin_handler::activate_categories),
        )
        .route(
            "/categories/deactivate",
            post(category_admin_handler::deactivate_categories),
        )
        .with_state(service)
}
