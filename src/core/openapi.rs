use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::categories::dtos as categories_dtos;
use crate::features::categories::handlers::{category_admin_handler, category_handler};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories (public)
        category_handler::list_categories,
        category_handler::get_category_by_path,
        // Categories (admin)
        category_admin_handler::list_categories,
        category_admin_handler::get_category,
        category_admin_handler::create_category,
        category_admin_handler::update_category,
        category_admin_handler::delete_category,
        category_admin_handler::activate_categories,
        category_admin_handler::deactivate_categories,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Categories
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryDetailDto,
            categories_dtos::CategoryTreeDto,
            categories_dtos::AdminCategoryDto,
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            categories_dtos::BulkSelectionDto,
            categories_dtos::BulkActionResultDto,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<categories_dtos::CategoryDetailDto>,
            ApiResponse<Vec<categories_dtos::AdminCategoryDto>>,
            ApiResponse<categories_dtos::BulkActionResultDto>,
        )
    ),
    tags(
        (name = "categories", description = "Category taxonomy (public)"),
        (name = "admin", description = "Category administration (Basic auth)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Taxonomy API",
        version = "0.1.0",
        description = "Hierarchical category taxonomy API",
    )
)]
pub struct ApiDoc;

/// Adds the HTTP Basic security scheme to the OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
