use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::core::error::Result;
use crate::features::categories::dtos::{
    CategoryDetailDto, CategoryResponseDto, ListCategoriesQuery,
};
use crate::features::categories::services::CategoryService;
use crate::shared::types::ApiResponse;

/// List categories
///
/// Default: root-level categories. `tree=true` returns the active categories
/// as a nested tree; `active=true` returns the flat active-only list.
#[utoipa::path(
    get,
    path = "/api/categories",
    params(ListCategoriesQuery),
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryResponseDto>>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
    Query(query): Query<ListCategoriesQuery>,
) -> Result<Json<ApiResponse<serde_json::Value>>> {
    let value = if query.tree {
        serde_json::to_value(service.list_tree().await?)
    } else if query.active {
        serde_json::to_value(service.list_active().await?)
    } else {
        serde_json::to_value(service.list_roots().await?)
    }
    .unwrap();

    Ok(Json(ApiResponse::success(Some(value), None, None)))
}

/// Get a category by its slug path
///
/// The path is the slash-joined chain of ancestor slugs ending in the leaf
/// slug, e.g. `electronics/laptops/gaming`.
#[utoipa::path(
    get,
    path = "/api/categories/{path}",
    params(
        ("path" = String, Path, description = "Slash-joined ancestor slug path, e.g. electronics/laptops/gaming")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryDetailDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category_by_path(
    State(service): State<Arc<CategoryService>>,
    Path(path): Path<String>,
) -> Result<Json<ApiResponse<CategoryDetailDto>>> {
    let category = service.get_by_path(&path).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}
