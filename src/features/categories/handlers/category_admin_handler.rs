use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::categories::dtos::{
    AdminCategoryDto, AdminCategoryQuery, BulkActionResultDto, BulkSelectionDto,
    CategoryDetailDto, CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::services::CategoryAdminService;
use crate::shared::types::{ApiResponse, Meta};

/// List categories in tree order (admin)
///
/// Rows arrive depth-first with siblings ordered by name, each annotated
/// with its depth. Supports free-text search on the name.
#[utoipa::path(
    get,
    path = "/api/admin/categories",
    params(AdminCategoryQuery),
    responses(
        (status = 200, description = "Tree-ordered category list", body = ApiResponse<Vec<AdminCategoryDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryAdminService>>,
    Query(query): Query<AdminCategoryQuery>,
) -> Result<Json<ApiResponse<Vec<AdminCategoryDto>>>> {
    let (categories, total) = service.list(&query).await?;
    Ok(Json(ApiResponse::success(
        Some(categories),
        None,
        Some(Meta { total }),
    )))
}

/// Get a category by id (admin)
#[utoipa::path(
    get,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryDetailDto>),
        (status = 404, description = "Category not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn get_category(
    State(service): State<Arc<CategoryAdminService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CategoryDetailDto>>> {
    let category = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Create a category (admin)
///
/// A blank slug is derived from the name. The slug must be unique among its
/// siblings.
#[utoipa::path(
    post,
    path = "/api/admin/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 200, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Duplicate name at this level"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn create_category(
    State(service): State<Arc<CategoryAdminService>>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.create(dto).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Update a category (admin)
///
/// Making a category inactive cascades to all of its descendants.
#[utoipa::path(
    put,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Category not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn update_category(
    State(service): State<Arc<CategoryAdminService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Delete a category and its subtree (admin)
#[utoipa::path(
    delete,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 404, description = "Category not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn delete_category(
    State(service): State<Arc<CategoryAdminService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Category deleted".to_string()),
        None,
    )))
}

/// Activate selected categories and their children (admin)
///
/// Sets the active flag on every selected category and bulk-activates its
/// direct children (one level only).
#[utoipa::path(
    post,
    path = "/api/admin/categories/activate",
    request_body = BulkSelectionDto,
    responses(
        (status = 200, description = "Categories activated", body = ApiResponse<BulkActionResultDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn activate_categories(
    State(service): State<Arc<CategoryAdminService>>,
    AppJson(dto): AppJson<BulkSelectionDto>,
) -> Result<Json<ApiResponse<BulkActionResultDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let updated = service.activate(&dto.ids).await?;
    Ok(Json(ApiResponse::success(
        Some(BulkActionResultDto { updated }),
        None,
        None,
    )))
}

/// Deactivate selected categories and their children (admin)
///
/// Skips categories that are already inactive; touches direct children only
/// (one level, not the full subtree).
#[utoipa::path(
    post,
    path = "/api/admin/categories/deactivate",
    request_body = BulkSelectionDto,
    responses(
        (status = 200, description = "Categories deactivated", body = ApiResponse<BulkActionResultDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn deactivate_categories(
    State(service): State<Arc<CategoryAdminService>>,
    AppJson(dto): AppJson<BulkSelectionDto>,
) -> Result<Json<ApiResponse<BulkActionResultDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let updated = service.deactivate(&dto.ids).await?;
    Ok(Json(ApiResponse::success(
        Some(BulkActionResultDto { updated }),
        None,
        None,
    )))
}
