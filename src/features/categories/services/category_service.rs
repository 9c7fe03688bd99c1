use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryDetailDto, CategoryResponseDto, CategoryTreeDto,
};
use crate::features::categories::repository::{CategoryRepository, TreeRepository};

/// Service for the public category read surface
pub struct CategoryService {
    repo: Arc<CategoryRepository>,
}

impl CategoryService {
    pub fn new(repo: Arc<CategoryRepository>) -> Self {
        Self { repo }
    }

    /// Root-level categories (tree depth zero)
    pub async fn list_roots(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.repo.list_roots().await?;
        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// Flat list of active categories
    pub async fn list_active(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.repo.list_active().await?;
        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// Active categories as a nested tree
    pub async fn list_tree(&self) -> Result<Vec<CategoryTreeDto>> {
        let categories = self.repo.list_active().await?;
        Ok(CategoryTreeDto::build_tree(categories))
    }

    /// Resolve a slash-joined chain of ancestor slugs to a single category.
    ///
    /// The path must name every level: "electronics/laptops/gaming" matches
    /// the Gaming node only if its ancestor slugs are exactly electronics,
    /// laptops.
    pub async fn get_by_path(&self, path: &str) -> Result<CategoryDetailDto> {
        let segments: Vec<String> = path
            .trim_matches('/')
            .split('/')
            .map(|s| s.to_string())
            .collect();

        if segments.iter().any(|s| s.is_empty()) {
            return Err(AppError::NotFound(format!("Category '{}' not found", path)));
        }

        let category = self
            .repo
            .resolve_slug_path(&segments)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", path)))?;

        let ancestors = self.repo.ancestors(category.id).await?;
        let children = self.repo.children(category.id).await?;

        Ok(CategoryDetailDto::from_parts(category, &ancestors, children))
    }
}
