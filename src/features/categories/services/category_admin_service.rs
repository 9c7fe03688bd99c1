use std::sync::Arc;

use uuid::Uuid;

use crate::core::config::CategoryConfig;
use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    AdminCategoryDto, AdminCategoryQuery, CategoryDetailDto, CategoryResponseDto,
    CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::repository::{CategoryRepository, TreeRepository};
use crate::features::categories::services::rules;
use crate::shared::slug::{derive_slug, SlugTransliterator};

/// Resolve the slug a save will persist.
///
/// On create (`existing` absent) a non-empty submitted slug wins, otherwise
/// the slug derives from the name. On update the stored slug is kept unless
/// slug changes are allowed, in which case a non-empty submitted slug wins
/// and a blank one re-derives from the name.
fn effective_slug(
    transliterator: &dyn SlugTransliterator,
    allow_slug_change: bool,
    submitted: Option<&str>,
    existing: Option<&str>,
    name: &str,
) -> String {
    let submitted = submitted.filter(|s| !s.is_empty());

    match existing {
        Some(stored) if !allow_slug_change => stored.to_string(),
        _ => match submitted {
            Some(s) => s.to_string(),
            None => derive_slug(transliterator, name),
        },
    }
}

/// Service for the administrative category surface
pub struct CategoryAdminService {
    repo: Arc<CategoryRepository>,
    policy: CategoryConfig,
    transliterator: Arc<dyn SlugTransliterator>,
}

impl CategoryAdminService {
    pub fn new(
        repo: Arc<CategoryRepository>,
        policy: CategoryConfig,
        transliterator: Arc<dyn SlugTransliterator>,
    ) -> Self {
        Self {
            repo,
            policy,
            transliterator,
        }
    }

    /// Tree-ordered listing with optional name search and pagination
    pub async fn list(&self, query: &AdminCategoryQuery) -> Result<(Vec<AdminCategoryDto>, i64)> {
        let search = query.search.as_deref().filter(|s| !s.is_empty());

        let total = self.repo.count(search).await?;
        let rows = self
            .repo
            .list_tree(search, query.offset(), query.limit())
            .await?;

        Ok((rows.into_iter().map(|r| r.into()).collect(), total))
    }

    pub async fn get(&self, id: Uuid) -> Result<CategoryDetailDto> {
        let category = self
            .repo
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", id)))?;

        let ancestors = self.repo.ancestors(category.id).await?;
        let children = self.repo.children(category.id).await?;

        Ok(CategoryDetailDto::from_parts(category, &ancestors, children))
    }

    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let slug = effective_slug(
            &*self.transliterator,
            self.policy.allow_slug_change,
            dto.slug.as_deref(),
            None,
            &dto.name,
        );
        if slug.is_empty() {
            return Err(AppError::Validation(
                "A slug could not be derived from the name; provide one explicitly.".to_string(),
            ));
        }

        rules::validate_placement(&*self.repo, dto.parent_id, &slug, None).await?;

        let category = self
            .repo
            .insert(dto.parent_id, &dto.name, &slug, dto.active)
            .await?;

        tracing::info!("Category created: id={}, slug={}", category.id, category.slug);

        if !category.active {
            rules::cascade_deactivate(&*self.repo, category.id).await?;
        }

        Ok(category.into())
    }

    pub async fn update(&self, id: Uuid, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        let existing = self
            .repo
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", id)))?;

        let slug = effective_slug(
            &*self.transliterator,
            self.policy.allow_slug_change,
            dto.slug.as_deref(),
            Some(&existing.slug),
            &dto.name,
        );
        if slug.is_empty() {
            return Err(AppError::Validation(
                "A slug could not be derived from the name; provide one explicitly.".to_string(),
            ));
        }

        rules::validate_placement(&*self.repo, dto.parent_id, &slug, Some(id)).await?;

        let category = self
            .repo
            .update(id, dto.parent_id, &dto.name, &slug, dto.active)
            .await?;

        if !category.active {
            let flipped = rules::cascade_deactivate(&*self.repo, category.id).await?;
            if flipped > 0 {
                tracing::info!(
                    "Category deactivation cascaded: id={}, descendants_flipped={}",
                    category.id,
                    flipped
                );
            }
        }

        Ok(category.into())
    }

    /// Delete a category and, via the storage layer's referential action,
    /// its whole subtree.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.repo.delete(id).await?;
        tracing::info!("Category deleted: id={}", id);
        Ok(())
    }

    /// Bulk action: activate the selected categories and their direct children
    pub async fn activate(&self, ids: &[Uuid]) -> Result<u64> {
        let updated = rules::activate_selected(&*self.repo, ids).await?;
        tracing::info!("Bulk activate: selected={}, updated={}", ids.len(), updated);
        Ok(updated)
    }

    /// Bulk action: deactivate the selected categories and their direct children
    pub async fn deactivate(&self, ids: &[Uuid]) -> Result<u64> {
        let updated = rules::deactivate_selected(&*self.repo, ids).await?;
        tracing::info!("Bulk deactivate: selected={}, updated={}", ids.len(), updated);
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::slug::LatinFoldTransliterator;

    #[test]
    fn test_create_uses_submitted_slug_when_present() {
        let slug = effective_slug(&LatinFoldTransliterator, false, Some("tv-audio"), None, "TVs");
        assert_eq!(slug, "tv-audio");
    }

    #[test]
    fn test_create_derives_slug_when_blank() {
        let slug = effective_slug(&LatinFoldTransliterator, false, Some(""), None, "Home Café");
        assert_eq!(slug, "home-cafe");

        let slug = effective_slug(&LatinFoldTransliterator, false, None, None, "Home Café");
        assert_eq!(slug, "home-cafe");
    }

    #[test]
    fn test_update_keeps_stored_slug_when_changes_disallowed() {
        let slug = effective_slug(
            &LatinFoldTransliterator,
            false,
            Some("new-slug"),
            Some("old-slug"),
            "Renamed",
        );
        assert_eq!(slug, "old-slug");
    }

    #[test]
    fn test_update_honors_submitted_slug_when_changes_allowed() {
        let slug = effective_slug(
            &LatinFoldTransliterator,
            true,
            Some("new-slug"),
            Some("old-slug"),
            "Renamed",
        );
        assert_eq!(slug, "new-slug");
    }

    #[test]
    fn test_update_rederives_blank_slug_when_changes_allowed() {
        let slug = effective_slug(
            &LatinFoldTransliterator,
            true,
            None,
            Some("old-slug"),
            "Renamed Category",
        );
        assert_eq!(slug, "renamed-category");
    }
}
