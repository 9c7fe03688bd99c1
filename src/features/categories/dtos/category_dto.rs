use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::{Category, CategoryTreeRow};
use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::shared::validation::SLUG_REGEX;

/// Query params for the public category listing
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListCategoriesQuery {
    /// If true, return the active categories as a nested tree
    #[serde(default)]
    pub tree: bool,

    /// If true, return the flat list of active categories.
    /// Default (neither flag): root-level categories only.
    #[serde(default)]
    pub active: bool,
}

/// Response DTO for a category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub active: bool,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            parent_id: c.parent_id,
            name: c.name,
            slug: c.slug,
            active: c.active,
        }
    }
}

/// Query params for the admin category listing
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct AdminCategoryQuery {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    /// Free-text search on the category name
    pub search: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl AdminCategoryQuery {
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }

    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

/// Response DTO for category detail lookup by path
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryDetailDto {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub active: bool,
    /// Full ancestor path joined with " > ", e.g. "Electronics > Laptops > Gaming"
    pub path: String,
    pub children: Vec<CategoryResponseDto>,
}

impl CategoryDetailDto {
    /// Assemble a detail response from a row, its root-first ancestor chain,
    /// and its direct children.
    pub fn from_parts(
        category: Category,
        ancestors: &[Category],
        children: Vec<Category>,
    ) -> Self {
        let path = category.display_path(ancestors);
        Self {
            id: category.id,
            parent_id: category.parent_id,
            name: category.name,
            slug: category.slug,
            active: category.active,
            path,
            children: children.into_iter().map(|c| c.into()).collect(),
        }
    }
}

/// Response DTO for the tree-ordered admin listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminCategoryDto {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub active: bool,
    /// Tree depth (0 = root); rows arrive in depth-first tree order
    pub depth: i32,
}

impl From<CategoryTreeRow> for AdminCategoryDto {
    fn from(r: CategoryTreeRow) -> Self {
        Self {
            id: r.id,
            parent_id: r.parent_id,
            name: r.name,
            slug: r.slug,
            active: r.active,
            depth: r.depth,
        }
    }
}

/// Response DTO for category tree (hierarchical structure)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(no_recursion)]
pub struct CategoryTreeDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub children: Vec<CategoryTreeDto>,
}

impl CategoryTreeDto {
    /// Build tree from flat list of categories
    pub fn build_tree(categories: Vec<Category>) -> Vec<CategoryTreeDto> {
        // Get root categories (parent_id is None)
        let roots: Vec<&Category> = categories
            .iter()
            .filter(|c| c.parent_id.is_none())
            .collect();

        // Build tree recursively
        roots
            .into_iter()
            .map(|root| Self::build_node(root, &categories))
            .collect()
    }

    fn build_node(category: &Category, all_categories: &[Category]) -> CategoryTreeDto {
        let children: Vec<CategoryTreeDto> = all_categories
            .iter()
            .filter(|c| c.parent_id == Some(category.id))
            .map(|child| Self::build_node(child, all_categories))
            .collect();

        CategoryTreeDto {
            id: category.id,
            name: category.name.clone(),
            slug: category.slug.clone(),
            children,
        }
    }
}

// Create request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    pub parent_id: Option<Uuid>,

    #[validate(length(min = 1, max = 100))]
    pub name: String,

    /// Optional explicit slug; derived from the name when absent
    #[validate(length(max = 50), regex(path = *SLUG_REGEX, message = "slug must be lowercase alphanumeric with single hyphens (e.g. 'gaming-laptops')"))]
    pub slug: Option<String>,

    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

// Update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    pub parent_id: Option<Uuid>,

    #[validate(length(min = 1, max = 100))]
    pub name: String,

    /// Honored only when slug changes are allowed by configuration
    #[validate(length(max = 50), regex(path = *SLUG_REGEX, message = "slug must be lowercase alphanumeric with single hyphens (e.g. 'gaming-laptops')"))]
    pub slug: Option<String>,

    pub active: bool,
}

/// Selection of categories for a bulk action, by primary key
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BulkSelectionDto {
    #[validate(length(min = 1))]
    pub ids: Vec<Uuid>,
}

/// Result of a bulk activate/deactivate action
#[derive(Debug, Serialize, ToSchema)]
pub struct BulkActionResultDto {
    /// Number of selected categories whose flag was written
    pub updated: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn category(name: &str, parent_id: Option<Uuid>) -> Category {
        Category {
            id: Uuid::new_v4(),
            parent_id,
            name: name.to_string(),
            slug: name.to_lowercase(),
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_build_tree_nests_children_under_parents() {
        let root = category("Electronics", None);
        let child = category("Laptops", Some(root.id));
        let grandchild = category("Gaming", Some(child.id));
        let other_root = category("Books", None);

        let tree =
            CategoryTreeDto::build_tree(vec![root, child, grandchild, other_root]);

        assert_eq!(tree.len(), 2);
        let electronics = tree.iter().find(|n| n.name == "Electronics").unwrap();
        assert_eq!(electronics.children.len(), 1);
        assert_eq!(electronics.children[0].name, "Laptops");
        assert_eq!(electronics.children[0].children[0].name, "Gaming");
        let books = tree.iter().find(|n| n.name == "Books").unwrap();
        assert!(books.children.is_empty());
    }
}
