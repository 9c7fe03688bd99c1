use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::{Category, CategoryTreeRow};

/// Read-side tree queries over the category hierarchy.
#[async_trait]
pub trait TreeRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Category>>;

    /// Fetch rows by primary key, in no particular order. Unknown ids are
    /// silently dropped.
    async fn get_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Category>>;

    async fn children(&self, id: Uuid) -> Result<Vec<Category>>;

    /// All transitive descendants of a node.
    async fn descendants(&self, id: Uuid) -> Result<Vec<Category>>;

    /// Ancestor chain of a node, root first, ending at the node's parent.
    async fn ancestors(&self, id: Uuid) -> Result<Vec<Category>>;

    /// Slugs of the sibling group for the given parent (all roots when the
    /// parent is absent), excluding `exclude` when present.
    async fn sibling_slugs(&self, parent_id: Option<Uuid>, exclude: Option<Uuid>)
        -> Result<Vec<String>>;
}

/// Scoped write operations on the active flag.
#[async_trait]
pub trait BulkMutator: Send + Sync {
    async fn set_active(&self, id: Uuid, active: bool) -> Result<()>;

    /// One-level bulk update: flips only the direct children of `parent_id`.
    async fn set_children_active(&self, parent_id: Uuid, active: bool) -> Result<u64>;
}

/// Convert database error to more specific AppError with user-friendly messages
fn handle_db_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        // Unique constraint violation (PostgreSQL error code 23505)
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23505")) {
            return AppError::Conflict(
                "A category with this name already exists at this level.".to_string(),
            );
        }

        // Foreign key violation (PostgreSQL error code 23503)
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23503")) {
            return AppError::BadRequest("The selected parent does not exist.".to_string());
        }
    }

    AppError::Database(e)
}

/// Postgres-backed category store. Implements the tree-read and bulk-write
/// capabilities consumed by the business rules, plus the service queries.
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Flat list of active categories, ordered by name
    pub async fn list_active(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, parent_id, name, slug, active, created_at, updated_at
            FROM categories
            WHERE active = TRUE
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list active categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories)
    }

    /// Root-level categories (tree depth zero), ordered by name
    pub async fn list_roots(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, parent_id, name, slug, active, created_at, updated_at
            FROM categories
            WHERE parent_id IS NULL
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list root categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories)
    }

    /// Tree-ordered listing (depth-first, siblings by name) with optional
    /// name search and pagination. Returns rows annotated with their depth.
    pub async fn list_tree(
        &self,
        search: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<CategoryTreeRow>> {
        let rows = sqlx::query_as::<_, CategoryTreeRow>(
            r#"
            WITH RECURSIVE tree AS (
                SELECT c.id, c.parent_id, c.name, c.slug, c.active,
                       c.created_at, c.updated_at,
                       0 AS depth, ARRAY[c.name]::text[] AS name_path
                FROM categories c
                WHERE c.parent_id IS NULL
                UNION ALL
                SELECT c.id, c.parent_id, c.name, c.slug, c.active,
                       c.created_at, c.updated_at,
                       t.depth + 1, t.name_path || c.name::text
                FROM categories c
                JOIN tree t ON c.parent_id = t.id
            )
            SELECT id, parent_id, name, slug, active, created_at, updated_at, depth
            FROM tree
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
            ORDER BY name_path
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(search)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list category tree: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(rows)
    }

    pub async fn count(&self, search: Option<&str>) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM categories
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
            "#,
        )
        .bind(search)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(total)
    }

    /// Resolve a chain of slugs (root first, leaf last) to the single
    /// category whose ancestor slug path equals the chain.
    pub async fn resolve_slug_path(&self, slugs: &[String]) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            WITH RECURSIVE tree AS (
                SELECT c.id, c.parent_id, c.name, c.slug, c.active,
                       c.created_at, c.updated_at,
                       ARRAY[c.slug]::text[] AS slug_path
                FROM categories c
                WHERE c.parent_id IS NULL
                UNION ALL
                SELECT c.id, c.parent_id, c.name, c.slug, c.active,
                       c.created_at, c.updated_at,
                       t.slug_path || c.slug::text
                FROM categories c
                JOIN tree t ON c.parent_id = t.id
            )
            SELECT id, parent_id, name, slug, active, created_at, updated_at
            FROM tree
            WHERE slug_path = $1
            "#,
        )
        .bind(slugs)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to resolve category path: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(category)
    }

    pub async fn insert(
        &self,
        parent_id: Option<Uuid>,
        name: &str,
        slug: &str,
        active: bool,
    ) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (parent_id, name, slug, active)
            VALUES ($1, $2, $3, $4)
            RETURNING id, parent_id, name, slug, active, created_at, updated_at
            "#,
        )
        .bind(parent_id)
        .bind(name)
        .bind(slug)
        .bind(active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert category: {:?}", e);
            handle_db_error(e)
        })?;

        Ok(category)
    }

    pub async fn update(
        &self,
        id: Uuid,
        parent_id: Option<Uuid>,
        name: &str,
        slug: &str,
        active: bool,
    ) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET parent_id = $2, name = $3, slug = $4, active = $5
            WHERE id = $1
            RETURNING id, parent_id, name, slug, active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(parent_id)
        .bind(name)
        .bind(slug)
        .bind(active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update category: {:?}", e);
            handle_db_error(e)
        })?;

        category.ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", id)))
    }

    /// Delete a category. The subtree goes with it via the parent FK's
    /// ON DELETE CASCADE.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete category: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category '{}' not found", id)));
        }

        Ok(())
    }
}

#[async_trait]
impl TreeRepository for CategoryRepository {
    async fn get(&self, id: Uuid) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, parent_id, name, slug, active, created_at, updated_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(category)
    }

    async fn get_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, parent_id, name, slug, active, created_at, updated_at
            FROM categories
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get categories by ids: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories)
    }

    async fn children(&self, id: Uuid) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, parent_id, name, slug, active, created_at, updated_at
            FROM categories
            WHERE parent_id = $1
            ORDER BY name
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list children: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories)
    }

    async fn descendants(&self, id: Uuid) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            WITH RECURSIVE descendants AS (
                SELECT c.id, c.parent_id, c.name, c.slug, c.active,
                       c.created_at, c.updated_at
                FROM categories c
                WHERE c.parent_id = $1
                UNION ALL
                SELECT c.id, c.parent_id, c.name, c.slug, c.active,
                       c.created_at, c.updated_at
                FROM categories c
                JOIN descendants d ON c.parent_id = d.id
            )
            SELECT id, parent_id, name, slug, active, created_at, updated_at
            FROM descendants
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list descendants: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories)
    }

    async fn ancestors(&self, id: Uuid) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            WITH RECURSIVE ancestors AS (
                SELECT c.id, c.parent_id, c.name, c.slug, c.active,
                       c.created_at, c.updated_at, 0 AS height
                FROM categories c
                WHERE c.id = (SELECT parent_id FROM categories WHERE id = $1)
                UNION ALL
                SELECT c.id, c.parent_id, c.name, c.slug, c.active,
                       c.created_at, c.updated_at, a.height + 1
                FROM categories c
                JOIN ancestors a ON c.id = a.parent_id
            )
            SELECT id, parent_id, name, slug, active, created_at, updated_at
            FROM ancestors
            ORDER BY height DESC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list ancestors: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories)
    }

    async fn sibling_slugs(
        &self,
        parent_id: Option<Uuid>,
        exclude: Option<Uuid>,
    ) -> Result<Vec<String>> {
        let slugs = sqlx::query_scalar::<_, String>(
            r#"
            SELECT slug FROM categories
            WHERE parent_id IS NOT DISTINCT FROM $1
              AND ($2::uuid IS NULL OR id <> $2)
            "#,
        )
        .bind(parent_id)
        .bind(exclude)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list sibling slugs: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(slugs)
    }
}

#[async_trait]
impl BulkMutator for CategoryRepository {
    async fn set_active(&self, id: Uuid, active: bool) -> Result<()> {
        sqlx::query("UPDATE categories SET active = $2 WHERE id = $1")
            .bind(id)
            .bind(active)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to set active flag: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(())
    }

    async fn set_children_active(&self, parent_id: Uuid, active: bool) -> Result<u64> {
        let result = sqlx::query("UPDATE categories SET active = $2 WHERE parent_id = $1")
            .bind(parent_id)
            .bind(active)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to set children active flag: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected())
    }
}
