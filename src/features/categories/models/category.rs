use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::shared::constants::PATH_SEPARATOR;

/// Database model for a category tree node
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Render the full ancestor path, root first, joined with " > ".
    ///
    /// `ancestors` must be ordered root-first and end at this node's parent.
    pub fn display_path(&self, ancestors: &[Category]) -> String {
        ancestors
            .iter()
            .map(|a| a.name.as_str())
            .chain(std::iter::once(self.name.as_str()))
            .collect::<Vec<_>>()
            .join(PATH_SEPARATOR)
    }
}

/// Category row annotated with its tree depth, as produced by the
/// tree-ordered listing query (depth 0 = root).
#[derive(Debug, Clone, FromRow)]
pub struct CategoryTreeRow {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub depth: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, parent_id: Option<Uuid>) -> Category {
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
    fn test_display_path_three_levels() {
        let a = node("Electronics", None);
        let b = node("Laptops", Some(a.id));
        let c = node("Gaming", Some(b.id));

        assert_eq!(
            c.display_path(&[a.clone(), b]),
            "Electronics > Laptops > Gaming"
        );
        assert_eq!(a.display_path(&[]), "Electronics");
    }
}
