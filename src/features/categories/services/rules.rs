//! Business rules for the category tree: placement validation, the
//! save-path deactivation cascade, and the one-level bulk actions.
//!
//! Everything here is written against the repository capabilities so the
//! rules run unchanged against the in-memory fake in tests.

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::repository::{BulkMutator, TreeRepository};

/// Validate a category's placement before it is written.
///
/// Rules, in order: the slug must not collide with a sibling's slug (roots
/// form one sibling group), a node may not be its own parent, and the chosen
/// parent may not be one of the node's descendants. `instance_id` is the node
/// being edited, absent on create.
pub async fn validate_placement<R: TreeRepository>(
    repo: &R,
    parent_id: Option<Uuid>,
    slug: &str,
    instance_id: Option<Uuid>,
) -> Result<()> {
    let sibling_slugs = repo.sibling_slugs(parent_id, instance_id).await?;
    if sibling_slugs.iter().any(|s| s == slug) {
        return Err(AppError::Validation(
            "The slug must be unique among the items at its level.".to_string(),
        ));
    }

    let (Some(parent_id), Some(instance_id)) = (parent_id, instance_id) else {
        return Ok(());
    };

    if parent_id == instance_id {
        return Err(AppError::Validation(
            "You can't set the parent of the item to itself.".to_string(),
        ));
    }

    let descendants = repo.descendants(instance_id).await?;
    if descendants.iter().any(|d| d.id == parent_id) {
        return Err(AppError::Validation(
            "You can't set the parent of the item to a descendant.".to_string(),
        ));
    }

    Ok(())
}

/// Save-path cascade: force every still-active transitive descendant of an
/// inactive node to inactive, one write per affected node. Returns the
/// number of nodes flipped.
///
/// A node can be activated without activating its descendants, so there is
/// deliberately no activation counterpart.
pub async fn cascade_deactivate<R>(repo: &R, id: Uuid) -> Result<u64>
where
    R: TreeRepository + BulkMutator,
{
    let mut flipped = 0;
    for item in repo.descendants(id).await? {
        if item.active {
            repo.set_active(item.id, false).await?;
            flipped += 1;
        }
    }

    Ok(flipped)
}

/// Bulk admin action: deactivate the selected categories and their children.
///
/// Selection is by primary key. Each selected row that is currently active is
/// set inactive, then only its direct children are bulk-updated - one level,
/// not the full subtree. Already-inactive rows are skipped entirely. Returns
/// the number of selected rows written.
pub async fn deactivate_selected<R>(repo: &R, ids: &[Uuid]) -> Result<u64>
where
    R: TreeRepository + BulkMutator,
{
    let mut updated = 0;
    for item in repo.get_by_ids(ids).await? {
        if item.active {
            repo.set_active(item.id, false).await?;
            repo.set_children_active(item.id, false).await?;
            updated += 1;
        }
    }

    Ok(updated)
}

/// Bulk admin action: activate the selected categories and their children.
///
/// Unlike deactivation, activation is unconditional - every selected row is
/// written, active or not. Direct children only.
pub async fn activate_selected<R>(repo: &R, ids: &[Uuid]) -> Result<u64>
where
    R: TreeRepository + BulkMutator,
{
    let mut updated = 0;
    for item in repo.get_by_ids(ids).await? {
        repo.set_active(item.id, true).await?;
        repo.set_children_active(item.id, true).await?;
        updated += 1;
    }

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::FakeTree;

    fn assert_validation_message(result: Result<()>, expected: &str) {
        match result {
            Err(AppError::Validation(msg)) => assert_eq!(msg, expected),
            other => panic!("expected validation error, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_duplicate_sibling_slug_is_rejected() {
        let tree = FakeTree::new();
        let root = tree.add_root("Electronics");
        tree.add_child(root, "Laptops");

        let result = validate_placement(&tree, Some(root), "laptops", None).await;
        assert_validation_message(
            result,
            "The slug must be unique among the items at its level.",
        );
    }

    #[tokio::test]
    async fn test_duplicate_root_slug_is_rejected() {
        let tree = FakeTree::new();
        tree.add_root("Electronics");

        let result = validate_placement(&tree, None, "electronics", None).await;
        assert_validation_message(
            result,
            "The slug must be unique among the items at its level.",
        );
    }

    #[tokio::test]
    async fn test_same_slug_at_different_levels_is_allowed() {
        let tree = FakeTree::new();
        let root = tree.add_root("Electronics");

        // "electronics" exists at root level; fine one level down
        let result = validate_placement(&tree, Some(root), "electronics", None).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_instance_is_excluded_from_slug_check() {
        let tree = FakeTree::new();
        let root = tree.add_root("Electronics");

        // re-saving a node with its own slug must not self-collide
        let result = validate_placement(&tree, None, "electronics", Some(root)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_self_parent_is_rejected() {
        let tree = FakeTree::new();
        let root = tree.add_root("Electronics");

        let result = validate_placement(&tree, Some(root), "electronics-2", Some(root)).await;
        assert_validation_message(result, "You can't set the parent of the item to itself.");
    }

    #[tokio::test]
    async fn test_descendant_parent_is_rejected() {
        let tree = FakeTree::new();
        let root = tree.add_root("Electronics");
        let child = tree.add_child(root, "Laptops");
        let grandchild = tree.add_child(child, "Gaming");

        let result =
            validate_placement(&tree, Some(grandchild), "electronics-2", Some(root)).await;
        assert_validation_message(
            result,
            "You can't set the parent of the item to a descendant.",
        );
    }

    #[tokio::test]
    async fn test_valid_reparenting_passes() {
        let tree = FakeTree::new();
        let root = tree.add_root("Electronics");
        let other = tree.add_root("Books");
        let child = tree.add_child(root, "Laptops");

        let result = validate_placement(&tree, Some(other), "laptops", Some(child)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_cascade_deactivate_flips_all_descendants() {
        let tree = FakeTree::new();
        let electronics = tree.add_root("Electronics");
        let laptops = tree.add_child(electronics, "Laptops");
        let gaming = tree.add_child(laptops, "Gaming");

        let flipped = cascade_deactivate(&tree, electronics).await.unwrap();

        assert_eq!(flipped, 2);
        assert!(!tree.get(laptops).active);
        assert!(!tree.get(gaming).active);
    }

    #[tokio::test]
    async fn test_cascade_deactivate_skips_already_inactive() {
        let tree = FakeTree::new();
        let electronics = tree.add_root("Electronics");
        let laptops = tree.add_child(electronics, "Laptops");
        let gaming = tree.add_child(laptops, "Gaming");
        tree.set_inactive(gaming);

        let flipped = cascade_deactivate(&tree, electronics).await.unwrap();

        assert_eq!(flipped, 1);
        assert!(!tree.get(laptops).active);
    }

    #[tokio::test]
    async fn test_deactivate_selected_touches_direct_children_only() {
        let tree = FakeTree::new();
        let electronics = tree.add_root("Electronics");
        let laptops = tree.add_child(electronics, "Laptops");
        let gaming = tree.add_child(laptops, "Gaming");

        let updated = deactivate_selected(&tree, &[electronics]).await.unwrap();

        assert_eq!(updated, 1);
        assert!(!tree.get(electronics).active);
        assert!(!tree.get(laptops).active);
        // one level only: the grandchild keeps its flag
        assert!(tree.get(gaming).active);
    }

    #[tokio::test]
    async fn test_deactivate_selected_skips_inactive_rows() {
        let tree = FakeTree::new();
        let electronics = tree.add_root("Electronics");
        let laptops = tree.add_child(electronics, "Laptops");
        tree.set_inactive(electronics);

        let updated = deactivate_selected(&tree, &[electronics]).await.unwrap();

        // the row was already inactive, so neither it nor its children are touched
        assert_eq!(updated, 0);
        assert!(tree.get(laptops).active);
    }

    #[tokio::test]
    async fn test_activate_selected_is_unconditional_and_one_level() {
        let tree = FakeTree::new();
        let electronics = tree.add_root("Electronics");
        let laptops = tree.add_child(electronics, "Laptops");
        let gaming = tree.add_child(laptops, "Gaming");
        tree.set_inactive(electronics);
        tree.set_inactive(laptops);
        tree.set_inactive(gaming);

        let updated = activate_selected(&tree, &[electronics]).await.unwrap();

        assert_eq!(updated, 1);
        assert!(tree.get(electronics).active);
        assert!(tree.get(laptops).active);
        // grandchild stays inactive: activation is one level deep too
        assert!(!tree.get(gaming).active);
    }

    #[tokio::test]
    async fn test_selection_ignores_unknown_ids() {
        let tree = FakeTree::new();
        let electronics = tree.add_root("Electronics");

        let updated = activate_selected(&tree, &[electronics, Uuid::new_v4()])
            .await
            .unwrap();

        assert_eq!(updated, 1);
    }
}
