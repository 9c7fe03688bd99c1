use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::categories::models::Category;
use crate::features::categories::repository::{BulkMutator, TreeRepository};
use crate::shared::slug::slugify;

/// In-memory category tree implementing the repository capabilities, used to
/// exercise the business rules without a database.
pub struct FakeTree {
    nodes: Mutex<Vec<Category>>,
}

impl FakeTree {
    pub fn new() -> Self {
        Self {
            nodes: Mutex::new(Vec::new()),
        }
    }

    pub fn add_root(&self, name: &str) -> Uuid {
        self.add(None, name)
    }

    pub fn add_child(&self, parent_id: Uuid, name: &str) -> Uuid {
        self.add(Some(parent_id), name)
    }

    fn add(&self, parent_id: Option<Uuid>, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.nodes.lock().unwrap().push(Category {
            id,
            parent_id,
            name: name.to_string(),
            slug: slugify(name),
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
        id
    }

    pub fn set_inactive(&self, id: Uuid) {
        let mut nodes = self.nodes.lock().unwrap();
        let node = nodes.iter_mut().find(|n| n.id == id).unwrap();
        node.active = false;
    }

    pub fn get(&self, id: Uuid) -> Category {
        self.nodes
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .unwrap()
    }

    fn collect_descendants(nodes: &[Category], id: Uuid, out: &mut Vec<Category>) {
        for node in nodes.iter().filter(|n| n.parent_id == Some(id)) {
            out.push(node.clone());
            Self::collect_descendants(nodes, node.id, out);
        }
    }
}

#[async_trait]
impl TreeRepository for FakeTree {
    async fn get(&self, id: Uuid) -> Result<Option<Category>> {
        Ok(self
            .nodes
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.id == id)
            .cloned())
    }

    async fn get_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Category>> {
        Ok(self
            .nodes
            .lock()
            .unwrap()
            .iter()
            .filter(|n| ids.contains(&n.id))
            .cloned()
            .collect())
    }

    async fn children(&self, id: Uuid) -> Result<Vec<Category>> {
        Ok(self
            .nodes
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.parent_id == Some(id))
            .cloned()
            .collect())
    }

    async fn descendants(&self, id: Uuid) -> Result<Vec<Category>> {
        let nodes = self.nodes.lock().unwrap();
        let mut out = Vec::new();
        Self::collect_descendants(&nodes, id, &mut out);
        Ok(out)
    }

    async fn ancestors(&self, id: Uuid) -> Result<Vec<Category>> {
        let nodes = self.nodes.lock().unwrap();
        let mut chain = Vec::new();
        let mut current = nodes
            .iter()
            .find(|n| n.id == id)
            .and_then(|n| n.parent_id);
        while let Some(parent_id) = current {
            let parent = nodes.iter().find(|n| n.id == parent_id).unwrap().clone();
            current = parent.parent_id;
            chain.push(parent);
        }
        chain.reverse();
        Ok(chain)
    }

    async fn sibling_slugs(
        &self,
        parent_id: Option<Uuid>,
        exclude: Option<Uuid>,
    ) -> Result<Vec<String>> {
        Ok(self
            .nodes
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.parent_id == parent_id && Some(n.id) != exclude)
            .map(|n| n.slug.clone())
            .collect())
    }
}

#[async_trait]
impl BulkMutator for FakeTree {
    async fn set_active(&self, id: Uuid, active: bool) -> Result<()> {
        let mut nodes = self.nodes.lock().unwrap();
        if let Some(node) = nodes.iter_mut().find(|n| n.id == id) {
            node.active = active;
        }
        Ok(())
    }

    async fn set_children_active(&self, parent_id: Uuid, active: bool) -> Result<u64> {
        let mut nodes = self.nodes.lock().unwrap();
        let mut updated = 0;
        for node in nodes.iter_mut().filter(|n| n.parent_id == Some(parent_id)) {
            node.active = active;
            updated += 1;
        }
        Ok(updated)
    }
}
