//! Repository seams for menu and node data.
//!
//! The storefront's persistence layer stays external; the renderer only needs
//! these two lookups. In-memory implementations ship for tests and for
//! embedding the renderer without a database.

use std::collections::HashMap;

use anyhow::Result;
use tracing::debug;

use crate::model::{DEFAULT_STORE_ID, Menu, Node, StoreId};

/// Lookup of menus by identifier within a store scope.
pub trait MenuRepository {
    /// Get the menu with this identifier in this store scope, if any.
    fn get(&self, identifier: &str, store_id: StoreId) -> Result<Option<Menu>>;
}

/// Lookup of all nodes belonging to a menu.
pub trait NodeRepository {
    /// All nodes of the menu, in load order. Includes inactive nodes; the
    /// index builder filters them.
    fn get_by_menu(&self, menu_id: i64) -> Result<Vec<Node>>;
}

/// Resolve a menu, falling back to the global store scope.
///
/// Returns `Ok(None)` when neither scope has the menu — callers treat that as
/// "no menu", never as an error.
pub fn load_menu(
    repository: &dyn MenuRepository,
    identifier: &str,
    store_id: StoreId,
) -> Result<Option<Menu>> {
    if let Some(menu) = repository.get(identifier, store_id)? {
        return Ok(Some(menu));
    }

    let fallback = repository.get(identifier, DEFAULT_STORE_ID)?;
    if fallback.is_none() {
        debug!(
            menu = %identifier,
            store = %store_id,
            "menu not found in store or default scope"
        );
    }
    Ok(fallback)
}

/// In-memory menu and node store.
///
/// Menus are keyed by (identifier, store scope), nodes by menu id, preserving
/// insertion order within a menu.
#[derive(Debug, Default)]
pub struct InMemoryMenuStore {
    menus: HashMap<(String, StoreId), Menu>,
    nodes: HashMap<i64, Vec<Node>>,
}

impl InMemoryMenuStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a menu, replacing any existing menu with the same scope key.
    pub fn add_menu(&mut self, menu: Menu) {
        self.menus
            .insert((menu.identifier.clone(), menu.store_id), menu);
    }

    /// Append a node to a menu.
    pub fn add_node(&mut self, menu_id: i64, node: Node) {
        self.nodes.entry(menu_id).or_default().push(node);
    }
}

impl MenuRepository for InMemoryMenuStore {
    fn get(&self, identifier: &str, store_id: StoreId) -> Result<Option<Menu>> {
        Ok(self
            .menus
            .get(&(identifier.to_string(), store_id))
            .cloned())
    }
}

impl NodeRepository for InMemoryMenuStore {
    fn get_by_menu(&self, menu_id: i64) -> Result<Vec<Node>> {
        Ok(self.nodes.get(&menu_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn menu(id: i64, identifier: &str, store_id: StoreId) -> Menu {
        Menu {
            menu_id: id,
            identifier: identifier.to_string(),
            store_id,
            css_class: String::new(),
        }
    }

    #[test]
    fn load_menu_prefers_requested_store() {
        let mut store = InMemoryMenuStore::new();
        store.add_menu(menu(1, "main-menu", DEFAULT_STORE_ID));
        store.add_menu(menu(2, "main-menu", 5));

        let found = load_menu(&store, "main-menu", 5).unwrap().unwrap();
        assert_eq!(found.menu_id, 2);
    }

    #[test]
    fn load_menu_falls_back_to_default_store() {
        let mut store = InMemoryMenuStore::new();
        store.add_menu(menu(1, "main-menu", DEFAULT_STORE_ID));

        let found = load_menu(&store, "main-menu", 5).unwrap().unwrap();
        assert_eq!(found.menu_id, 1);
        assert_eq!(found.store_id, DEFAULT_STORE_ID);
    }

    #[test]
    fn load_menu_missing_everywhere_is_none() {
        let store = InMemoryMenuStore::new();
        assert!(load_menu(&store, "footer", 1).unwrap().is_none());
    }

    #[test]
    fn nodes_preserve_insertion_order() {
        let mut store = InMemoryMenuStore::new();
        for id in [10, 11, 12] {
            store.add_node(
                1,
                serde_json::from_value(serde_json::json!({
                    "node_id": id,
                    "type": "custom",
                }))
                .unwrap(),
            );
        }

        let nodes = store.get_by_menu(1).unwrap();
        let ids: Vec<i64> = nodes.iter().map(|n| n.node_id).collect();
        assert_eq!(ids, vec![10, 11, 12]);
    }
}
