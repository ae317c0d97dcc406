//! Node index — (level, parent) lookup table built once per render pass.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use crate::model::{Node, ROOT_PARENT};

/// Precomputed (level, parent) → children lookup table.
///
/// Built in a single pass over a menu's full node set: inactive nodes are
/// dropped, survivors are stored once and addressed by slot from both the
/// `(level, parent)` buckets (in load order) and the per-type groups used by
/// the provider batch-prepare pass.
#[derive(Debug, Default)]
pub struct NodeIndex {
    nodes: Vec<Node>,
    buckets: HashMap<(u32, i64), Vec<usize>>,
    by_type: BTreeMap<String, Vec<usize>>,
}

impl NodeIndex {
    /// Build the index from a menu's node set.
    pub fn build(nodes: Vec<Node>) -> Self {
        let total = nodes.len();
        let mut index = Self::default();
        let mut ids_by_level: HashMap<u32, HashSet<i64>> = HashMap::new();

        for node in nodes {
            if !node.is_active {
                continue;
            }

            ids_by_level.entry(node.level).or_default().insert(node.node_id);

            let slot = index.nodes.len();
            index
                .by_type
                .entry(node.node_type.clone())
                .or_default()
                .push(slot);
            index
                .buckets
                .entry((node.level, node.parent_key()))
                .or_default()
                .push(slot);
            index.nodes.push(node);
        }

        // Orphaned nodes (parent missing at level-1) are never visited by the
        // recursive walk; they stay in the index but degrade to empty results.
        let orphans = index
            .buckets
            .iter()
            .filter(|((level, parent), _)| {
                *level > 0
                    && !ids_by_level
                        .get(&(level - 1))
                        .is_some_and(|ids| ids.contains(parent))
            })
            .map(|(_, bucket)| bucket.len())
            .sum::<usize>();
        if orphans > 0 {
            debug!(orphans, "index contains unreachable nodes");
        }

        debug!(
            total,
            active = index.nodes.len(),
            types = index.by_type.len(),
            "node index built"
        );

        index
    }

    /// Active children of a parent node at the given level.
    ///
    /// `None` parent addresses the tree root. A missing bucket is an empty
    /// result, covering leaf nodes and menus with gaps.
    pub fn children(&self, level: u32, parent: Option<&Node>) -> Vec<&Node> {
        let parent_id = parent.map_or(ROOT_PARENT, |p| p.node_id);
        self.buckets
            .get(&(level, parent_id))
            .map_or_else(Vec::new, |slots| {
                slots.iter().map(|&slot| &self.nodes[slot]).collect()
            })
    }

    /// Active nodes grouped by type tag, in deterministic tag order.
    pub fn types(&self) -> impl Iterator<Item = (&str, Vec<&Node>)> {
        self.by_type.iter().map(|(tag, slots)| {
            (
                tag.as_str(),
                slots.iter().map(|&slot| &self.nodes[slot]).collect(),
            )
        })
    }

    /// Type tags present among the active nodes, in deterministic order.
    pub fn type_tags(&self) -> impl Iterator<Item = &str> {
        self.by_type.keys().map(String::as_str)
    }

    /// Find an active node by id.
    pub fn find(&self, node_id: i64) -> Option<&Node> {
        self.nodes.iter().find(|node| node.node_id == node_id)
    }

    /// Number of active nodes in the index.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the index holds no active nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
