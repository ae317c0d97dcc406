//! Menu and node data model.
//!
//! Mirrors the rows the external repositories return. Nodes belong to exactly
//! one menu; a menu is scoped to a store with a global fallback scope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Store scope identifier.
pub type StoreId = i64;

/// The global store scope a menu lookup falls back to.
pub const DEFAULT_STORE_ID: StoreId = 0;

/// Bucket sentinel for nodes without a parent (tree roots).
pub const ROOT_PARENT: i64 = 0;

/// A named navigation tree scoped to a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Menu {
    /// Database identity.
    pub menu_id: i64,
    /// Unique identifier within a store scope (e.g., "main-menu").
    pub identifier: String,
    /// Store scope this menu belongs to.
    #[serde(default)]
    pub store_id: StoreId,
    /// CSS class applied to the menu wrapper.
    #[serde(default)]
    pub css_class: String,
}

/// One entry in a menu tree.
///
/// The `node_type` tag selects the [`crate::provider::NodeTypeProvider`] that
/// renders the node's own fragment; everything else is display data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Database identity.
    pub node_id: i64,
    /// Parent node id; `None` for tree roots.
    #[serde(default)]
    pub parent_id: Option<i64>,
    /// Depth level, 0 for roots.
    #[serde(default)]
    pub level: u32,
    /// Inactive nodes are excluded from the index and never rendered.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Type tag dispatching to a node-type provider.
    #[serde(rename = "type")]
    pub node_type: String,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Type-specific content (URL, category id, page slug, ...).
    #[serde(default)]
    pub content: Option<String>,
    /// Extra CSS classes for the node's list item.
    #[serde(default)]
    pub classes: Option<String>,
    /// Link target (e.g., "_blank").
    #[serde(default)]
    pub target: Option<String>,
    /// Image file reference, resolved to a URL by the image resolver.
    #[serde(default)]
    pub image: Option<String>,
    /// Alt text for the image.
    #[serde(default)]
    pub image_alt_text: Option<String>,
    /// Custom template name overriding the provider's default.
    #[serde(default)]
    pub node_template: Option<String>,
    /// Custom submenu template name for this node's children.
    #[serde(default)]
    pub submenu_template: Option<String>,
    /// Arbitrary type-specific key/value data.
    #[serde(default)]
    pub additional_data: Value,
    /// Id of the entity this node links to (e.g., a CMS page), matched
    /// against the provider's current-request scope for the "active" marker.
    #[serde(default)]
    pub selected_item_id: Option<i64>,
}

fn default_true() -> bool {
    true
}

impl Node {
    /// Whether this node sits at the top level of the tree.
    pub fn is_root(&self) -> bool {
        self.level == 0
    }

    /// The (level, parent) bucket key this node indexes under.
    pub fn parent_key(&self) -> i64 {
        self.parent_id.unwrap_or(ROOT_PARENT)
    }
}
