//! Node-type providers — pluggable renderers keyed by type tag.
//!
//! Each menu node carries a string type tag ("category", "cms_page",
//! "custom", ...). The registry maps tags to provider objects implementing
//! the four-method contract: batch data preparation, fragment rendering,
//! view-all-link capability, and cache key contribution. Unknown tags are a
//! configuration error and fail fast, before any markup is emitted.

mod category;
mod cms_page;
mod custom;

pub use category::{CategoryInfo, CategoryNodeProvider, CategorySource};
pub use cms_page::CmsPageNodeProvider;
pub use custom::CustomNodeProvider;

use std::collections::HashMap;

use tracing::debug;

use crate::error::{MenuError, MenuResult};
use crate::model::Node;

/// Configuration snapshot a provider renders a node with.
///
/// Assembled fresh for every node so recursive branches never share mutable
/// state.
#[derive(Debug)]
pub struct NodeView<'a> {
    /// The node being rendered.
    pub node: &'a Node,
    /// Depth level of the node.
    pub level: u32,
    /// Whether the node sits at the top of the tree.
    pub is_root: bool,
    /// Whether the node has rendered children.
    pub is_parent: bool,
    /// Whether this fragment is the "view all" variant of the node.
    pub is_view_all_link: bool,
    /// CSS class of the enclosing menu ("" when the menu is missing).
    pub menu_class: &'a str,
    /// Identifier of the enclosing menu.
    pub menu_identifier: &'a str,
    /// Resolved public URL of the node's image, when it has one.
    pub image_url: Option<String>,
}

/// Pluggable renderer and cache-key contributor for one node type.
pub trait NodeTypeProvider {
    /// Batch-precompute data for all nodes of this type.
    ///
    /// Invoked once per type before any render call, so providers can resolve
    /// URLs or counts in one lookup instead of N.
    fn prepare_data(&mut self, _nodes: &[&Node]) -> MenuResult<()> {
        Ok(())
    }

    /// Render the node's own fragment (excluding the `<li>` wrapper and any
    /// nested submenu, which the tree renderer emits).
    fn render(&self, view: &NodeView<'_>) -> MenuResult<String>;

    /// Whether submenus of this type may carry a trailing "view all" link.
    fn is_view_all_link_allowed(&self) -> bool {
        false
    }

    /// Extra cache key parts for the current request context.
    fn node_cache_key_info(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Registry of node-type providers, resolved at configuration time.
#[derive(Default)]
pub struct NodeTypeRegistry {
    providers: HashMap<String, Box<dyn NodeTypeProvider>>,
}

impl NodeTypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider under a type tag.
    ///
    /// Registering the same tag twice is a configuration error.
    pub fn register(
        &mut self,
        node_type: &str,
        provider: Box<dyn NodeTypeProvider>,
    ) -> MenuResult<()> {
        if self.providers.contains_key(node_type) {
            return Err(MenuError::DuplicateNodeType(node_type.to_string()));
        }
        self.providers.insert(node_type.to_string(), provider);
        debug!(node_type = %node_type, "node type provider registered");
        Ok(())
    }

    /// Look up the provider for a type tag.
    pub fn get(&self, node_type: &str) -> MenuResult<&dyn NodeTypeProvider> {
        self.providers
            .get(node_type)
            .map(Box::as_ref)
            .ok_or_else(|| MenuError::UnknownNodeType(node_type.to_string()))
    }

    /// Validate that every tag in `types` has a provider.
    ///
    /// Called before rendering starts so an unknown tag aborts the pass with
    /// no partial markup.
    pub fn ensure_known<'a>(&self, types: impl IntoIterator<Item = &'a str>) -> MenuResult<()> {
        for node_type in types {
            if !self.providers.contains_key(node_type) {
                return Err(MenuError::UnknownNodeType(node_type.to_string()));
            }
        }
        Ok(())
    }

    /// Run the batch-prepare pass for one type group.
    pub fn prepare_data(&mut self, node_type: &str, nodes: &[&Node]) -> MenuResult<()> {
        let provider = self
            .providers
            .get_mut(node_type)
            .ok_or_else(|| MenuError::UnknownNodeType(node_type.to_string()))?;
        provider.prepare_data(nodes)
    }

    /// Render one node through its type's provider.
    pub fn render(&self, view: &NodeView<'_>) -> MenuResult<String> {
        self.get(&view.node.node_type)?.render(view)
    }

    /// Whether the given type allows a "view all" link.
    pub fn is_view_all_link_allowed(&self, node_type: &str) -> MenuResult<bool> {
        Ok(self.get(node_type)?.is_view_all_link_allowed())
    }

    /// Registered type tags.
    pub fn type_names(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }
}

impl std::fmt::Debug for NodeTypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeTypeRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    struct TitleProvider;

    impl NodeTypeProvider for TitleProvider {
        fn render(&self, view: &NodeView<'_>) -> MenuResult<String> {
            Ok(format!("<span>{}</span>", view.node.title))
        }
    }

    fn node(node_type: &str, title: &str) -> Node {
        serde_json::from_value(serde_json::json!({
            "node_id": 1,
            "type": node_type,
            "title": title,
        }))
        .unwrap()
    }

    fn view<'a>(node: &'a Node) -> NodeView<'a> {
        NodeView {
            node,
            level: 0,
            is_root: true,
            is_parent: false,
            is_view_all_link: false,
            menu_class: "",
            menu_identifier: "main-menu",
            image_url: None,
        }
    }

    #[test]
    fn register_and_render() {
        let mut registry = NodeTypeRegistry::new();
        registry.register("custom", Box::new(TitleProvider)).unwrap();

        let node = node("custom", "Home");
        let html = registry.render(&view(&node)).unwrap();
        assert_eq!(html, "<span>Home</span>");
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut registry = NodeTypeRegistry::new();
        registry.register("custom", Box::new(TitleProvider)).unwrap();
        let err = registry
            .register("custom", Box::new(TitleProvider))
            .unwrap_err();
        assert!(matches!(err, MenuError::DuplicateNodeType(t) if t == "custom"));
    }

    #[test]
    fn unknown_type_is_configuration_error() {
        let registry = NodeTypeRegistry::new();
        let node = node("widget", "X");
        let err = registry.render(&view(&node)).unwrap_err();
        assert!(matches!(err, MenuError::UnknownNodeType(t) if t == "widget"));
    }

    #[test]
    fn ensure_known_validates_full_type_set() {
        let mut registry = NodeTypeRegistry::new();
        registry.register("custom", Box::new(TitleProvider)).unwrap();

        assert!(registry.ensure_known(["custom"]).is_ok());
        let err = registry.ensure_known(["custom", "widget"]).unwrap_err();
        assert!(matches!(err, MenuError::UnknownNodeType(t) if t == "widget"));
    }

    #[test]
    fn defaults_for_optional_capabilities() {
        let mut registry = NodeTypeRegistry::new();
        registry.register("custom", Box::new(TitleProvider)).unwrap();

        assert!(!registry.is_view_all_link_allowed("custom").unwrap());
        assert!(registry.get("custom").unwrap().node_cache_key_info().is_empty());
    }
}
