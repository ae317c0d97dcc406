//! Cache key and invalidation tag composition.
//!
//! The cache store itself is an external collaborator; this module only
//! decides what key a rendered fragment is stored under, which tags
//! invalidate it, and for how long it lives.

use std::collections::HashMap;

use tracing::debug;

use crate::error::MenuResult;
use crate::model::{Menu, Node, StoreId};
use crate::provider::NodeTypeRegistry;

/// Tag shared by every cached menu fragment.
pub const MENU_CACHE_TAG: &str = "menu_tag";

/// Generic tag for cached block markup.
pub const BLOCK_CACHE_TAG: &str = "block_html";

/// Fragments live until explicitly invalidated (one year).
pub const CACHE_TTL_SECS: u64 = 60 * 60 * 24 * 365;

/// The request context cache-key node-type resolution runs against.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Route name of the enclosing request (e.g., "catalog").
    pub route: String,
    /// Path/query parameters extracted by the router.
    pub params: HashMap<String, String>,
}

impl RequestContext {
    /// Context for a route with no parameters.
    pub fn new(route: &str) -> Self {
        Self {
            route: route.to_string(),
            params: HashMap::new(),
        }
    }
}

/// Override hook mapping a request context to a node type tag.
pub type NodeTypeHook = Box<dyn Fn(&RequestContext) -> Option<String>>;

/// Composes cache keys and invalidation tags for rendered menus.
///
/// Integrations may register override hooks to change which node type
/// contributes request-specific key parts. Hooks run in registration order
/// and the first non-empty result wins; when none match, the default mapping
/// applies (route "catalog" resolves to node type "category").
#[derive(Default)]
pub struct CacheKeyComposer {
    hooks: Vec<NodeTypeHook>,
}

impl CacheKeyComposer {
    /// Composer with no override hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node-type override hook.
    pub fn add_hook(&mut self, hook: NodeTypeHook) {
        self.hooks.push(hook);
    }

    /// The node type whose cache key info applies to this request.
    pub fn resolve_node_type(&self, request: &RequestContext) -> Option<String> {
        for hook in &self.hooks {
            if let Some(node_type) = hook(request) {
                debug!(node_type = %node_type, route = %request.route, "node type overridden");
                return Some(node_type);
            }
        }

        match request.route.as_str() {
            "catalog" => Some("category".to_string()),
            _ => None,
        }
    }

    /// Compose the ordered cache key for a rendered menu.
    ///
    /// Always starts with the menu tag, menu id, store id, and template; the
    /// resolved node type's provider may append request-specific parts, and a
    /// sub-branch render appends its ancestor node id.
    pub fn compose(
        &self,
        menu: &Menu,
        store_id: StoreId,
        template: &str,
        registry: &NodeTypeRegistry,
        request: Option<&RequestContext>,
        parent_node: Option<&Node>,
    ) -> MenuResult<Vec<String>> {
        let mut info = vec![
            MENU_CACHE_TAG.to_string(),
            format!("menu_{}", menu.menu_id),
            format!("store_{store_id}"),
            format!("template_{template}"),
        ];

        if let Some(request) = request
            && let Some(node_type) = self.resolve_node_type(request)
        {
            info.extend(registry.get(&node_type)?.node_cache_key_info());
        }

        if let Some(parent) = parent_node {
            info.push(format!("parent_node_{}", parent.node_id));
        }

        Ok(info)
    }

    /// Invalidation tags for a rendered menu, distinct from the cache key.
    ///
    /// Null-guarded: a missing menu degrades to the generic tags.
    pub fn identities(menu: Option<&Menu>) -> Vec<String> {
        let mut tags = Vec::with_capacity(3);
        if let Some(menu) = menu {
            tags.push(format!("{MENU_CACHE_TAG}_{}", menu.menu_id));
        }
        tags.push(BLOCK_CACHE_TAG.to_string());
        tags.push(MENU_CACHE_TAG.to_string());
        tags
    }
}

impl std::fmt::Debug for CacheKeyComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheKeyComposer")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
