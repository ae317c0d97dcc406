//! Template path resolution.
//!
//! The actual template engine lives outside this crate; the renderer only
//! decides *which* template path applies, supporting per-menu overrides and
//! per-node custom submenu templates.

use std::collections::HashMap;

/// Default template for the menu wrapper.
pub const DEFAULT_MENU_TEMPLATE: &str = "menu/menu.html";

/// Default template for submenu wrappers.
pub const DEFAULT_SUBMENU_TEMPLATE: &str = "menu/sub_menu.html";

/// Resolve the template path for a menu.
pub trait TemplateResolver {
    /// The template path to use for this menu, given the caller's default.
    fn menu_template(&self, identifier: &str, default: &str) -> String;
}

/// Map-backed resolver with per-menu overrides.
#[derive(Debug, Default)]
pub struct MapTemplateResolver {
    overrides: HashMap<String, String>,
}

impl MapTemplateResolver {
    /// Create a resolver with no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the template for one menu identifier.
    pub fn set_override(&mut self, identifier: &str, template: &str) {
        self.overrides
            .insert(identifier.to_string(), template.to_string());
    }
}

impl TemplateResolver for MapTemplateResolver {
    fn menu_template(&self, identifier: &str, default: &str) -> String {
        self.overrides
            .get(identifier)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }
}

/// Path for a node's custom submenu template.
///
/// Custom submenu templates live under the menu's own directory so themes can
/// override them per menu.
pub fn custom_submenu_template(menu_identifier: &str, name: &str) -> String {
    format!("menu/{menu_identifier}/custom/sub_menu/{name}.html")
}
