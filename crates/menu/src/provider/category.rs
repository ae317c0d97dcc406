//! Catalog category nodes.
//!
//! `content` holds the category id. URLs and product counts are resolved in
//! one batch during the prepare pass instead of per-node lookups while the
//! tree renders.

use std::collections::HashMap;
use std::fmt::Write;

use anyhow::Result;
use tracing::{debug, warn};

use super::{NodeTypeProvider, NodeView};
use crate::error::{MenuError, MenuResult};
use crate::escape::{build_attrs, html_escape};
use crate::model::Node;

/// Resolved display data for one category.
#[derive(Debug, Clone)]
pub struct CategoryInfo {
    /// Public URL of the category page.
    pub url: String,
    /// Product count shown next to the title, when the catalog exposes it.
    pub product_count: Option<u64>,
}

/// Batch lookup of category data — the catalog stays external.
pub trait CategorySource {
    /// Resolve display data for the given category ids in one call.
    fn categories(&self, ids: &[i64]) -> Result<HashMap<i64, CategoryInfo>>;
}

/// Provider for catalog category nodes.
pub struct CategoryNodeProvider {
    source: Box<dyn CategorySource>,
    resolved: HashMap<i64, CategoryInfo>,
    current_category: Option<i64>,
}

impl CategoryNodeProvider {
    /// Create the provider over a catalog source.
    pub fn new(source: Box<dyn CategorySource>) -> Self {
        Self {
            source,
            resolved: HashMap::new(),
            current_category: None,
        }
    }

    /// Mark the category the current request is browsing.
    ///
    /// Feeds [`NodeTypeProvider::node_cache_key_info`] so fragments vary per
    /// category page.
    pub fn set_current_category(&mut self, category_id: Option<i64>) {
        self.current_category = category_id;
    }

    fn category_id(node: &Node) -> Option<i64> {
        node.content.as_deref()?.trim().parse().ok()
    }
}

impl NodeTypeProvider for CategoryNodeProvider {
    fn prepare_data(&mut self, nodes: &[&Node]) -> MenuResult<()> {
        let ids: Vec<i64> = nodes.iter().filter_map(|node| Self::category_id(node)).collect();
        if ids.is_empty() {
            return Ok(());
        }

        self.resolved = self
            .source
            .categories(&ids)
            .map_err(|source| MenuError::Provider {
                node_type: "category".to_string(),
                source,
            })?;
        debug!(
            requested = ids.len(),
            resolved = self.resolved.len(),
            "category data prepared"
        );
        Ok(())
    }

    fn render(&self, view: &NodeView<'_>) -> MenuResult<String> {
        let title = html_escape(&view.node.title);
        let Some(info) = Self::category_id(view.node).and_then(|id| self.resolved.get(&id)) else {
            // Category missing from the catalog: keep the label, drop the link.
            warn!(node = view.node.node_id, "category not resolved");
            return Ok(format!("<span>{title}</span>"));
        };

        let mut html = format!(
            "<a{}>{title}",
            build_attrs([("href", info.url.clone())])
        );
        if !view.is_view_all_link
            && let Some(count) = info.product_count
        {
            let _ = write!(html, " <span class=\"count\">{count}</span>");
        }
        html.push_str("</a>");
        Ok(html)
    }

    fn is_view_all_link_allowed(&self) -> bool {
        true
    }

    fn node_cache_key_info(&self) -> Vec<String> {
        match self.current_category {
            Some(id) => vec![format!("category_{id}")],
            None => Vec::new(),
        }
    }
}

impl std::fmt::Debug for CategoryNodeProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryNodeProvider")
            .field("resolved", &self.resolved.len())
            .field("current_category", &self.current_category)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FixedCatalog;

    impl CategorySource for FixedCatalog {
        fn categories(&self, ids: &[i64]) -> Result<HashMap<i64, CategoryInfo>> {
            Ok(ids
                .iter()
                .filter(|id| **id != 404)
                .map(|id| {
                    (
                        *id,
                        CategoryInfo {
                            url: format!("/category/{id}"),
                            product_count: Some(12),
                        },
                    )
                })
                .collect())
        }
    }

    fn category_node(id: i64, category: i64) -> Node {
        serde_json::from_value(json!({
            "node_id": id,
            "type": "category",
            "title": "Shoes",
            "content": category.to_string(),
        }))
        .unwrap()
    }

    fn view_for(node: &Node) -> NodeView<'_> {
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

    fn prepared(nodes: &[&Node]) -> CategoryNodeProvider {
        let mut provider = CategoryNodeProvider::new(Box::new(FixedCatalog));
        provider.prepare_data(nodes).unwrap();
        provider
    }

    #[test]
    fn renders_resolved_category_link_with_count() {
        let node = category_node(1, 7);
        let provider = prepared(&[&node]);

        let html = provider.render(&view_for(&node)).unwrap();
        assert_eq!(
            html,
            "<a href=\"/category/7\">Shoes <span class=\"count\">12</span></a>"
        );
    }

    #[test]
    fn view_all_variant_omits_count() {
        let node = category_node(1, 7);
        let provider = prepared(&[&node]);

        let mut view = view_for(&node);
        view.is_view_all_link = true;
        let html = provider.render(&view).unwrap();
        assert_eq!(html, "<a href=\"/category/7\">Shoes</a>");
    }

    #[test]
    fn unresolved_category_falls_back_to_label() {
        let node = category_node(1, 404);
        let provider = prepared(&[&node]);

        let html = provider.render(&view_for(&node)).unwrap();
        assert_eq!(html, "<span>Shoes</span>");
    }

    #[test]
    fn view_all_link_is_allowed() {
        let provider = CategoryNodeProvider::new(Box::new(FixedCatalog));
        assert!(provider.is_view_all_link_allowed());
    }

    #[test]
    fn cache_key_info_tracks_current_category() {
        let mut provider = CategoryNodeProvider::new(Box::new(FixedCatalog));
        assert!(provider.node_cache_key_info().is_empty());

        provider.set_current_category(Some(9));
        assert_eq!(provider.node_cache_key_info(), vec!["category_9".to_string()]);
    }
}
