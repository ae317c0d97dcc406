//! CMS page nodes.
//!
//! `content` holds the page slug; the "selected" marker holds the id of the
//! page the node links to. The node whose marker matches the page currently
//! being viewed gets an `active` class on its anchor.

use super::{NodeTypeProvider, NodeView};
use crate::error::MenuResult;
use crate::escape::{build_attrs, html_escape};

/// Provider for CMS page link nodes.
#[derive(Debug, Default)]
pub struct CmsPageNodeProvider {
    base_path: String,
    current_page: Option<i64>,
}

impl CmsPageNodeProvider {
    /// Create the provider; pages resolve under `base_path` (e.g., "/page").
    pub fn new(base_path: &str) -> Self {
        Self {
            base_path: base_path.trim_end_matches('/').to_string(),
            current_page: None,
        }
    }

    /// Mark the page the current request is viewing.
    pub fn set_current_page(&mut self, page_id: Option<i64>) {
        self.current_page = page_id;
    }
}

impl NodeTypeProvider for CmsPageNodeProvider {
    fn render(&self, view: &NodeView<'_>) -> MenuResult<String> {
        let slug = view.node.content.as_deref().unwrap_or("").trim_matches('/');
        let href = format!("{}/{slug}", self.base_path);

        let selected =
            self.current_page.is_some() && self.current_page == view.node.selected_item_id;
        let mut attrs = vec![("href", href)];
        if selected {
            attrs.push(("class", "active".to_string()));
        }

        Ok(format!(
            "<a{}>{}</a>",
            build_attrs(attrs),
            html_escape(&view.node.title)
        ))
    }
}
