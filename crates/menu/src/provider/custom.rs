//! Custom link nodes.
//!
//! The most general node type: `content` holds the link URL, `title` the
//! label, and `additional_data.caption` an optional rich-text caption that is
//! sanitized before output.

use std::fmt::Write;

use super::{NodeTypeProvider, NodeView};
use crate::error::MenuResult;
use crate::escape::{build_attrs, html_escape};

/// Provider for free-form link nodes.
#[derive(Debug, Default)]
pub struct CustomNodeProvider;

impl CustomNodeProvider {
    /// Create the provider.
    pub fn new() -> Self {
        Self
    }

    fn image_tag(view: &NodeView<'_>) -> String {
        let Some(url) = view.image_url.as_deref() else {
            return String::new();
        };
        let alt = view.node.image_alt_text.as_deref().unwrap_or(&view.node.title);
        format!(
            "<img{} />",
            build_attrs([("src", url.to_string()), ("alt", alt.to_string())])
        )
    }

    /// Sanitized rich-text caption, when the node carries one.
    fn caption(view: &NodeView<'_>) -> Option<String> {
        let caption = view.node.additional_data.get("caption")?.as_str()?;
        if caption.is_empty() {
            return None;
        }
        Some(ammonia::clean(caption))
    }
}

impl NodeTypeProvider for CustomNodeProvider {
    fn render(&self, view: &NodeView<'_>) -> MenuResult<String> {
        let mut html = String::new();
        let label = format!("{}{}", Self::image_tag(view), html_escape(&view.node.title));

        match view.node.content.as_deref().filter(|c| !c.is_empty()) {
            Some(url) => {
                let mut attrs = vec![("href", url.to_string())];
                if let Some(target) = view.node.target.as_deref().filter(|t| !t.is_empty()) {
                    attrs.push(("target", target.to_string()));
                }
                let _ = write!(html, "<a{}>{label}</a>", build_attrs(attrs));
            }
            // No URL: plain label, styled by the node's classes on the <li>.
            None => {
                let _ = write!(html, "<span>{label}</span>");
            }
        }

        if let Some(caption) = Self::caption(view) {
            let _ = write!(html, "<div class=\"menu-caption\">{caption}</div>");
        }

        Ok(html)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::model::Node;
    use serde_json::json;

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

    #[test]
    fn renders_anchor_with_target() {
        let node: Node = serde_json::from_value(json!({
            "node_id": 1,
            "type": "custom",
            "title": "Sale",
            "content": "/sale?season=summer&size=all",
            "target": "_blank",
        }))
        .unwrap();

        let html = CustomNodeProvider::new().render(&view_for(&node)).unwrap();
        assert_eq!(
            html,
            "<a href=\"/sale?season=summer&amp;size=all\" target=\"_blank\">Sale</a>"
        );
    }

    #[test]
    fn renders_span_without_url() {
        let node: Node = serde_json::from_value(json!({
            "node_id": 1,
            "type": "custom",
            "title": "Brands",
        }))
        .unwrap();

        let html = CustomNodeProvider::new().render(&view_for(&node)).unwrap();
        assert_eq!(html, "<span>Brands</span>");
    }

    #[test]
    fn escapes_title() {
        let node: Node = serde_json::from_value(json!({
            "node_id": 1,
            "type": "custom",
            "title": "Deals <script>",
            "content": "/deals",
        }))
        .unwrap();

        let html = CustomNodeProvider::new().render(&view_for(&node)).unwrap();
        assert!(html.contains("Deals &lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn includes_resolved_image() {
        let node: Node = serde_json::from_value(json!({
            "node_id": 1,
            "type": "custom",
            "title": "Lookbook",
            "content": "/lookbook",
            "image": "lookbook.png",
            "image_alt_text": "Lookbook cover",
        }))
        .unwrap();

        let mut view = view_for(&node);
        view.image_url = Some("https://cdn.example.com/lookbook.png".to_string());

        let html = CustomNodeProvider::new().render(&view).unwrap();
        assert!(html.contains("src=\"https://cdn.example.com/lookbook.png\""));
        assert!(html.contains("alt=\"Lookbook cover\""));
    }

    #[test]
    fn caption_is_sanitized() {
        let node: Node = serde_json::from_value(json!({
            "node_id": 1,
            "type": "custom",
            "title": "New",
            "content": "/new",
            "additional_data": { "caption": "Fresh <b>drops</b> <script>alert(1)</script>" },
        }))
        .unwrap();

        let html = CustomNodeProvider::new().render(&view_for(&node)).unwrap();
        assert!(html.contains("<b>drops</b>"));
        assert!(!html.contains("<script>"));
    }
}
