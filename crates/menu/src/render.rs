//! Recursive menu tree rendering.
//!
//! One render pass loads the menu and its nodes, builds the node index, runs
//! the provider batch-prepare phase, and walks the index depth-first emitting
//! nested `<li>`/`<ul>` markup. All pass state lives in an explicit
//! [`RenderPass`] value built per invocation; recursive branches carry their
//! own immutable [`RenderContext`] snapshot, so nothing is shared or mutated
//! across branches.

use serde::Serialize;
use tracing::debug;

use crate::cache::{CACHE_TTL_SECS, CacheKeyComposer, RequestContext};
use crate::error::MenuResult;
use crate::escape::{build_attrs, class_attr};
use crate::image::ImageUrlResolver;
use crate::index::NodeIndex;
use crate::model::{Menu, Node, StoreId};
use crate::provider::{NodeTypeRegistry, NodeView};
use crate::repository::{MenuRepository, NodeRepository, load_menu};
use crate::template::{
    DEFAULT_MENU_TEMPLATE, DEFAULT_SUBMENU_TEMPLATE, TemplateResolver, custom_submenu_template,
};

/// Renderer defaults, overridable per install.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct MenuSettings {
    /// Default template for the menu wrapper.
    pub menu_template: String,
    /// Default template for submenu wrappers.
    pub submenu_template: String,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            menu_template: DEFAULT_MENU_TEMPLATE.to_string(),
            submenu_template: DEFAULT_SUBMENU_TEMPLATE.to_string(),
        }
    }
}

/// One render invocation's input.
#[derive(Debug, Clone, Default)]
pub struct MenuRequest {
    /// Menu identifier (e.g., "main-menu").
    pub identifier: String,
    /// Store scope to resolve the menu in.
    pub store_id: StoreId,
    /// Enclosing request context, feeding cache-key node-type resolution.
    pub route: Option<RequestContext>,
    /// Caller override for the base submenu template.
    pub submenu_template: Option<String>,
}

impl MenuRequest {
    /// Request for a menu in a store scope.
    pub fn new(identifier: &str, store_id: StoreId) -> Self {
        Self {
            identifier: identifier.to_string(),
            store_id,
            ..Self::default()
        }
    }
}

/// Cache coordinates for a rendered fragment.
#[derive(Debug, Clone)]
pub struct CacheInfo {
    /// Ordered cache key parts.
    pub key: Vec<String>,
    /// Invalidation tags.
    pub tags: Vec<String>,
    /// Time to live in seconds.
    pub ttl_secs: u64,
}

/// Result of a render invocation.
///
/// A menu missing from both store scopes is not an error: `html` is empty,
/// `menu` is `None`, and there is nothing to cache.
#[derive(Debug, Clone)]
pub struct RenderedMenu {
    /// Assembled HTML fragment (empty for a missing or empty menu).
    pub html: String,
    /// The resolved menu, when one was found.
    pub menu: Option<Menu>,
    /// Template path the external engine should wrap the fragment with.
    pub template: String,
    /// Cache key, tags, and TTL; `None` when there is no menu.
    pub cache: Option<CacheInfo>,
}

/// A node with its rendered subtree, for template engines that want the tree
/// as data instead of markup.
#[derive(Debug, Clone, Serialize)]
pub struct NodeTree {
    /// The node itself.
    pub node: Node,
    /// Child subtrees in index order.
    pub children: Vec<NodeTree>,
}

/// Per-invocation state: the resolved menu, its node index, and the resolved
/// template paths. Built once per render call and read-only afterwards.
#[derive(Debug)]
struct RenderPass {
    menu: Menu,
    index: NodeIndex,
    template: String,
    submenu_template: String,
}

/// Immutable configuration snapshot for one branch of the recursion.
#[derive(Debug)]
struct RenderContext<'a> {
    level: u32,
    parent: Option<&'a Node>,
}

/// Renders hierarchical navigation menus.
pub struct MenuTreeRenderer {
    menus: Box<dyn MenuRepository>,
    nodes: Box<dyn NodeRepository>,
    templates: Box<dyn TemplateResolver>,
    images: Option<Box<dyn ImageUrlResolver>>,
    node_types: NodeTypeRegistry,
    composer: CacheKeyComposer,
    settings: MenuSettings,
}

impl MenuTreeRenderer {
    /// Create a renderer over the given repositories and provider registry.
    pub fn new(
        menus: Box<dyn MenuRepository>,
        nodes: Box<dyn NodeRepository>,
        templates: Box<dyn TemplateResolver>,
        node_types: NodeTypeRegistry,
    ) -> Self {
        Self {
            menus,
            nodes,
            templates,
            images: None,
            node_types,
            composer: CacheKeyComposer::new(),
            settings: MenuSettings::default(),
        }
    }

    /// Attach an image URL resolver; without one, node images are skipped.
    pub fn with_image_resolver(mut self, images: Box<dyn ImageUrlResolver>) -> Self {
        self.images = Some(images);
        self
    }

    /// Replace the cache key composer (e.g., to install override hooks).
    pub fn with_cache_composer(mut self, composer: CacheKeyComposer) -> Self {
        self.composer = composer;
        self
    }

    /// Replace the renderer defaults.
    pub fn with_settings(mut self, settings: MenuSettings) -> Self {
        self.settings = settings;
        self
    }

    /// The provider registry, for configuring providers between requests
    /// (e.g., the current category id).
    pub fn node_types_mut(&mut self) -> &mut NodeTypeRegistry {
        &mut self.node_types
    }

    /// Whether submenus of this node type may carry a "view all" link.
    pub fn is_view_all_link_allowed(&self, node_type: &str) -> MenuResult<bool> {
        self.node_types.is_view_all_link_allowed(node_type)
    }

    /// The menu's css class, falling back to `default` when there is no menu.
    pub fn menu_css_class(menu: Option<&Menu>, default: &str) -> String {
        match menu {
            Some(menu) => menu.css_class.clone(),
            None => default.to_string(),
        }
    }

    /// Render the full menu tree.
    pub fn render(&mut self, request: &MenuRequest) -> MenuResult<RenderedMenu> {
        let Some(pass) = self.begin_pass(request)? else {
            return Ok(self.empty_result(request));
        };

        let root = RenderContext {
            level: 0,
            parent: None,
        };
        let html = self.render_level(&pass, &root)?;

        let key = self.composer.compose(
            &pass.menu,
            request.store_id,
            &pass.template,
            &self.node_types,
            request.route.as_ref(),
            None,
        )?;
        let tags = CacheKeyComposer::identities(Some(&pass.menu));

        debug!(
            menu = %request.identifier,
            nodes = pass.index.len(),
            bytes = html.len(),
            "menu rendered"
        );

        Ok(RenderedMenu {
            html,
            menu: Some(pass.menu),
            template: pass.template,
            cache: Some(CacheInfo {
                key,
                tags,
                ttl_secs: CACHE_TTL_SECS,
            }),
        })
    }

    /// Render one sub-branch: the children of `parent_node_id`.
    ///
    /// The composed cache key always ends with `parent_node_{id}`, and the
    /// template is the branch's submenu template (honoring the node's custom
    /// override).
    pub fn render_branch(
        &mut self,
        request: &MenuRequest,
        parent_node_id: i64,
    ) -> MenuResult<RenderedMenu> {
        let Some(pass) = self.begin_pass(request)? else {
            return Ok(self.empty_result(request));
        };

        let Some(parent) = pass.index.find(parent_node_id) else {
            debug!(node = parent_node_id, "branch parent not in index");
            return Ok(RenderedMenu {
                html: String::new(),
                template: pass.submenu_template.clone(),
                cache: None,
                menu: Some(pass.menu),
            });
        };

        let template = self.submenu_template_for(&pass, parent);
        let ctx = RenderContext {
            level: parent.level + 1,
            parent: Some(parent),
        };
        let html = self.render_level(&pass, &ctx)?;

        let key = self.composer.compose(
            &pass.menu,
            request.store_id,
            &template,
            &self.node_types,
            request.route.as_ref(),
            Some(parent),
        )?;
        let tags = CacheKeyComposer::identities(Some(&pass.menu));

        Ok(RenderedMenu {
            html,
            template,
            cache: Some(CacheInfo {
                key,
                tags,
                ttl_secs: CACHE_TTL_SECS,
            }),
            menu: Some(pass.menu),
        })
    }

    /// Render the "view all" variant of a node's fragment.
    pub fn render_view_all_link(&self, menu: &Menu, node: &Node) -> MenuResult<String> {
        let view = self.node_view(menu, node, node.level, false, true);
        self.node_types.render(&view)
    }

    /// The menu as a serializable node/children tree, in index order.
    pub fn nodes_tree(&mut self, request: &MenuRequest) -> MenuResult<Vec<NodeTree>> {
        let Some(pass) = self.begin_pass(request)? else {
            return Ok(Vec::new());
        };
        Ok(Self::subtree(&pass.index, 0, None))
    }

    fn subtree(index: &NodeIndex, level: u32, parent: Option<&Node>) -> Vec<NodeTree> {
        index
            .children(level, parent)
            .into_iter()
            .map(|node| NodeTree {
                children: Self::subtree(index, level + 1, Some(node)),
                node: node.clone(),
            })
            .collect()
    }

    /// Load the menu (with store fallback), build the index, validate the
    /// type set, and run the provider batch-prepare pass.
    fn begin_pass(&mut self, request: &MenuRequest) -> MenuResult<Option<RenderPass>> {
        let Some(menu) = load_menu(self.menus.as_ref(), &request.identifier, request.store_id)?
        else {
            return Ok(None);
        };

        let nodes = self.nodes.get_by_menu(menu.menu_id)?;
        let index = NodeIndex::build(nodes);

        // Unknown tags abort here, before any markup exists.
        self.node_types.ensure_known(index.type_tags())?;
        for (tag, group) in index.types() {
            self.node_types.prepare_data(tag, &group)?;
        }

        let template = self
            .templates
            .menu_template(&request.identifier, &self.settings.menu_template);
        let base_submenu = request
            .submenu_template
            .as_deref()
            .unwrap_or(&self.settings.submenu_template);
        let submenu_template = self
            .templates
            .menu_template(&request.identifier, base_submenu);

        Ok(Some(RenderPass {
            menu,
            index,
            template,
            submenu_template,
        }))
    }

    /// Depth-first walk of one level of the index.
    fn render_level(&self, pass: &RenderPass, ctx: &RenderContext<'_>) -> MenuResult<String> {
        let children = pass.index.children(ctx.level, ctx.parent);
        let count = children.len();
        let mut html = String::new();

        for (i, node) in children.into_iter().enumerate() {
            let child_ctx = RenderContext {
                level: ctx.level + 1,
                parent: Some(node),
            };
            let child_markup = self.render_level(pass, &child_ctx)?;

            let mut classes = vec![format!("level{}", ctx.level)];
            if let Some(own) = node.classes.as_deref() {
                classes.push(own.to_string());
            }
            if !child_markup.is_empty() {
                classes.push("parent".to_string());
            }
            if i == 0 {
                classes.push("first".to_string());
            }
            if i + 1 == count {
                classes.push("last".to_string());
            }
            if ctx.level == 0 {
                classes.push("level-top".to_string());
            }

            html.push_str("<li");
            html.push_str(&build_attrs([("class", class_attr(&classes))]));
            html.push('>');

            let view = self.node_view(
                &pass.menu,
                node,
                ctx.level,
                !child_markup.is_empty(),
                false,
            );
            html.push_str(&self.node_types.render(&view)?);

            if !child_markup.is_empty() {
                html.push_str("<ul");
                html.push_str(&build_attrs([(
                    "class",
                    format!("level{} submenu", ctx.level),
                )]));
                html.push('>');
                html.push_str(&child_markup);
                html.push_str("</ul>");
            }
            html.push_str("</li>");
        }

        Ok(html)
    }

    fn node_view<'a>(
        &self,
        menu: &'a Menu,
        node: &'a Node,
        level: u32,
        is_parent: bool,
        is_view_all_link: bool,
    ) -> NodeView<'a> {
        let image_url = match (&self.images, node.image.as_deref()) {
            (Some(images), Some(image)) => Some(images.url(image)),
            _ => None,
        };

        NodeView {
            node,
            level,
            is_root: level == 0,
            is_parent,
            is_view_all_link,
            menu_class: &menu.css_class,
            menu_identifier: &menu.identifier,
            image_url,
        }
    }

    fn submenu_template_for(&self, pass: &RenderPass, node: &Node) -> String {
        match node.submenu_template.as_deref().filter(|t| !t.is_empty()) {
            Some(name) => custom_submenu_template(&pass.menu.identifier, name),
            None => pass.submenu_template.clone(),
        }
    }

    fn empty_result(&self, request: &MenuRequest) -> RenderedMenu {
        RenderedMenu {
            html: String::new(),
            menu: None,
            template: self
                .templates
                .menu_template(&request.identifier, &self.settings.menu_template),
            cache: None,
        }
    }
}

impl std::fmt::Debug for MenuTreeRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuTreeRenderer")
            .field("node_types", &self.node_types)
            .field("settings", &self.settings)
            .finish()
    }
}
