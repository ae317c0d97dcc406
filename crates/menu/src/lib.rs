//! Vetrina navigation menu renderer.
//!
//! Loads a menu tree for a store scope, indexes its nodes by (level, parent),
//! and recursively renders nested `<li>`/`<ul>` markup. Per-node-type
//! rendering is delegated to pluggable [`provider::NodeTypeProvider`]
//! implementations, and [`cache`] composes the cache keys and invalidation
//! tags the surrounding cache layer stores fragments under.
//!
//! Persistence, template rendering, HTTP routing, and the cache store itself
//! remain external collaborators behind the seams in [`repository`],
//! [`template`], [`image`], and [`cache`].

pub mod cache;
pub mod error;
pub mod escape;
pub mod image;
pub mod index;
pub mod model;
pub mod provider;
pub mod render;
pub mod repository;
pub mod template;

pub use error::{MenuError, MenuResult};
pub use model::{DEFAULT_STORE_ID, Menu, Node, StoreId};
pub use render::{MenuRequest, MenuTreeRenderer, RenderedMenu};
