//! Menu rendering error types.

use thiserror::Error;

/// Errors surfaced while building or rendering a menu tree.
///
/// A menu that cannot be found in either store scope is *not* an error; the
/// renderer reports it as an empty result so callers can fall back to their
/// own defaults. Node-type problems, on the other hand, are configuration
/// errors and abort the render.
#[derive(Debug, Error)]
pub enum MenuError {
    /// A node references a type tag with no registered provider.
    #[error("unknown node type: {0}")]
    UnknownNodeType(String),

    /// Two providers were registered under the same type tag.
    #[error("node type already registered: {0}")]
    DuplicateNodeType(String),

    /// A node-type provider failed while preparing or rendering.
    #[error("node type provider '{node_type}' failed")]
    Provider {
        node_type: String,
        #[source]
        source: anyhow::Error,
    },

    /// A repository collaborator failed.
    #[error("repository error")]
    Repository(#[from] anyhow::Error),
}

/// Result type alias using MenuError.
pub type MenuResult<T> = Result<T, MenuError>;
