use thiserror::Error;

/// Document-level failures. Problems inside a well-formed document are
/// reported as [`Warning`](crate::context::Warning)s instead.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("xml parse error: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected <{expected}> root element, found <{found}>")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("node type '{0}' is not registered")]
    NotFound(String),
}
