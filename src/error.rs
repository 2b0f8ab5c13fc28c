use thiserror::Error;

/// Main error type for atlasgraph
#[derive(Error, Debug)]
pub enum GraphError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Relationship type catalog failed validation at construction
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// A type identifier not present in the catalog was passed to a query
    #[error("Unknown relationship type: {0}")]
    UnknownEdgeType(String),

    /// A node identity string that does not parse as `entity_type/entity_id`
    #[error("Invalid node link: {0}")]
    InvalidLink(String),

    /// Parse errors (bulk-load payloads, refs columns)
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Convenient Result type using GraphError
pub type Result<T> = std::result::Result<T, GraphError>;
