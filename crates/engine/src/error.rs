use std::fmt;

/// Failure to turn a puzzle payload into a grid. Always fatal to a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Payload is not valid JSON or does not have the expected shape.
    Malformed(String),
    /// Payload parsed but none of the six squares carries a category.
    EmptyGrid,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(msg) => write!(f, "malformed puzzle payload: {msg}"),
            Self::EmptyGrid => write!(f, "puzzle payload has no categories"),
        }
    }
}

impl std::error::Error for GridError {}

/// Invalid user configuration, reported before any cell is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Display count must be a positive integer.
    InvalidDisplayCount(i64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDisplayCount(n) => {
                write!(f, "invalid number of entities to display: {n}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Failure loading an entity catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// JSON parse / deserialization error.
    Parse(String),
    /// Two entities share one id.
    DuplicateEntity(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "catalog parse error: {msg}"),
            Self::DuplicateEntity(id) => write!(f, "catalog lists entity '{id}' more than once"),
        }
    }
}

impl std::error::Error for CatalogError {}
