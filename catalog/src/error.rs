use thiserror::Error;

pub type Result<T, E = CatalogError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("product not found: {0}")]
    NotFound(String),

    #[error("duplicate product id: {0}")]
    DuplicateId(String),

    #[error("product {0} has no sizes")]
    EmptySizes(String),

    #[error("product at position {0} has an empty id")]
    EmptyId(usize),

    #[error("product {0} has no price")]
    MissingPrice(String),

    #[error("invalid price: {0:?}")]
    InvalidPrice(String),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Json(#[from] serde_json::Error),
}
