use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("Schema unavailable: introspection failed: {0}")]
    Introspection(#[from] hub_client::ClientError),

    #[error("Schema unavailable: {0}")]
    Parse(#[from] hub_schema::SchemaError),
}

impl StoreError {
    #[must_use]
    pub const fn code(&self) -> &'static str {
        "SCHEMA_UNAVAILABLE"
    }
}
