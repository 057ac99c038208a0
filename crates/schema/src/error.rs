use thiserror::Error;

pub type Result<T> = std::result::Result<T, SchemaError>;

#[derive(Error, Debug, Clone)]
pub enum SchemaError {
    #[error("Invalid introspection payload: {0}")]
    InvalidPayload(String),

    #[error("Type reference nesting exceeds {max} levels")]
    TypeRefTooDeep { max: usize },

    #[error("Malformed type reference: {0}")]
    MalformedTypeRef(String),

    #[error("Unknown type kind: {0}")]
    UnknownKind(String),
}
