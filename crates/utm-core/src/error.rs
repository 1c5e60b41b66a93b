//! Unified Error Model
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UtmError {
    #[error("FIELD/unknown field `{0}`")]
    UnknownField(String),

    #[error("CATALOG/{0}")]
    CatalogError(String),

    #[error("CONFIG/{0}")]
    ConfigError(String),
}
