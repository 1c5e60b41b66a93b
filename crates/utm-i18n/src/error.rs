//! Localization errors
use thiserror::Error;
use utm_store::StoreError;

#[derive(Debug, Error)]
pub enum I18nError {
    #[error("LANG/unsupported language `{0}`")]
    UnknownLanguage(String),

    #[error("TREE/{0}")]
    MalformedTree(String),

    #[error("MASK/{0}")]
    MalformedMask(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
