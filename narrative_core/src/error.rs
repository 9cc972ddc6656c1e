//! Errors raised while loading narrative data and configuration.
//!
//! Narrative operations themselves never fail; only setup does.

use market_rules::CatalogError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("failed to parse {what}: {source}")]
    Toml {
        what: &'static str,
        #[source]
        source: toml::de::Error,
    },

    #[error("{0}")]
    Validation(String),
}

impl NarrativeError {
    pub(crate) fn toml(what: &'static str) -> impl FnOnce(toml::de::Error) -> Self {
        move |source| NarrativeError::Toml { what, source }
    }
}
