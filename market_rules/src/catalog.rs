//! Static whale profile and era tables.
//!
//! The catalog is read-only after loading. Load it once at startup and share it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::entities::{Era, WhaleProfile};
use crate::game_state::GameState;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.toml");

/// Errors raised while loading static tables.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{kind} id cannot be empty")]
    EmptyId { kind: &'static str },

    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("catalog defines no eras")]
    NoEras,
}

/// Whale profiles and eras known to the game.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Catalog {
    #[serde(default)]
    pub whales: Vec<WhaleProfile>,
    #[serde(default)]
    pub eras: Vec<Era>,
}

impl Catalog {
    /// The tables shipped with the game.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Parse and validate a catalog.
    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = toml::from_str(raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        ensure_unique("whale", self.whales.iter().map(|w| w.id.as_str()))?;
        ensure_unique("era", self.eras.iter().map(|e| e.id.as_str()))?;
        if self.eras.is_empty() {
            return Err(CatalogError::NoEras);
        }
        Ok(())
    }

    /// Look up a whale profile. Unknown ids are not an error.
    pub fn find_whale_profile(&self, profile_id: &str) -> Option<&WhaleProfile> {
        self.whales.iter().find(|w| w.id == profile_id)
    }

    pub fn era(&self, era_id: &str) -> Option<&Era> {
        self.eras.iter().find(|e| e.id == era_id)
    }

    /// The era the run is currently in, or a placeholder for unknown ids.
    pub fn current_era(&self, state: &GameState) -> Era {
        self.era(&state.era.active_era_id)
            .cloned()
            .unwrap_or_else(|| Era::placeholder(state.era.active_era_id.clone()))
    }
}

fn ensure_unique<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(CatalogError::EmptyId { kind });
        }
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
