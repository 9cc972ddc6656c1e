//! Dialogue banks - per-whale icons and candidate lines.

use std::collections::HashMap;

use market_rules::DialogueType;
use serde::{Deserialize, Serialize};

use crate::error::NarrativeError;

const BUILTIN_DIALOGUE: &str = include_str!("../../data/dialogue.toml");

/// Candidate lines per dialogue moment. Missing moments are empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DialogueLines {
    pub arrival: Vec<String>,
    pub signature: Vec<String>,
    pub backfire: Vec<String>,
    pub collapse: Vec<String>,
    pub buyout: Vec<String>,
    pub hint: Vec<String>,
}

impl DialogueLines {
    pub fn get(&self, kind: DialogueType) -> &[String] {
        match kind {
            DialogueType::Arrival => &self.arrival,
            DialogueType::Signature => &self.signature,
            DialogueType::Backfire => &self.backfire,
            DialogueType::Collapse => &self.collapse,
            DialogueType::Buyout => &self.buyout,
            DialogueType::Hint => &self.hint,
        }
    }

    pub fn is_empty(&self) -> bool {
        DialogueType::ALL.iter().all(|kind| self.get(*kind).is_empty())
    }
}

/// One speaker's bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueEntry {
    pub icon: String,
    #[serde(default)]
    pub lines: DialogueLines,
}

/// Read-only registry of dialogue banks, loaded once and shared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueRegistry {
    /// Used for any id without its own entry.
    generic: DialogueEntry,
    #[serde(default)]
    whales: HashMap<String, DialogueEntry>,
}

impl DialogueRegistry {
    pub fn new(
        generic: DialogueEntry,
        whales: HashMap<String, DialogueEntry>,
    ) -> Result<Self, NarrativeError> {
        let registry = Self { generic, whales };
        registry.validate()?;
        Ok(registry)
    }

    /// The banks shipped with the game.
    pub fn builtin() -> Result<Self, NarrativeError> {
        Self::from_toml_str(BUILTIN_DIALOGUE)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, NarrativeError> {
        let registry: DialogueRegistry =
            toml::from_str(raw).map_err(NarrativeError::toml("dialogue registry"))?;
        registry.validate()?;
        Ok(registry)
    }

    fn validate(&self) -> Result<(), NarrativeError> {
        if self.generic.lines.is_empty() {
            return Err(NarrativeError::Validation(
                "generic dialogue needs at least one line".to_string(),
            ));
        }
        for (id, entry) in &self.whales {
            if id.trim().is_empty() {
                return Err(NarrativeError::Validation(
                    "dialogue whale id cannot be empty".to_string(),
                ));
            }
            if entry.icon.trim().is_empty() {
                return Err(NarrativeError::Validation(format!(
                    "dialogue for {} has no icon",
                    id
                )));
            }
        }
        Ok(())
    }

    /// The bank for a whale, or the generic bank for unknown ids.
    pub fn resolve(&self, whale_id: &str) -> &DialogueEntry {
        self.whales.get(whale_id).unwrap_or(&self.generic)
    }

    pub fn is_known(&self, whale_id: &str) -> bool {
        self.whales.contains_key(whale_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_loads() {
        let registry = DialogueRegistry::builtin().unwrap();
        assert!(registry.is_known("kraken"));
        assert!(!registry.resolve("kraken").lines.arrival.is_empty());
    }

    #[test]
    fn test_unknown_id_resolves_to_generic() {
        let registry = DialogueRegistry::builtin().unwrap();
        let entry = registry.resolve("who_dis");

        assert!(!registry.is_known("who_dis"));
        assert_eq!(entry, &registry.generic);
        assert!(entry.lines.get(DialogueType::Buyout).is_empty());
    }

    #[test]
    fn test_partial_banks_parse() {
        let registry = DialogueRegistry::from_toml_str(
            r#"
            [generic]
            icon = "?"
            lines = { arrival = ["Someone arrives."] }

            [whales.shy]
            icon = "!"
            lines = { hint = ["Psst."] }
            "#,
        )
        .unwrap();

        let shy = registry.resolve("shy");
        assert_eq!(shy.lines.get(DialogueType::Hint), ["Psst."]);
        assert!(shy.lines.get(DialogueType::Arrival).is_empty());
    }

    #[test]
    fn test_empty_generic_rejected() {
        let result = DialogueRegistry::from_toml_str(
            r#"
            [generic]
            icon = "?"
            "#,
        );
        assert!(matches!(result, Err(NarrativeError::Validation(_))));
    }

    #[test]
    fn test_missing_icon_rejected() {
        let mut whales = HashMap::new();
        whales.insert(
            "blank".to_string(),
            DialogueEntry {
                icon: " ".to_string(),
                lines: DialogueLines::default(),
            },
        );
        let generic = DialogueEntry {
            icon: "?".to_string(),
            lines: DialogueLines {
                arrival: vec!["Hi.".to_string()],
                ..DialogueLines::default()
            },
        };

        assert!(DialogueRegistry::new(generic, whales).is_err());
    }
}
