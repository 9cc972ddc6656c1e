//! Tunables for the narrative layer.
//!
//! Every field has a default, so an empty TOML document is a valid config.

use serde::{Deserialize, Serialize};

use crate::error::NarrativeError;

/// News selection limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    /// Items generated per day, applied after ordering. Never more than three.
    pub max_daily_items: usize,
    /// How many of the day's acting whales get a headline.
    pub max_whale_items: usize,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            max_daily_items: 3,
            max_whale_items: 2,
        }
    }
}

/// Story context settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryConfig {
    /// Win target as a multiple of starting capital when no explicit target is set.
    pub retirement_multiple: f64,
    /// News items copied into the context when the caller does not supply any.
    pub recent_news_window: usize,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            retirement_multiple: 10.0,
            recent_news_window: 3,
        }
    }
}

/// Story effect amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    pub boon_floor: f64,
    pub boon_rate: f64,
    pub base_starting_cash: f64,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            boon_floor: 500.0,
            boon_rate: 0.05,
            base_starting_cash: 10_000.0,
        }
    }
}

impl EffectConfig {
    /// `max(floor, floor(base_starting_cash * rate))`.
    pub fn struggling_boon(&self) -> f64 {
        (self.base_starting_cash * self.boon_rate)
            .floor()
            .max(self.boon_floor)
    }
}

/// Top-level narrative configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NarrativeConfig {
    pub news: NewsConfig,
    pub story: StoryConfig,
    pub effects: EffectConfig,
}

impl NarrativeConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, NarrativeError> {
        toml::from_str(raw).map_err(NarrativeError::toml("narrative config"))
    }
}
