//! Whales: AI-controlled antagonist traders.

use serde::{Deserialize, Serialize};

/// Static description of a whale archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhaleProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// What this whale keeps coming back to. Empty when it has no fixation.
    #[serde(default)]
    pub primary_obsession: String,
}

/// A whale that is live in the current run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveWhale {
    pub id: String,
    pub profile_id: String,
    /// Hidden whales act but are not reported.
    pub visible: bool,
    #[serde(default)]
    pub last_acted_day: Option<u32>,
    #[serde(default)]
    pub target_ticker: Option<String>,
    #[serde(default)]
    pub target_sector: Option<String>,
}

impl ActiveWhale {
    /// Create a visible whale whose id matches its profile.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            profile_id: id.clone(),
            id,
            visible: true,
            last_acted_day: None,
            target_ticker: None,
            target_sector: None,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn acted_on(mut self, day: u32) -> Self {
        self.last_acted_day = Some(day);
        self
    }

    pub fn targeting_company(mut self, ticker: impl Into<String>) -> Self {
        self.target_ticker = Some(ticker.into());
        self
    }

    pub fn targeting_sector(mut self, sector: impl Into<String>) -> Self {
        self.target_sector = Some(sector.into());
        self
    }

    /// Visible and acted on the given day.
    pub fn reported_on(&self, day: u32) -> bool {
        self.visible && self.last_acted_day == Some(day)
    }
}
