//! Listed companies and the market events that move them.

use serde::{Deserialize, Serialize};

/// A listed company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub ticker: String,
    pub name: String,
    pub sector: String,
    pub price: f64,
}

impl Company {
    pub fn new(
        ticker: impl Into<String>,
        name: impl Into<String>,
        sector: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            name: name.into(),
            sector: sector.into(),
            price,
        }
    }

    /// `TICKER (Name)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.ticker, self.name)
    }
}

/// How rare a market event is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventRarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl EventRarity {
    /// Capitalised name for headlines.
    pub fn title(&self) -> &'static str {
        match self {
            EventRarity::Common => "Common",
            EventRarity::Uncommon => "Uncommon",
            EventRarity::Rare => "Rare",
            EventRarity::Epic => "Epic",
            EventRarity::Legendary => "Legendary",
        }
    }
}

/// A market event that fired on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketEvent {
    pub id: String,
    pub day: u32,
    pub rarity: EventRarity,
    /// Fractional price impact, e.g. `0.032` for +3.2%.
    pub impact: f64,
    pub description: String,
    #[serde(default)]
    pub sector_affinity: Option<String>,
    #[serde(default)]
    pub target_ticker: Option<String>,
}

impl MarketEvent {
    pub fn new(id: impl Into<String>, day: u32, rarity: EventRarity, impact: f64) -> Self {
        Self {
            id: id.into(),
            day,
            rarity,
            impact,
            description: String::new(),
            sector_affinity: None,
            target_ticker: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector_affinity = Some(sector.into());
        self
    }

    pub fn with_target(mut self, ticker: impl Into<String>) -> Self {
        self.target_ticker = Some(ticker.into());
        self
    }
}
