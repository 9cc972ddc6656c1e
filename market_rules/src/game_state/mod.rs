//! Run state management - the central structure holding all data for one run.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

use crate::entities::{ActiveWhale, Company, EraState, MarketEvent};
use crate::feed::{DialogueEvent, NewsItem};
use crate::mechanics::round_cents;
use crate::queue::{
    BoundedQueue, ACTION_LOG_CAPACITY, DIALOGUE_QUEUE_CAPACITY, NEWS_LOG_CAPACITY,
    NEWS_QUEUE_CAPACITY,
};

/// Unique identifier for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cash plus share holdings keyed by ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Portfolio {
    pub cash: f64,
    #[serde(default)]
    pub holdings: BTreeMap<String, f64>,
}

impl Portfolio {
    pub fn with_cash(cash: f64) -> Self {
        Self {
            cash,
            holdings: BTreeMap::new(),
        }
    }
}

/// Player progression carried through the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub level: u32,
    pub xp: u32,
}

impl Default for Progression {
    fn default() -> Self {
        Self { level: 1, xp: 0 }
    }
}

/// One-shot story flags. Each flips to `true` at most once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StoryFlags {
    pub news_decision_used: bool,
    pub story_boon_used: bool,
    /// Extra regulator interventions the player has banked.
    pub regulator_shots: u32,
}

/// The complete state of a run at any point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub run_id: RunId,

    pub day: u32,
    pub max_days: u32,

    pub start_capital: f64,
    /// Explicit win target. `None` means a multiple of starting capital.
    #[serde(default)]
    pub target_retirement: Option<f64>,

    pub portfolio: Portfolio,
    pub companies: Vec<Company>,

    /// Every market event fired so far, oldest first.
    #[serde(default)]
    pub market_events: Vec<MarketEvent>,

    /// Whales live in this run, in arrival order.
    #[serde(default)]
    pub whales: Vec<ActiveWhale>,
    #[serde(default)]
    pub active_whale_id: Option<String>,
    #[serde(default)]
    pub defeated_whales: BTreeSet<String>,

    pub era: EraState,

    #[serde(default)]
    pub run_ended: bool,
    #[serde(default)]
    pub progression: Progression,
    #[serde(default)]
    pub story: StoryFlags,

    pub news_queue: BoundedQueue<NewsItem>,
    pub news_event_log: BoundedQueue<String>,
    pub whale_dialogue_queue: BoundedQueue<DialogueEvent>,
    pub whale_action_log: BoundedQueue<String>,
}

impl GameState {
    /// Create a fresh run on day 1 with all capital in cash.
    pub fn new(start_capital: f64, max_days: u32, era_id: impl Into<String>) -> Self {
        Self {
            run_id: RunId::new(),
            day: 1,
            max_days,
            start_capital,
            target_retirement: None,
            portfolio: Portfolio::with_cash(start_capital),
            companies: Vec::new(),
            market_events: Vec::new(),
            whales: Vec::new(),
            active_whale_id: None,
            defeated_whales: BTreeSet::new(),
            era: EraState::new(era_id),
            run_ended: false,
            progression: Progression::default(),
            story: StoryFlags::default(),
            news_queue: BoundedQueue::new(NEWS_QUEUE_CAPACITY),
            news_event_log: BoundedQueue::new(NEWS_LOG_CAPACITY),
            whale_dialogue_queue: BoundedQueue::new(DIALOGUE_QUEUE_CAPACITY),
            whale_action_log: BoundedQueue::new(ACTION_LOG_CAPACITY),
        }
    }

    /// Get company by ticker.
    pub fn company(&self, ticker: &str) -> Option<&Company> {
        self.companies.iter().find(|c| c.ticker == ticker)
    }

    /// Cash plus marked-to-market holdings, rounded to cents.
    ///
    /// Holdings in tickers that are no longer listed are worth nothing.
    pub fn portfolio_value(&self) -> f64 {
        let holdings: f64 = self
            .portfolio
            .holdings
            .iter()
            .filter_map(|(ticker, shares)| self.company(ticker).map(|c| c.price * shares))
            .sum();
        round_cents(self.portfolio.cash + holdings)
    }

    /// The win target, defaulting to `multiple` times starting capital.
    pub fn retirement_target(&self, multiple: f64) -> f64 {
        self.target_retirement
            .unwrap_or(self.start_capital * multiple)
    }

    /// Market events that fired on the given day, oldest first.
    pub fn events_on(&self, day: u32) -> impl Iterator<Item = &MarketEvent> {
        self.market_events.iter().filter(move |e| e.day == day)
    }

    /// Append a line to the whale action log.
    pub fn record_action(&mut self, line: impl Into<String>) {
        self.whale_action_log.push(line.into());
    }

    /// Add cash, keeping the balance in whole cents.
    pub fn credit_cash(&mut self, amount: f64) {
        self.portfolio.cash = round_cents(self.portfolio.cash + amount);
    }

    /// Advance to the next day.
    pub fn advance_day(&mut self) {
        self.day += 1;
        self.era.days_in_era += 1;
        self.era.mutation_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::EventRarity;

    #[test]
    fn test_portfolio_value() {
        let mut state = GameState::new(1000.0, 30, "bull");
        state.companies.push(Company::new("A", "Alpha", "tech", 25.0));
        state.portfolio.holdings.insert("A".to_string(), 10.0);

        assert_eq!(state.portfolio_value(), 1250.0);
    }

    #[test]
    fn test_portfolio_value_rounds_to_cents() {
        let mut state = GameState::new(0.0, 30, "bull");
        state.portfolio.cash = 0.1;
        state.companies.push(Company::new("B", "Beta", "retail", 0.333));
        state.portfolio.holdings.insert("B".to_string(), 3.0);

        assert_eq!(state.portfolio_value(), 1.1);
    }

    #[test]
    fn test_delisted_holdings_are_ignored() {
        let mut state = GameState::new(500.0, 30, "bull");
        state.portfolio.holdings.insert("GONE".to_string(), 100.0);

        assert_eq!(state.portfolio_value(), 500.0);
    }

    #[test]
    fn test_retirement_target_default() {
        let mut state = GameState::new(10_000.0, 30, "bull");
        assert_eq!(state.retirement_target(10.0), 100_000.0);

        state.target_retirement = Some(42_000.0);
        assert_eq!(state.retirement_target(10.0), 42_000.0);
    }

    #[test]
    fn test_action_log_is_bounded() {
        let mut state = GameState::new(1000.0, 30, "bull");
        for i in 0..20 {
            state.record_action(format!("action {}", i));
        }

        assert_eq!(state.whale_action_log.len(), ACTION_LOG_CAPACITY);
        assert_eq!(
            state.whale_action_log.latest().map(String::as_str),
            Some("action 19")
        );
    }

    #[test]
    fn test_events_on_day() {
        let mut state = GameState::new(1000.0, 30, "bull");
        state
            .market_events
            .push(MarketEvent::new("E1", 2, EventRarity::Common, 0.01));
        state
            .market_events
            .push(MarketEvent::new("E2", 3, EventRarity::Rare, -0.02));
        state
            .market_events
            .push(MarketEvent::new("E3", 3, EventRarity::Epic, 0.05));

        let ids: Vec<_> = state.events_on(3).map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["E2", "E3"]);
    }

    #[test]
    fn test_advance_day_clears_mutation() {
        let mut state = GameState::new(1000.0, 30, "bull");
        state.era.mutation_message = Some("Flash crash!".to_string());

        state.advance_day();

        assert_eq!(state.day, 2);
        assert_eq!(state.era.days_in_era, 1);
        assert!(state.era.mutation_message.is_none());
    }
}
