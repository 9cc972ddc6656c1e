//! Story context - a small, stable projection of the run state used as the
//! only input to scene matching and rendering.

use std::collections::BTreeSet;

use market_rules::{GameState, NewsItem};
use serde::{Deserialize, Serialize};

use crate::config::StoryConfig;

/// Immutable snapshot of everything scene rules may look at.
///
/// Always rebuilt from scratch via [`base_story_context`]; never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StoryContext {
    pub day: u32,
    pub max_days: u32,
    pub portfolio_value: f64,
    pub start_capital: f64,
    pub target_retirement: f64,
    pub active_era_id: String,
    pub active_whale_id: Option<String>,
    pub defeated_whales: BTreeSet<String>,
    pub run_ended: bool,
    pub run_won: bool,
    pub level: u32,
    pub xp: u32,
    pub whale_defeated_this_tick: bool,
    pub story_boon_used: bool,
    pub recent_news: Vec<NewsItem>,
    pub news_decision_used: bool,
}

impl StoryContext {
    pub fn days_left(&self) -> u32 {
        self.max_days.saturating_sub(self.day)
    }
}

/// Per-call facts the run loop knows but the state does not record.
#[derive(Debug, Clone, Default)]
pub struct ContextExtras {
    pub whale_defeated_this_tick: bool,
    /// News to expose to scenes. `None` means the tail of the news queue.
    pub recent_news: Option<Vec<NewsItem>>,
}

impl ContextExtras {
    pub fn whale_defeated() -> Self {
        Self {
            whale_defeated_this_tick: true,
            recent_news: None,
        }
    }

    pub fn with_recent_news(mut self, news: Vec<NewsItem>) -> Self {
        self.recent_news = Some(news);
        self
    }
}

/// Project the run state into a fresh story context.
pub fn base_story_context(
    state: &GameState,
    extras: &ContextExtras,
    config: &StoryConfig,
) -> StoryContext {
    let portfolio_value = state.portfolio_value();
    let target_retirement = state.retirement_target(config.retirement_multiple);
    let recent_news = extras.recent_news.clone().unwrap_or_else(|| {
        state
            .news_queue
            .recent(config.recent_news_window)
            .cloned()
            .collect()
    });

    StoryContext {
        day: state.day,
        max_days: state.max_days,
        portfolio_value,
        start_capital: state.start_capital,
        target_retirement,
        active_era_id: state.era.active_era_id.clone(),
        active_whale_id: state.active_whale_id.clone(),
        defeated_whales: state.defeated_whales.clone(),
        run_ended: state.run_ended,
        run_won: state.run_ended && portfolio_value >= target_retirement,
        level: state.progression.level,
        xp: state.progression.xp,
        whale_defeated_this_tick: extras.whale_defeated_this_tick,
        story_boon_used: state.story.story_boon_used,
        recent_news,
        news_decision_used: state.story.news_decision_used,
    }
}
