//! Daily news selection, deduplication and emission into the bounded feeds.

use std::collections::HashSet;
use std::sync::Arc;

use market_rules::{Catalog, GameState, NewsItem};

use super::builder::{era_news, event_news, whale_news};
use crate::config::NewsConfig;

/// Hard ceiling on items per day; config can only lower it.
pub const MAX_DAILY_NEWS: usize = 3;

/// Builds and emits each day's news against a shared catalog.
#[derive(Debug, Clone)]
pub struct NewsDesk {
    catalog: Arc<Catalog>,
    config: NewsConfig,
}

impl NewsDesk {
    pub fn new(catalog: Arc<Catalog>, config: NewsConfig) -> Self {
        Self { catalog, config }
    }

    fn daily_cap(&self) -> usize {
        self.config.max_daily_items.min(MAX_DAILY_NEWS)
    }

    /// Whether today warrants an era item: a fresh transition after day 1,
    /// or a pending mutation message.
    fn era_is_newsworthy(state: &GameState) -> bool {
        (state.era.days_in_era == 0 && state.day > 1) || state.era.mutation().is_some()
    }

    /// Today's candidate news, ordered `[event?, whales.., era?]` and capped.
    ///
    /// Pure: reads the state and nothing else.
    pub fn generate_daily_news(&self, state: &GameState) -> Vec<NewsItem> {
        let mut items = Vec::with_capacity(MAX_DAILY_NEWS);

        if let Some(event) = state.events_on(state.day).last() {
            items.push(event_news(state, event));
        }

        let acting: Vec<_> = state
            .whales
            .iter()
            .filter(|w| w.reported_on(state.day))
            .collect();
        let skip = acting.len().saturating_sub(self.config.max_whale_items);
        items.extend(
            acting[skip..]
                .iter()
                .map(|whale| whale_news(&self.catalog, state, whale)),
        );

        if Self::era_is_newsworthy(state) {
            items.push(era_news(&self.catalog, state));
        }

        items.truncate(self.daily_cap());
        items
    }

    /// Emit today's news that has not been emitted before.
    ///
    /// Returns exactly the items appended to the news queue. When nothing is
    /// new, the state is left untouched.
    pub fn emit_market_news(&self, state: &mut GameState) -> Vec<NewsItem> {
        let candidates = self.generate_daily_news(state);
        let candidate_count = candidates.len();

        let mut batch_ids = HashSet::new();
        let fresh: Vec<NewsItem> = candidates
            .into_iter()
            .filter(|item| {
                if state.news_event_log.contains(&item.id) {
                    tracing::trace!(news_id = %item.id, "News already emitted, skipping");
                    return false;
                }
                batch_ids.insert(item.id.clone())
            })
            .collect();

        if fresh.is_empty() {
            return fresh;
        }

        state.news_queue.extend(fresh.iter().cloned());
        state
            .news_event_log
            .extend(fresh.iter().map(|item| item.id.clone()));

        tracing::debug!(
            run_id = %state.run_id,
            day = state.day,
            candidates = candidate_count,
            emitted = fresh.len(),
            "Emitted market news"
        );

        fresh
    }
}
