//! Picks and queues whale dialogue lines.

use std::sync::Arc;

use market_rules::{DialogueEvent, DialogueType, GameState};

use super::registry::DialogueRegistry;
use crate::ports::{Clock, RandomSource};

/// Queues whale lines into the run's dialogue feed.
pub struct DialogueSelector {
    registry: Arc<DialogueRegistry>,
    rng: Arc<dyn RandomSource>,
    clock: Arc<dyn Clock>,
}

impl DialogueSelector {
    pub fn new(
        registry: Arc<DialogueRegistry>,
        rng: Arc<dyn RandomSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            rng,
            clock,
        }
    }

    pub fn registry(&self) -> &DialogueRegistry {
        &self.registry
    }

    /// Queue one random line for `whale_id` at the given moment.
    ///
    /// Returns `None` and leaves the queue untouched when the whale (or the
    /// generic bank standing in for it) has no lines for `kind`.
    pub fn queue_whale_dialogue(
        &self,
        state: &mut GameState,
        whale_id: &str,
        kind: DialogueType,
    ) -> Option<DialogueEvent> {
        let entry = self.registry.resolve(whale_id);
        let candidates = entry.lines.get(kind);
        if candidates.is_empty() {
            tracing::trace!(whale_id, kind = ?kind, "No dialogue for moment");
            return None;
        }

        let index = self.rng.pick_index(candidates.len()).min(candidates.len() - 1);
        let event = DialogueEvent {
            whale_id: whale_id.to_string(),
            icon: entry.icon.clone(),
            text: candidates[index].clone(),
            kind,
            timestamp: self.clock.now(),
        };

        state.whale_dialogue_queue.push(event.clone());
        tracing::debug!(whale_id, kind = ?kind, "Whale dialogue queued");
        Some(event)
    }
}
