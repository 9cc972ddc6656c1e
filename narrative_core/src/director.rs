//! Narrative director - runs the whole narrative layer for one trigger point.

use std::sync::Arc;

use market_rules::{Catalog, GameState, NewsItem};
use serde::{Deserialize, Serialize};

use crate::config::NarrativeConfig;
use crate::dialogue::{DialogueRegistry, DialogueSelector};
use crate::error::NarrativeError;
use crate::news::NewsDesk;
use crate::ports::{Clock, RandomSource, SystemClock, ThreadRandom};
use crate::story::{
    ContextExtras, SceneEvent, SceneLibrary, SceneMatcher, StoryEffectDispatcher, StoryEngine,
    StoryRunnerState, StoryTrigger, TemplateRenderer,
};

/// Everything the narrative layer produced for one day tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DayNarrative {
    /// News newly appended to the news queue.
    pub news: Vec<NewsItem>,
    /// Day-end scenes, rendered.
    pub scenes: Vec<SceneEvent>,
    /// Scene ids whose story effect fired.
    pub effects: Vec<String>,
}

/// Owns the news desk, story engine, effect dispatcher and dialogue selector.
pub struct NarrativeDirector {
    news: NewsDesk,
    story: StoryEngine,
    effects: StoryEffectDispatcher,
    dialogue: DialogueSelector,
}

impl NarrativeDirector {
    pub fn new(
        config: NarrativeConfig,
        catalog: Arc<Catalog>,
        scenes: Arc<dyn SceneMatcher>,
        registry: Arc<DialogueRegistry>,
        rng: Arc<dyn RandomSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            news: NewsDesk::new(catalog, config.news),
            story: StoryEngine::new(
                scenes,
                Arc::new(TemplateRenderer),
                clock.clone(),
                config.story,
            ),
            effects: StoryEffectDispatcher::new(config.effects),
            dialogue: DialogueSelector::new(registry, rng, clock),
        }
    }

    /// Load the shipped catalog, scenes and dialogue with real randomness and time.
    pub fn builtin(config: NarrativeConfig) -> Result<Self, NarrativeError> {
        Ok(Self::new(
            config,
            Arc::new(Catalog::builtin()?),
            Arc::new(SceneLibrary::builtin()?),
            Arc::new(DialogueRegistry::builtin()?),
            Arc::new(ThreadRandom),
            Arc::new(SystemClock),
        ))
    }

    pub fn news(&self) -> &NewsDesk {
        &self.news
    }

    pub fn story(&self) -> &StoryEngine {
        &self.story
    }

    pub fn effects(&self) -> &StoryEffectDispatcher {
        &self.effects
    }

    pub fn dialogue(&self) -> &DialogueSelector {
        &self.dialogue
    }

    /// Emit news, then run day-end scenes and their effects.
    ///
    /// When `extras` carries no recent news, scenes see the news emitted by
    /// this tick.
    pub fn run_day_tick(
        &self,
        state: &mut GameState,
        runner: &mut StoryRunnerState,
        extras: ContextExtras,
    ) -> DayNarrative {
        let news = self.news.emit_market_news(state);

        let extras = match extras.recent_news {
            Some(_) => extras,
            None => extras.with_recent_news(news.clone()),
        };
        let (scenes, effects) = self.run_trigger(state, runner, StoryTrigger::DayEnd, &extras);

        tracing::debug!(
            run_id = %state.run_id,
            day = state.day,
            news = news.len(),
            scenes = scenes.len(),
            effects = effects.len(),
            "Day tick narrated"
        );

        DayNarrative {
            news,
            scenes,
            effects,
        }
    }

    /// Run scenes for any trigger point, render them and apply their effects.
    pub fn trigger(
        &self,
        state: &mut GameState,
        runner: &mut StoryRunnerState,
        trigger: StoryTrigger,
        extras: &ContextExtras,
    ) -> Vec<SceneEvent> {
        self.run_trigger(state, runner, trigger, extras).0
    }

    fn run_trigger(
        &self,
        state: &mut GameState,
        runner: &mut StoryRunnerState,
        trigger: StoryTrigger,
        extras: &ContextExtras,
    ) -> (Vec<SceneEvent>, Vec<String>) {
        let scenes = self
            .story
            .trigger_story_scenes(runner, state, trigger, extras);
        if scenes.is_empty() {
            return (Vec::new(), Vec::new());
        }

        let events = self
            .story
            .build_scene_events(&scenes, state.day, runner.context());
        let fired = self.effects.apply_story_scene_effects(state, &scenes);
        if !fired.is_empty() {
            self.story.refresh_context(runner, state, extras);
        }
        (events, fired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedClock, SequenceRandom};
    use crate::story::{StoryEffect, NEWS_PROMPT_SCENE, STRUGGLING_BOON_SCENE};
    use chrono::{DateTime, Utc};
    use market_rules::{ActiveWhale, DialogueType, EventRarity, MarketEvent, NewsTopic};

    fn director() -> NarrativeDirector {
        NarrativeDirector::new(
            NarrativeConfig::default(),
            Arc::new(Catalog::builtin().unwrap()),
            Arc::new(SceneLibrary::builtin().unwrap()),
            Arc::new(DialogueRegistry::builtin().unwrap()),
            Arc::new(SequenceRandom::constant(0)),
            Arc::new(FixedClock(DateTime::<Utc>::default())),
        )
    }

    fn state() -> GameState {
        let mut state = GameState::new(10_000.0, 40, "bull_run");
        state.era.days_in_era = 5;
        state
    }

    #[test]
    fn test_builtin_director_wires_config() {
        let mut config = NarrativeConfig::default();
        config.story.retirement_multiple = 4.0;
        let director = NarrativeDirector::builtin(config).unwrap();

        assert_eq!(director.story().config().retirement_multiple, 4.0);
        assert_eq!(
            director.effects().effect_for(STRUGGLING_BOON_SCENE),
            Some(StoryEffect::StrugglingBoon)
        );
        assert!(director.dialogue().registry().is_known("kraken"));

        let mut state = state();
        state
            .market_events
            .push(MarketEvent::new("E1", 1, EventRarity::Rare, 0.01));
        assert_eq!(director.news().generate_daily_news(&state).len(), 1);
    }

    #[test]
    fn test_run_start_scene_renders_once() {
        let director = director();
        let mut state = state();
        let mut runner = StoryRunnerState::new();

        let events = director.trigger(
            &mut state,
            &mut runner,
            StoryTrigger::RunStart,
            &ContextExtras::default(),
        );

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].lines[0], "The opening bell rings on day 1.");
        assert_eq!(events[0].lines[1], "You have 40 days to reach 100000.00.");

        let again = director.trigger(
            &mut state,
            &mut runner,
            StoryTrigger::RunStart,
            &ContextExtras::default(),
        );
        assert!(again.is_empty());
    }

    #[test]
    fn test_day_tick_news_prompt_fires_with_whale_news() {
        let director = director();
        let mut state = state();
        let mut runner = StoryRunnerState::new();
        state.day = 10;
        state.whales.push(ActiveWhale::new("kraken").acted_on(10));
        state.active_whale_id = Some("kraken".to_string());

        let narrative = director.run_day_tick(&mut state, &mut runner, ContextExtras::default());

        assert_eq!(narrative.news.len(), 1);
        assert_eq!(narrative.news[0].topic, NewsTopic::Whale);
        assert!(narrative.scenes.iter().any(|s| s.id == NEWS_PROMPT_SCENE));
        assert_eq!(narrative.effects, vec![NEWS_PROMPT_SCENE]);
        assert_eq!(state.story.regulator_shots, 1);
        assert!(runner.context().news_decision_used);

        let again = director.run_day_tick(&mut state, &mut runner, ContextExtras::default());
        assert!(again.news.is_empty());
        assert!(again.effects.is_empty());
        assert_eq!(state.story.regulator_shots, 1);
    }

    #[test]
    fn test_day_tick_struggling_boon() {
        let director = director();
        let mut state = state();
        let mut runner = StoryRunnerState::new();
        state.day = 25;
        state.portfolio.cash = 3_000.0;
        state
            .market_events
            .push(MarketEvent::new("CRASH", 25, EventRarity::Legendary, -0.2));

        let narrative = director.run_day_tick(&mut state, &mut runner, ContextExtras::default());

        assert_eq!(narrative.news.len(), 1);
        assert_eq!(narrative.effects, vec![STRUGGLING_BOON_SCENE]);
        assert_eq!(state.portfolio.cash, 3_500.0);
        let boon = narrative
            .scenes
            .iter()
            .find(|s| s.id == STRUGGLING_BOON_SCENE)
            .unwrap();
        assert_eq!(boon.lines[1], "15 days left. Make it count.");

        state.portfolio.cash = 100.0;
        let later = director.run_day_tick(&mut state, &mut runner, ContextExtras::default());
        assert!(later.effects.is_empty());
        assert_eq!(state.portfolio.cash, 100.0);
    }

    #[test]
    fn test_run_end_outcomes() {
        let director = director();

        let mut lost = state();
        lost.run_ended = true;
        let events = director.trigger(
            &mut lost,
            &mut StoryRunnerState::new(),
            StoryTrigger::RunEnd,
            &ContextExtras::default(),
        );
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "ACT_IV_MARGIN_CALL");

        let mut won = state();
        won.run_ended = true;
        won.portfolio.cash = 150_000.0;
        let events = director.trigger(
            &mut won,
            &mut StoryRunnerState::new(),
            StoryTrigger::RunEnd,
            &ContextExtras::default(),
        );
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "ACT_IV_RETIREMENT");
    }

    #[test]
    fn test_whale_defeated_scene_needs_tick_flag() {
        let director = director();
        let mut state = state();
        let mut runner = StoryRunnerState::new();

        let quiet = director.trigger(
            &mut state,
            &mut runner,
            StoryTrigger::WhaleDefeated,
            &ContextExtras::default(),
        );
        assert!(quiet.is_empty());

        let events = director.trigger(
            &mut state,
            &mut runner,
            StoryTrigger::WhaleDefeated,
            &ContextExtras::whale_defeated(),
        );
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].lines[1], "Your portfolio stands at 10000.00.");
    }

    #[test]
    fn test_dialogue_through_director() {
        let director = director();
        let mut state = state();

        let event = director
            .dialogue()
            .queue_whale_dialogue(&mut state, "glacier", DialogueType::Hint)
            .unwrap();

        assert_eq!(event.text, "Yield is the only honest number.");
        assert_eq!(state.whale_dialogue_queue.len(), 1);
    }
}
