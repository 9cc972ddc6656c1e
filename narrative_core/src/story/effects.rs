//! One-shot story effects keyed by scene id.
//!
//! Every effect is guarded by a run flag, so applying the same scene twice in a
//! run changes nothing the second time.

use std::collections::HashMap;

use market_rules::GameState;

use super::scene::StoryScene;
use crate::config::EffectConfig;

pub const NEWS_PROMPT_SCENE: &str = "ACT_II_NEWS_PROMPT";
pub const STRUGGLING_BOON_SCENE: &str = "ACT_III_STRUGGLING_BOON";

/// State mutations a scene can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryEffect {
    /// Bank one extra regulator shot.
    NewsDecision,
    /// Emergency capital for a struggling run.
    StrugglingBoon,
}

impl StoryEffect {
    /// Apply the effect. Returns `false` when its flag was already spent.
    pub fn apply(&self, state: &mut GameState, config: &EffectConfig) -> bool {
        match self {
            StoryEffect::NewsDecision => {
                if state.story.news_decision_used {
                    return false;
                }
                state.story.news_decision_used = true;
                state.story.regulator_shots += 1;
                state.record_action("You tipped off the press. The regulator owes you a favour.");
                true
            }
            StoryEffect::StrugglingBoon => {
                if state.story.story_boon_used {
                    return false;
                }
                let bonus = config.struggling_boon();
                state.credit_cash(bonus);
                state.story.story_boon_used = true;
                state.record_action(format!("A mentor wired ${:.0} in emergency capital.", bonus));
                true
            }
        }
    }
}

/// Maps scene ids to the effect they trigger.
#[derive(Debug, Clone)]
pub struct StoryEffectDispatcher {
    effects: HashMap<String, StoryEffect>,
    config: EffectConfig,
}

impl StoryEffectDispatcher {
    /// A dispatcher with no registered effects.
    pub fn empty(config: EffectConfig) -> Self {
        Self {
            effects: HashMap::new(),
            config,
        }
    }

    /// The effects the shipped scenes use.
    pub fn new(config: EffectConfig) -> Self {
        Self::empty(config)
            .with_effect(NEWS_PROMPT_SCENE, StoryEffect::NewsDecision)
            .with_effect(STRUGGLING_BOON_SCENE, StoryEffect::StrugglingBoon)
    }

    pub fn with_effect(mut self, scene_id: impl Into<String>, effect: StoryEffect) -> Self {
        self.effects.insert(scene_id.into(), effect);
        self
    }

    pub fn effect_for(&self, scene_id: &str) -> Option<StoryEffect> {
        self.effects.get(scene_id).copied()
    }

    /// Apply effects for the given scenes in order, skipping scenes without one.
    ///
    /// Returns the ids of scenes whose effect actually fired.
    pub fn apply_story_scene_effects(
        &self,
        state: &mut GameState,
        scenes: &[StoryScene],
    ) -> Vec<String> {
        let mut fired = Vec::new();
        for scene in scenes {
            let Some(effect) = self.effect_for(&scene.id) else {
                continue;
            };
            if effect.apply(state, &self.config) {
                tracing::info!(
                    run_id = %state.run_id,
                    scene_id = %scene.id,
                    effect = ?effect,
                    "Story effect applied"
                );
                fired.push(scene.id.clone());
            } else {
                tracing::trace!(scene_id = %scene.id, "Story effect already spent");
            }
        }
        fired
    }
}

impl Default for StoryEffectDispatcher {
    fn default() -> Self {
        Self::new(EffectConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::scene::StoryTrigger;
    use market_rules::ACTION_LOG_CAPACITY;

    fn scene(id: &str) -> StoryScene {
        StoryScene::new(id, "ACT", StoryTrigger::DayEnd).with_line("...")
    }

    #[test]
    fn test_boon_applies_once() {
        let dispatcher = StoryEffectDispatcher::default();
        let mut state = GameState::new(10_000.0, 30, "bull_run");
        state.portfolio.cash = 1_234.56;
        let scenes = vec![scene(STRUGGLING_BOON_SCENE)];

        let fired = dispatcher.apply_story_scene_effects(&mut state, &scenes);
        assert_eq!(fired, vec![STRUGGLING_BOON_SCENE]);
        assert_eq!(state.portfolio.cash, 1_734.56);
        assert!(state.story.story_boon_used);
        let log_len = state.whale_action_log.len();

        let fired = dispatcher.apply_story_scene_effects(&mut state, &scenes);
        assert!(fired.is_empty());
        assert_eq!(state.portfolio.cash, 1_734.56);
        assert_eq!(state.whale_action_log.len(), log_len);
    }

    #[test]
    fn test_boon_scales_with_base_cash() {
        let config = EffectConfig {
            base_starting_cash: 40_000.0,
            ..EffectConfig::default()
        };
        let dispatcher = StoryEffectDispatcher::new(config);
        let mut state = GameState::new(40_000.0, 30, "bull_run");
        state.portfolio.cash = 0.0;

        dispatcher.apply_story_scene_effects(&mut state, &[scene(STRUGGLING_BOON_SCENE)]);

        assert_eq!(state.portfolio.cash, 2_000.0);
    }

    #[test]
    fn test_news_prompt_banks_regulator_shot() {
        let dispatcher = StoryEffectDispatcher::default();
        let mut state = GameState::new(10_000.0, 30, "bull_run");

        dispatcher.apply_story_scene_effects(&mut state, &[scene(NEWS_PROMPT_SCENE)]);
        dispatcher.apply_story_scene_effects(&mut state, &[scene(NEWS_PROMPT_SCENE)]);

        assert!(state.story.news_decision_used);
        assert_eq!(state.story.regulator_shots, 1);
        assert_eq!(state.whale_action_log.len(), 1);
    }

    #[test]
    fn test_unregistered_scenes_skipped_in_order() {
        let dispatcher = StoryEffectDispatcher::default();
        let mut state = GameState::new(10_000.0, 30, "bull_run");
        let scenes = vec![
            scene("FLAVOUR"),
            scene(NEWS_PROMPT_SCENE),
            scene("MORE_FLAVOUR"),
            scene(STRUGGLING_BOON_SCENE),
        ];

        let fired = dispatcher.apply_story_scene_effects(&mut state, &scenes);

        assert_eq!(fired, vec![NEWS_PROMPT_SCENE, STRUGGLING_BOON_SCENE]);
        let log: Vec<_> = state.whale_action_log.iter().collect();
        assert!(log[0].contains("regulator"));
        assert!(log[1].contains("$500"));
    }

    #[test]
    fn test_effect_log_respects_action_log_cap() {
        let dispatcher = StoryEffectDispatcher::default();
        let mut state = GameState::new(10_000.0, 30, "bull_run");
        for i in 0..ACTION_LOG_CAPACITY {
            state.record_action(format!("whale move {}", i));
        }

        dispatcher.apply_story_scene_effects(&mut state, &[scene(STRUGGLING_BOON_SCENE)]);

        assert_eq!(state.whale_action_log.len(), ACTION_LOG_CAPACITY);
        assert!(!state
            .whale_action_log
            .contains(&"whale move 0".to_string()));
        assert!(state
            .whale_action_log
            .latest()
            .is_some_and(|line| line.contains("emergency capital")));
    }
}
