//! Story runner - evaluates scenes at trigger points and remembers which
//! one-shot scenes the player has already seen.

use std::collections::BTreeSet;
use std::sync::Arc;

use market_rules::GameState;
use serde::{Deserialize, Serialize};

use super::context::{base_story_context, ContextExtras, StoryContext};
use super::library::{SceneMatcher, SceneRenderer};
use super::scene::{SceneEvent, StoryScene, StoryTrigger};
use crate::config::StoryConfig;
use crate::ports::Clock;

/// Per-run story progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StoryRunnerState {
    /// Ids of `once` scenes already shown. Only ever grows within a run.
    seen_cutscene_ids: BTreeSet<String>,
    /// Context from the latest trigger evaluation or refresh.
    context: StoryContext,
}

impl StoryRunnerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen_cutscene_ids(&self) -> &BTreeSet<String> {
        &self.seen_cutscene_ids
    }

    pub fn has_seen(&self, scene_id: &str) -> bool {
        self.seen_cutscene_ids.contains(scene_id)
    }

    pub fn context(&self) -> &StoryContext {
        &self.context
    }

    fn mark_seen(&mut self, scene_id: &str) -> bool {
        if self.seen_cutscene_ids.contains(scene_id) {
            return false;
        }
        self.seen_cutscene_ids.insert(scene_id.to_string())
    }
}

/// Drives scene matching and rendering with injected collaborators.
pub struct StoryEngine {
    matcher: Arc<dyn SceneMatcher>,
    renderer: Arc<dyn SceneRenderer>,
    clock: Arc<dyn Clock>,
    config: StoryConfig,
}

impl StoryEngine {
    pub fn new(
        matcher: Arc<dyn SceneMatcher>,
        renderer: Arc<dyn SceneRenderer>,
        clock: Arc<dyn Clock>,
        config: StoryConfig,
    ) -> Self {
        Self {
            matcher,
            renderer,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &StoryConfig {
        &self.config
    }

    /// Rebuild the runner's context from the current state.
    pub fn refresh_context<'r>(
        &self,
        runner: &'r mut StoryRunnerState,
        state: &GameState,
        extras: &ContextExtras,
    ) -> &'r StoryContext {
        runner.context = base_story_context(state, extras, &self.config);
        &runner.context
    }

    /// Find the scenes that apply at `trigger` and record `once` scenes as seen.
    ///
    /// Returns the raw scene definitions; use [`Self::build_scene_events`] to
    /// render them.
    pub fn trigger_story_scenes(
        &self,
        runner: &mut StoryRunnerState,
        state: &GameState,
        trigger: StoryTrigger,
        extras: &ContextExtras,
    ) -> Vec<StoryScene> {
        self.refresh_context(runner, state, extras);

        let scenes =
            self.matcher
                .triggered_scenes(&runner.context, trigger, &runner.seen_cutscene_ids);

        for scene in scenes.iter().filter(|s| s.once) {
            if runner.mark_seen(&scene.id) {
                tracing::debug!(
                    run_id = %state.run_id,
                    scene_id = %scene.id,
                    trigger = %trigger,
                    "One-shot scene marked seen"
                );
            }
        }

        if !scenes.is_empty() {
            tracing::debug!(
                day = state.day,
                trigger = %trigger,
                count = scenes.len(),
                "Story scenes triggered"
            );
        }

        scenes
    }

    /// Render scenes into timestamped events. Mutates nothing.
    pub fn build_scene_events(
        &self,
        scenes: &[StoryScene],
        day: u32,
        ctx: &StoryContext,
    ) -> Vec<SceneEvent> {
        let timestamp = self.clock.now();
        scenes
            .iter()
            .map(|scene| SceneEvent {
                id: scene.id.clone(),
                act_id: scene.act_id.clone(),
                trigger: scene.trigger,
                day,
                timestamp,
                lines: self.renderer.render(scene, ctx),
            })
            .collect()
    }
}
