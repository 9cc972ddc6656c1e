//! Scene matching and text rendering.
//!
//! The runner only sees the [`SceneMatcher`] and [`SceneRenderer`] traits.
//! [`SceneLibrary`] and [`TemplateRenderer`] are the implementations the game
//! ships with.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use super::context::StoryContext;
use super::scene::{StoryScene, StoryTrigger};
use crate::error::NarrativeError;

const BUILTIN_SCENES: &str = include_str!("../../data/scenes.toml");

/// Finds the scenes that apply at a trigger point.
///
/// Implementations must be pure given their inputs.
pub trait SceneMatcher: Send + Sync {
    fn triggered_scenes(
        &self,
        ctx: &StoryContext,
        trigger: StoryTrigger,
        seen: &BTreeSet<String>,
    ) -> Vec<StoryScene>;
}

/// Turns a scene into display lines for a given context.
pub trait SceneRenderer: Send + Sync {
    fn render(&self, scene: &StoryScene, ctx: &StoryContext) -> Vec<String>;
}

/// An ordered, validated set of authored scenes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneLibrary {
    #[serde(default)]
    scenes: Vec<StoryScene>,
}

impl SceneLibrary {
    pub fn new(scenes: Vec<StoryScene>) -> Result<Self, NarrativeError> {
        let library = Self { scenes };
        library.validate()?;
        Ok(library)
    }

    /// The scenes shipped with the game.
    pub fn builtin() -> Result<Self, NarrativeError> {
        Self::from_toml_str(BUILTIN_SCENES)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, NarrativeError> {
        let library: SceneLibrary =
            toml::from_str(raw).map_err(NarrativeError::toml("scene library"))?;
        library.validate()?;
        Ok(library)
    }

    fn validate(&self) -> Result<(), NarrativeError> {
        let mut ids = HashSet::new();
        for scene in &self.scenes {
            if scene.id.trim().is_empty() {
                return Err(NarrativeError::Validation(
                    "scene id cannot be empty".to_string(),
                ));
            }
            if !ids.insert(scene.id.as_str()) {
                return Err(NarrativeError::Validation(format!(
                    "duplicate scene id {}",
                    scene.id
                )));
            }
            if scene.lines.is_empty() {
                return Err(NarrativeError::Validation(format!(
                    "scene {} has no lines",
                    scene.id
                )));
            }
        }
        Ok(())
    }

    pub fn scenes(&self) -> &[StoryScene] {
        &self.scenes
    }

    pub fn get(&self, id: &str) -> Option<&StoryScene> {
        self.scenes.iter().find(|s| s.id == id)
    }
}

impl SceneMatcher for SceneLibrary {
    fn triggered_scenes(
        &self,
        ctx: &StoryContext,
        trigger: StoryTrigger,
        seen: &BTreeSet<String>,
    ) -> Vec<StoryScene> {
        self.scenes
            .iter()
            .filter(|scene| scene.trigger == trigger)
            .filter(|scene| !(scene.once && seen.contains(&scene.id)))
            .filter(|scene| scene.eligible(ctx))
            .cloned()
            .collect()
    }
}

/// Substitutes `{placeholder}` tokens from the story context.
///
/// Supported: `{day}`, `{max_days}`, `{days_left}`, `{portfolio_value}`,
/// `{target}`, `{era}`, `{whale}`, `{level}`. Unknown tokens are left as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateRenderer;

impl TemplateRenderer {
    fn substitutions(ctx: &StoryContext) -> [(&'static str, String); 8] {
        [
            ("{day}", ctx.day.to_string()),
            ("{max_days}", ctx.max_days.to_string()),
            ("{days_left}", ctx.days_left().to_string()),
            ("{portfolio_value}", format!("{:.2}", ctx.portfolio_value)),
            ("{target}", format!("{:.2}", ctx.target_retirement)),
            ("{era}", ctx.active_era_id.clone()),
            (
                "{whale}",
                ctx.active_whale_id
                    .clone()
                    .unwrap_or_else(|| "no one".to_string()),
            ),
            ("{level}", ctx.level.to_string()),
        ]
    }
}

impl SceneRenderer for TemplateRenderer {
    fn render(&self, scene: &StoryScene, ctx: &StoryContext) -> Vec<String> {
        let substitutions = Self::substitutions(ctx);
        scene
            .lines
            .iter()
            .map(|line| {
                substitutions
                    .iter()
                    .fold(line.clone(), |acc, (token, value)| acc.replace(token, value))
            })
            .collect()
    }
}
