//! Scene definitions, their gating conditions, and rendered scene events.

use chrono::{DateTime, Utc};
use market_rules::NewsTopic;
use serde::{Deserialize, Serialize};

use super::context::StoryContext;

/// Lifecycle points at which scenes are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryTrigger {
    RunStart,
    DayEnd,
    WhaleArrived,
    WhaleDefeated,
    EraShift,
    RunEnd,
}

impl StoryTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryTrigger::RunStart => "run_start",
            StoryTrigger::DayEnd => "day_end",
            StoryTrigger::WhaleArrived => "whale_arrived",
            StoryTrigger::WhaleDefeated => "whale_defeated",
            StoryTrigger::EraShift => "era_shift",
            StoryTrigger::RunEnd => "run_end",
        }
    }
}

impl std::fmt::Display for StoryTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A gate a scene's context must pass. All of a scene's conditions must hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneCondition {
    MinDay { day: u32 },
    MaxDay { day: u32 },
    /// `day / max_days` has reached the fraction.
    DayFractionAtLeast { fraction: f64 },
    /// Portfolio is worth less than `ratio` times starting capital.
    PortfolioBelowStartRatio { ratio: f64 },
    /// Portfolio has reached `ratio` of the retirement target.
    PortfolioAtLeastTargetRatio { ratio: f64 },
    EraIs { era: String },
    AnyActiveWhale,
    WhaleActive { whale: String },
    WhaleDefeated { whale: String },
    WhaleDefeatedThisTick,
    RunWon,
    /// The run ended short of the target.
    RunLost,
    MinLevel { level: u32 },
    NewsDecisionUnused,
    StoryBoonUnused,
    RecentNewsTopic { topic: NewsTopic },
}

impl SceneCondition {
    pub fn holds(&self, ctx: &StoryContext) -> bool {
        match self {
            SceneCondition::MinDay { day } => ctx.day >= *day,
            SceneCondition::MaxDay { day } => ctx.day <= *day,
            SceneCondition::DayFractionAtLeast { fraction } => {
                ctx.max_days > 0 && ctx.day as f64 / ctx.max_days as f64 >= *fraction
            }
            SceneCondition::PortfolioBelowStartRatio { ratio } => {
                ctx.portfolio_value < ctx.start_capital * ratio
            }
            SceneCondition::PortfolioAtLeastTargetRatio { ratio } => {
                ctx.portfolio_value >= ctx.target_retirement * ratio
            }
            SceneCondition::EraIs { era } => ctx.active_era_id == *era,
            SceneCondition::AnyActiveWhale => ctx.active_whale_id.is_some(),
            SceneCondition::WhaleActive { whale } => {
                ctx.active_whale_id.as_deref() == Some(whale.as_str())
            }
            SceneCondition::WhaleDefeated { whale } => ctx.defeated_whales.contains(whale),
            SceneCondition::WhaleDefeatedThisTick => ctx.whale_defeated_this_tick,
            SceneCondition::RunWon => ctx.run_won,
            SceneCondition::RunLost => ctx.run_ended && !ctx.run_won,
            SceneCondition::MinLevel { level } => ctx.level >= *level,
            SceneCondition::NewsDecisionUnused => !ctx.news_decision_used,
            SceneCondition::StoryBoonUnused => !ctx.story_boon_used,
            SceneCondition::RecentNewsTopic { topic } => {
                ctx.recent_news.iter().any(|item| item.topic == *topic)
            }
        }
    }
}

/// A narrative unit as authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryScene {
    pub id: String,
    pub act_id: String,
    pub trigger: StoryTrigger,
    /// Shown at most once per run.
    #[serde(default)]
    pub once: bool,
    #[serde(default)]
    pub conditions: Vec<SceneCondition>,
    /// Line templates; see `TemplateRenderer`.
    pub lines: Vec<String>,
}

impl StoryScene {
    pub fn new(id: impl Into<String>, act_id: impl Into<String>, trigger: StoryTrigger) -> Self {
        Self {
            id: id.into(),
            act_id: act_id.into(),
            trigger,
            once: false,
            conditions: Vec::new(),
            lines: Vec::new(),
        }
    }

    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    pub fn with_condition(mut self, condition: SceneCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    pub fn eligible(&self, ctx: &StoryContext) -> bool {
        self.conditions.iter().all(|c| c.holds(ctx))
    }
}

/// A triggered scene, rendered and stamped for the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneEvent {
    pub id: String,
    pub act_id: String,
    pub trigger: StoryTrigger,
    pub day: u32,
    pub timestamp: DateTime<Utc>,
    pub lines: Vec<String>,
}
