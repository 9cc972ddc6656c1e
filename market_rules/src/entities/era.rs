//! Eras: named macro-periods of the simulation.

use serde::{Deserialize, Serialize};

/// Modifiers an era applies to the market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EraEffects {
    #[serde(default)]
    pub volatility_multiplier: Option<f64>,
}

impl EraEffects {
    pub fn volatility(&self) -> f64 {
        self.volatility_multiplier.unwrap_or(1.0)
    }
}

/// Static era definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Era {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub effects: EraEffects,
}

impl Era {
    /// Stand-in for an era id no catalog knows about.
    pub fn placeholder(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            description: "Conditions are unclear.".to_string(),
            effects: EraEffects::default(),
        }
    }
}

/// Era bookkeeping for the current run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EraState {
    pub active_era_id: String,
    /// Days since the last transition; 0 on the transition day.
    pub days_in_era: u32,
    /// Set when the era was force-mutated this tick.
    #[serde(default)]
    pub mutation_message: Option<String>,
    #[serde(default)]
    pub predicted_next_era_id: Option<String>,
    /// 0.0 - 1.0.
    #[serde(default)]
    pub forecast_confidence: f64,
}

impl EraState {
    pub fn new(era_id: impl Into<String>) -> Self {
        Self {
            active_era_id: era_id.into(),
            days_in_era: 0,
            mutation_message: None,
            predicted_next_era_id: None,
            forecast_confidence: 0.0,
        }
    }

    /// The mutation message, if one was set and is not blank.
    pub fn mutation(&self) -> Option<&str> {
        self.mutation_message
            .as_deref()
            .filter(|message| !message.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volatility_defaults_to_one() {
        assert_eq!(EraEffects::default().volatility(), 1.0);

        let effects = EraEffects {
            volatility_multiplier: Some(1.75),
        };
        assert_eq!(effects.volatility(), 1.75);
    }

    #[test]
    fn test_blank_mutation_message_is_no_mutation() {
        let mut state = EraState::new("bull_run");
        assert_eq!(state.mutation(), None);

        state.mutation_message = Some(String::new());
        assert_eq!(state.mutation(), None);

        state.mutation_message = Some("  ".to_string());
        assert_eq!(state.mutation(), None);

        state.mutation_message = Some("Flash crash".to_string());
        assert_eq!(state.mutation(), Some("Flash crash"));
    }

    #[test]
    fn test_placeholder_era() {
        let era = Era::placeholder("lost_decade");
        assert_eq!(era.id, "lost_decade");
        assert_eq!(era.name, "lost_decade");
        assert_eq!(era.effects.volatility(), 1.0);
    }
}
