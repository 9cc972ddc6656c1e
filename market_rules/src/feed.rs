//! Feed records handed to the UI: news items and whale dialogue lines.
//!
//! These are plain data. Nothing in the narrative layer reads them back after
//! emission except for deduplication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a news item is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewsTopic {
    Event,
    Whale,
    Era,
}

impl NewsTopic {
    /// Prefix used in composite news ids.
    pub fn key(&self) -> &'static str {
        match self {
            NewsTopic::Event => "event",
            NewsTopic::Whale => "whale",
            NewsTopic::Era => "era",
        }
    }
}

impl std::fmt::Display for NewsTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// One headline with supporting lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    /// `topic:discriminator`; identical for identical news on reruns.
    pub id: String,
    pub day: u32,
    pub topic: NewsTopic,
    pub headline: String,
    pub lines: Vec<String>,
}

impl NewsItem {
    /// Build an item whose id is `<topic>:<discriminator>`.
    pub fn new(
        topic: NewsTopic,
        discriminator: impl std::fmt::Display,
        day: u32,
        headline: impl Into<String>,
    ) -> Self {
        Self {
            id: format!("{}:{}", topic.key(), discriminator),
            day,
            topic,
            headline: headline.into(),
            lines: Vec::new(),
        }
    }

    /// Set body lines, dropping empty ones.
    pub fn with_lines(mut self, lines: impl IntoIterator<Item = String>) -> Self {
        self.lines = lines.into_iter().filter(|line| !line.is_empty()).collect();
        self
    }
}

/// Moments a whale can speak at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueType {
    Arrival,
    Signature,
    Backfire,
    Collapse,
    Buyout,
    Hint,
}

impl DialogueType {
    pub const ALL: [DialogueType; 6] = [
        DialogueType::Arrival,
        DialogueType::Signature,
        DialogueType::Backfire,
        DialogueType::Collapse,
        DialogueType::Buyout,
        DialogueType::Hint,
    ];
}

/// A line a whale said, as queued for the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueEvent {
    pub whale_id: String,
    pub icon: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: DialogueType,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_news_id_is_composite() {
        let item = NewsItem::new(NewsTopic::Whale, "kraken:7", 7, "Kraken prowls");
        assert_eq!(item.id, "whale:kraken:7");
    }

    #[test]
    fn test_empty_lines_are_dropped() {
        let item = NewsItem::new(NewsTopic::Event, "E1", 1, "Headline").with_lines(vec![
            "first".to_string(),
            String::new(),
            "third".to_string(),
        ]);
        assert_eq!(item.lines, vec!["first", "third"]);
    }

    #[test]
    fn test_dialogue_event_wire_shape() {
        let event = DialogueEvent {
            whale_id: "kraken".to_string(),
            icon: "🦑".to_string(),
            text: "Hello".to_string(),
            kind: DialogueType::Signature,
            timestamp: DateTime::<Utc>::default(),
        };

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["whaleId"], "kraken");
        assert_eq!(value["type"], "signature");
    }
}
