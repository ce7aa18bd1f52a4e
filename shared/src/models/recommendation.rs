//! Crop recommendation models

use serde::{Deserialize, Serialize};

/// Length of the synthetic confidence history attached to a recommendation
pub const HISTORY_LEN: usize = 4;

/// Directional hint attached to a recommendation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Stable,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Up => write!(f, "up"),
            Trend::Stable => write!(f, "stable"),
        }
    }
}

/// A single ranked crop suggestion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub name: String,
    /// Certainty score, 0-100
    pub confidence: u8,
    pub description: String,
    pub optimal_conditions: String,
    pub trend: Trend,
    /// Synthetic trajectory ending at `confidence`
    #[serde(rename = "historicalData")]
    pub historical_data: [u8; HISTORY_LEN],
}

/// Capitalize the first letter of each word ("kidney beans" -> "Kidney Beans")
pub fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
