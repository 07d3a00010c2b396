use super::super::domain::ComputerRules;
use serde::{Deserialize, Serialize};

/// Whether prediction stops at the first cleared post or lists every cleared post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionPolicy {
    #[default]
    AllMatches,
    FirstMatch,
}

impl PredictionPolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "all" | "all_matches" => Some(Self::AllMatches),
            "first" | "first_match" => Some(Self::FirstMatch),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PredictionConfig {
    pub policy: PredictionPolicy,
    pub computer_rules: ComputerRules,
}
