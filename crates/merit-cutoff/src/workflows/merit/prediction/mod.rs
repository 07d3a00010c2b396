mod config;
mod policy;
mod rules;

pub use config::{PredictionConfig, PredictionPolicy};
pub use policy::Verdict;

use super::allocation::CutoffTable;
use super::domain::{Cutoff, Seat};
use super::profile::UserProfile;
use policy::decide_verdict;
use serde::Serialize;

/// Verdict for one post, with the cutoff and seat that decided it when the user clears it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostAssessment {
    pub post: String,
    pub pay_level: u8,
    pub score_used: f64,
    pub verdict: Verdict,
    pub matched_cutoff: Option<Cutoff>,
    pub seat: Option<Seat>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictedPost {
    pub post: String,
    pub pay_level: u8,
    pub matched_cutoff: Cutoff,
    pub category_used: Seat,
    pub verdict: Verdict,
}

/// Stateless predictor comparing a profile against a cutoff table.
#[derive(Debug, Clone, Default)]
pub struct Predictor {
    config: PredictionConfig,
}

impl Predictor {
    pub fn new(config: PredictionConfig) -> Self {
        Self { config }
    }

    pub fn policy(&self) -> PredictionPolicy {
        self.config.policy
    }

    /// One assessment per post, in priority order.
    pub fn assess(&self, profile: &UserProfile, table: &CutoffTable) -> Vec<PostAssessment> {
        table
            .rows()
            .iter()
            .map(|row| {
                let signals = rules::post_signals(profile, &row.post, &self.config.computer_rules);
                let decision = decide_verdict(&signals, row, profile.category);
                PostAssessment {
                    post: row.post.name.clone(),
                    pay_level: row.post.pay_level,
                    score_used: signals.score,
                    verdict: decision.verdict,
                    matched_cutoff: decision.matched_cutoff,
                    seat: decision.seat,
                }
            })
            .collect()
    }

    /// Posts the profile clears, filtered by the configured policy.
    pub fn predict(&self, profile: &UserProfile, table: &CutoffTable) -> Vec<PredictedPost> {
        Self::matches(&self.assess(profile, table), self.config.policy)
    }

    pub fn matches(assessments: &[PostAssessment], policy: PredictionPolicy) -> Vec<PredictedPost> {
        let matched = assessments.iter().filter_map(|assessment| {
            match (assessment.matched_cutoff, assessment.seat) {
                (Some(cutoff), Some(seat)) if assessment.verdict.is_match() => Some(PredictedPost {
                    post: assessment.post.clone(),
                    pay_level: assessment.pay_level,
                    matched_cutoff: cutoff,
                    category_used: seat,
                    verdict: assessment.verdict.clone(),
                }),
                _ => None,
            }
        });

        match policy {
            PredictionPolicy::AllMatches => matched.collect(),
            PredictionPolicy::FirstMatch => matched.take(1).collect(),
        }
    }
}
