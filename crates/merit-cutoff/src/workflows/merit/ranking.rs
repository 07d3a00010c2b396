use super::domain::{Candidate, Category, ScoreBasis};
use super::profile::UserProfile;
use serde::Serialize;

/// 1-based merit position: one more than the number of strictly higher scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankPosition {
    pub overall: usize,
    pub category: usize,
}

pub fn rank(score: f64, pool: &[Candidate], basis: ScoreBasis, category: Category) -> RankPosition {
    let mut overall = 1;
    let mut within_category = 1;

    for candidate in pool {
        if candidate.score(basis) > score {
            overall += 1;
            if candidate.category == Some(category) {
                within_category += 1;
            }
        }
    }

    RankPosition {
        overall,
        category: within_category,
    }
}

/// Rank movement produced by the profile's bonus marks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BonusImpact {
    pub basis: ScoreBasis,
    pub original_score: f64,
    pub new_score: f64,
    pub original: RankPosition,
    pub new: RankPosition,
    /// Positive when the bonus moves the user up the list.
    pub overall_improvement: i64,
    pub category_improvement: i64,
}

impl BonusImpact {
    pub fn summary(&self) -> String {
        if self.overall_improvement > 0 {
            format!(
                "bonus improves overall rank by {} positions",
                self.overall_improvement
            )
        } else {
            "no rank improvement from bonus".to_string()
        }
    }
}

pub fn simulate_bonus(pool: &[Candidate], profile: &UserProfile) -> BonusImpact {
    let basis = profile.rank_basis();
    let original_score = profile.score(basis);
    let new_score = profile.score_with_bonus(basis);

    let original = rank(original_score, pool, basis, profile.category);
    let new = rank(new_score, pool, basis, profile.category);

    BonusImpact {
        basis,
        original_score,
        new_score,
        original,
        new,
        overall_improvement: original.overall as i64 - new.overall as i64,
        category_improvement: original.category as i64 - new.category as i64,
    }
}
