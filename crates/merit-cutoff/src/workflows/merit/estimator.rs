//! Aggregate cutoff estimation, independent of the per-candidate allocation.

use super::domain::{Candidate, Category, Post};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CutoffFeatures {
    pub vacancies: f64,
    pub average_score: f64,
    pub category_code: f64,
}

impl CutoffFeatures {
    /// Seats open to `category` at `post` and the mean score, on the post's score basis, of
    /// that category's candidates who meet the post's computer requirement.
    pub fn for_post(post: &Post, category: Category, candidates: &[Candidate]) -> Self {
        let basis = post.score_basis();
        let (sum, count) = candidates
            .iter()
            .filter(|candidate| candidate.category == Some(category))
            .filter(|candidate| candidate.computer.meets(post.elevated_computer))
            .fold((0.0, 0usize), |(sum, count), candidate| {
                (sum + candidate.score(basis), count + 1)
            });
        let average_score = if count == 0 { 0.0 } else { sum / count as f64 };

        Self {
            vacancies: f64::from(post.vacancies.open_to(category)),
            average_score,
            category_code: f64::from(category.code()),
        }
    }
}

/// Any model producing a single numeric cutoff estimate from aggregate features.
pub trait CutoffEstimator: Send + Sync {
    fn estimate(&self, features: &CutoffFeatures) -> f64;
}

/// Linear model over the three features. Coefficients come from an offline fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearCutoffEstimator {
    pub intercept: f64,
    pub vacancy_weight: f64,
    pub average_weight: f64,
    pub category_weight: f64,
}

impl LinearCutoffEstimator {
    pub fn new(intercept: f64, vacancy_weight: f64, average_weight: f64, category_weight: f64) -> Self {
        Self {
            intercept,
            vacancy_weight,
            average_weight,
            category_weight,
        }
    }
}

impl Default for LinearCutoffEstimator {
    /// Predicts the category average.
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, 0.0)
    }
}

impl CutoffEstimator for LinearCutoffEstimator {
    fn estimate(&self, features: &CutoffFeatures) -> f64 {
        let raw = self.intercept
            + self.vacancy_weight * features.vacancies
            + self.average_weight * features.average_score
            + self.category_weight * features.category_code;
        (raw * 100.0).round() / 100.0
    }
}
