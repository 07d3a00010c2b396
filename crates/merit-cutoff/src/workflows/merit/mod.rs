pub mod allocation;
pub mod catalog;
pub mod domain;
pub mod estimator;
pub mod prediction;
pub mod profile;
pub mod ranking;
pub mod report;
pub mod service;

#[cfg(test)]
mod tests;

pub use allocation::{allocate, AllocationOutcome, Assignment, CutoffTable, PostCutoffs};
pub use catalog::{CatalogError, VacancyCatalog};
pub use domain::{
    Candidate, Category, ComputerRules, Cutoff, CutoffCell, Post, ScoreBasis, Seat, Vacancies,
};
pub use estimator::{CutoffEstimator, CutoffFeatures, LinearCutoffEstimator};
pub use prediction::{
    PostAssessment, PredictedPost, PredictionConfig, PredictionPolicy, Predictor, Verdict,
};
pub use profile::{BonusMarks, ProfileError, UserProfile};
pub use ranking::{rank, simulate_bonus, BonusImpact, RankPosition};
pub use report::ReportTable;
pub use service::{MeritPredictorService, ProfileEvaluation};
