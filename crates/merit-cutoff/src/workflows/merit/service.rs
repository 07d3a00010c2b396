use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use super::allocation::{allocate, AllocationOutcome, CutoffTable};
use super::catalog::VacancyCatalog;
use super::domain::Category;
use super::estimator::{CutoffEstimator, CutoffFeatures};
use super::prediction::{
    PostAssessment, PredictedPost, PredictionConfig, PredictionPolicy, Predictor,
};
use super::profile::{ProfileError, UserProfile};
use super::ranking::{simulate_bonus, BonusImpact};
use super::report::{self, ReportTable};
use crate::workflows::ledger::CandidateLedger;

/// Canonical entry point shared by every front end. The allocation pass runs once at
/// construction; requests only read the resulting table.
pub struct MeritPredictorService {
    ledger: Arc<CandidateLedger>,
    catalog: Arc<VacancyCatalog>,
    outcome: Arc<AllocationOutcome>,
    computed_at: DateTime<Utc>,
    predictor: Predictor,
}

impl MeritPredictorService {
    pub fn new(
        ledger: Arc<CandidateLedger>,
        catalog: Arc<VacancyCatalog>,
        config: PredictionConfig,
    ) -> Self {
        let outcome = Arc::new(allocate(ledger.candidates(), catalog.posts()));
        let computed_at = Utc::now();
        info!(
            candidates = ledger.len(),
            posts = catalog.len(),
            %computed_at,
            "cutoff table ready"
        );
        Self {
            ledger,
            catalog,
            outcome,
            computed_at,
            predictor: Predictor::new(config),
        }
    }

    pub fn ledger(&self) -> &CandidateLedger {
        &self.ledger
    }

    pub fn catalog(&self) -> &VacancyCatalog {
        &self.catalog
    }

    pub fn outcome(&self) -> &AllocationOutcome {
        &self.outcome
    }

    pub fn cutoff_table(&self) -> &CutoffTable {
        &self.outcome.table
    }

    pub fn computed_at(&self) -> DateTime<Utc> {
        self.computed_at
    }

    pub fn policy(&self) -> PredictionPolicy {
        self.predictor.policy()
    }

    /// Ranks, bonus impact, per-post verdicts and predicted posts for one profile.
    pub fn evaluate(&self, profile: &UserProfile) -> Result<ProfileEvaluation, ProfileError> {
        profile.validate()?;

        let bonus_impact = simulate_bonus(self.ledger.candidates(), profile);
        let assessments = self.predictor.assess(profile, &self.outcome.table);
        let predictions = Predictor::matches(&assessments, self.predictor.policy());

        debug!(
            category = profile.category.label(),
            predicted = predictions.len(),
            "profile evaluated"
        );

        Ok(ProfileEvaluation {
            bonus_impact,
            assessments,
            predictions,
        })
    }

    /// Model estimate for one post and category from the ledger aggregates. `None` when the
    /// catalog has no such post.
    pub fn estimate_cutoff(
        &self,
        estimator: &dyn CutoffEstimator,
        post: &str,
        category: Category,
    ) -> Option<f64> {
        let post = self.catalog.posts().iter().find(|entry| entry.name == post)?;
        let features = CutoffFeatures::for_post(post, category, self.ledger.candidates());
        Some(estimator.estimate(&features))
    }

    pub fn cutoff_report(&self, profile: Option<&UserProfile>) -> Result<ReportTable, ProfileError> {
        match profile {
            Some(profile) => {
                let evaluation = self.evaluate(profile)?;
                Ok(report::cutoff_report(
                    &self.outcome.table,
                    Some(&evaluation.assessments),
                ))
            }
            None => Ok(report::cutoff_report(&self.outcome.table, None)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileEvaluation {
    pub bonus_impact: BonusImpact,
    pub assessments: Vec<PostAssessment>,
    pub predictions: Vec<PredictedPost>,
}

impl ProfileEvaluation {
    pub fn prediction_report(&self) -> ReportTable {
        report::prediction_report(&self.predictions)
    }
}
