use super::super::allocation::PostCutoffs;
use super::super::domain::{Category, Cutoff, Seat};
use super::super::prediction::{PostAssessment, PredictedPost};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CutoffRowView {
    pub pay_level: String,
    pub post: String,
    pub general: Cutoff,
    pub categories: Vec<CategoryCutoffView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCutoffView {
    pub category: Category,
    pub vacancies: u32,
    pub filled: u32,
    pub cutoff: Cutoff,
}

impl CutoffRowView {
    pub fn from_row(row: &PostCutoffs, assessment: Option<&PostAssessment>) -> Self {
        let categories = Category::ordered()
            .into_iter()
            .map(|category| {
                let cell = row.cell(Seat::Reserved(category));
                CategoryCutoffView {
                    category,
                    vacancies: cell.vacancies,
                    filled: cell.filled,
                    cutoff: cell.cutoff,
                }
            })
            .collect();

        Self {
            pay_level: row.post.pay_level_label(),
            post: row.post.name.clone(),
            general: row.general.cutoff,
            categories,
            verdict: assessment.map(|assessment| assessment.verdict.summary()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictedPostView {
    pub pay_level: String,
    pub post: String,
    pub cutoff: Cutoff,
    pub category_used: &'static str,
    pub verdict: String,
}

impl PredictedPostView {
    pub fn from_prediction(prediction: &PredictedPost) -> Self {
        Self {
            pay_level: format!("L-{}", prediction.pay_level),
            post: prediction.post.clone(),
            cutoff: prediction.matched_cutoff,
            category_used: prediction.category_used.label(),
            verdict: prediction.verdict.summary(),
        }
    }
}
