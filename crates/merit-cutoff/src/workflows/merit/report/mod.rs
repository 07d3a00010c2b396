mod table;
pub mod views;

pub use table::ReportTable;

use super::allocation::CutoffTable;
use super::domain::{Category, Seat};
use super::prediction::{PostAssessment, PredictedPost};
use views::PredictedPostView;

/// Post x category matrix, with the active profile's verdict when assessments are given.
pub fn cutoff_report(table: &CutoffTable, assessments: Option<&[PostAssessment]>) -> ReportTable {
    let mut header = vec!["Pay Level".to_string(), "Post".to_string(), "General".to_string()];
    header.extend(Category::ordered().iter().map(|category| category.label().to_string()));
    if assessments.is_some() {
        header.push("Verdict".to_string());
    }

    let mut report = ReportTable::new(header);
    for row in table.rows() {
        let mut cells = vec![
            row.post.pay_level_label(),
            row.post.name.clone(),
            row.general.cutoff.display(),
        ];
        cells.extend(
            Category::ordered()
                .into_iter()
                .map(|category| row.cell(Seat::Reserved(category)).cutoff.display()),
        );
        if let Some(assessments) = assessments {
            let verdict = assessments
                .iter()
                .find(|assessment| assessment.post == row.post.name)
                .map(|assessment| assessment.verdict.summary())
                .unwrap_or_default();
            cells.push(verdict);
        }
        report.push_row(cells);
    }
    report
}

pub fn prediction_report(predictions: &[PredictedPost]) -> ReportTable {
    let mut report = ReportTable::new(["Pay Level", "Post", "Cutoff", "Category Used", "Verdict"]);
    for prediction in predictions {
        let view = PredictedPostView::from_prediction(prediction);
        report.push_row(vec![
            view.pay_level,
            view.post,
            view.cutoff.display(),
            view.category_used.to_string(),
            view.verdict,
        ]);
    }
    report
}
