use super::super::allocation::PostCutoffs;
use super::super::domain::{Category, Cutoff, Seat};
use super::rules::PostSignals;
use serde::Serialize;

/// Outcome of comparing a profile against one post.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Verdict {
    ClearsGeneralMerit,
    ClearsCategoryCutoff,
    LowChance,
    /// Below every merit line, but the post left seats unfilled in the general quota or the
    /// user's category.
    UnfilledSeats,
    StatisticsPaperAbsent,
    NoVacancyForCategory,
    ComputerRequirementNotMet { required: f64, actual: f64 },
}

impl Verdict {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::ClearsGeneralMerit | Self::ClearsCategoryCutoff)
    }

    pub fn summary(&self) -> String {
        match self {
            Self::ClearsGeneralMerit => "high chance (clears general merit)".to_string(),
            Self::ClearsCategoryCutoff => "high chance".to_string(),
            Self::LowChance => "low chance".to_string(),
            Self::UnfilledSeats => "low chance (seats left unfilled)".to_string(),
            Self::StatisticsPaperAbsent => "statistics paper absent".to_string(),
            Self::NoVacancyForCategory => "no vacancy for category".to_string(),
            Self::ComputerRequirementNotMet { required, actual } => {
                format!("computer marks {actual} below required {required}")
            }
        }
    }
}

pub(crate) struct Decision {
    pub verdict: Verdict,
    pub matched_cutoff: Option<Cutoff>,
    pub seat: Option<Seat>,
}

impl Decision {
    fn rejected(verdict: Verdict) -> Self {
        Self {
            verdict,
            matched_cutoff: None,
            seat: None,
        }
    }
}

/// General merit is checked before the user's own category; clearing it is reported as such
/// whatever the user's category.
pub(crate) fn decide_verdict(
    signals: &PostSignals,
    row: &PostCutoffs,
    category: Category,
) -> Decision {
    if signals.seats_open == 0 {
        return Decision::rejected(Verdict::NoVacancyForCategory);
    }

    if signals.computer_actual < signals.computer_required {
        return Decision::rejected(Verdict::ComputerRequirementNotMet {
            required: signals.computer_required,
            actual: signals.computer_actual,
        });
    }

    if signals.statistics_missing {
        return Decision::rejected(Verdict::StatisticsPaperAbsent);
    }

    let general = row.general;
    if general.admits(signals.score) {
        return Decision {
            verdict: Verdict::ClearsGeneralMerit,
            matched_cutoff: Some(general.cutoff),
            seat: Some(Seat::General),
        };
    }

    let seat = Seat::Reserved(category);
    let own = row.cell(seat);
    if own.admits(signals.score) {
        return Decision {
            verdict: Verdict::ClearsCategoryCutoff,
            matched_cutoff: Some(own.cutoff),
            seat: Some(seat),
        };
    }

    if general.shortfall() > 0 || own.shortfall() > 0 {
        return Decision::rejected(Verdict::UnfilledSeats);
    }

    Decision::rejected(Verdict::LowChance)
}
