use super::domain::{Category, ScoreBasis};
use serde::{Deserialize, Serialize};

pub const MAIN_SCORE_MAX: f64 = 390.0;
pub const STATISTICS_SCORE_MAX: f64 = 200.0;
pub const COMPUTER_SCORE_MAX: f64 = 60.0;
pub const BONUS_MAX: f64 = 20.0;

/// Hypothetical extra marks per paper (e.g. from answer-key revisions).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BonusMarks {
    #[serde(default)]
    pub main: f64,
    #[serde(default)]
    pub statistics: f64,
    #[serde(default)]
    pub computer: f64,
}

/// The user's own marks for a single prediction request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub main_score: f64,
    #[serde(default)]
    pub statistics_score: Option<f64>,
    pub computer_score: f64,
    pub category: Category,
    #[serde(default)]
    pub bonus: BonusMarks,
}

impl UserProfile {
    pub fn new(main_score: f64, computer_score: f64, category: Category) -> Self {
        Self {
            main_score,
            statistics_score: None,
            computer_score,
            category,
            bonus: BonusMarks::default(),
        }
    }

    pub fn with_statistics(mut self, statistics_score: f64) -> Self {
        self.statistics_score = Some(statistics_score);
        self
    }

    pub fn with_bonus(mut self, bonus: BonusMarks) -> Self {
        self.bonus = bonus;
        self
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        check("main_score", self.main_score, MAIN_SCORE_MAX)?;
        if let Some(statistics) = self.statistics_score {
            check("statistics_score", statistics, STATISTICS_SCORE_MAX)?;
        }
        check("computer_score", self.computer_score, COMPUTER_SCORE_MAX)?;
        check("bonus.main", self.bonus.main, BONUS_MAX)?;
        check("bonus.statistics", self.bonus.statistics, BONUS_MAX)?;
        check("bonus.computer", self.bonus.computer, BONUS_MAX)?;
        Ok(())
    }

    /// A zero or missing statistics score means the paper was not taken.
    pub fn attempted_statistics(&self) -> bool {
        self.statistics_score.is_some_and(|score| score > 0.0)
    }

    pub fn rank_basis(&self) -> ScoreBasis {
        if self.attempted_statistics() {
            ScoreBasis::WithStatistics
        } else {
            ScoreBasis::MainOnly
        }
    }

    pub fn score(&self, basis: ScoreBasis) -> f64 {
        match basis {
            ScoreBasis::MainOnly => self.main_score,
            ScoreBasis::WithStatistics => self.main_score + self.statistics_or_zero(),
        }
    }

    /// Score after bonus marks. A statistics bonus only counts when the paper was attempted.
    pub fn score_with_bonus(&self, basis: ScoreBasis) -> f64 {
        let main = self.main_score + self.bonus.main;
        match basis {
            ScoreBasis::MainOnly => main,
            ScoreBasis::WithStatistics if self.attempted_statistics() => {
                main + self.statistics_or_zero() + self.bonus.statistics
            }
            ScoreBasis::WithStatistics => main,
        }
    }

    pub fn computer_with_bonus(&self) -> f64 {
        self.computer_score + self.bonus.computer
    }

    fn statistics_or_zero(&self) -> f64 {
        self.statistics_score.unwrap_or(0.0)
    }
}

fn check(field: &'static str, value: f64, max: f64) -> Result<(), ProfileError> {
    if !value.is_finite() {
        return Err(ProfileError::NotFinite { field });
    }
    if !(0.0..=max).contains(&value) {
        return Err(ProfileError::OutOfRange {
            field,
            value,
            min: 0.0,
            max,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_out_of_range_marks() {
        let profile = UserProfile::new(391.0, 20.0, Category::Ur);
        match profile.validate() {
            Err(ProfileError::OutOfRange { field, .. }) => assert_eq!(field, "main_score"),
            other => panic!("expected range error, got {other:?}"),
        }

        let profile = UserProfile::new(300.0, 20.0, Category::Ur).with_bonus(BonusMarks {
            main: 25.0,
            ..BonusMarks::default()
        });
        assert!(profile.validate().is_err());

        let profile = UserProfile::new(f64::NAN, 20.0, Category::Ur);
        assert_eq!(
            profile.validate(),
            Err(ProfileError::NotFinite {
                field: "main_score"
            })
        );
    }

    #[test]
    fn zero_statistics_counts_as_not_attempted() {
        let profile = UserProfile::new(310.0, 25.0, Category::Obc).with_statistics(0.0);
        assert!(!profile.attempted_statistics());
        assert_eq!(profile.rank_basis(), ScoreBasis::MainOnly);

        let profile = profile.with_bonus(BonusMarks {
            statistics: 10.0,
            ..BonusMarks::default()
        });
        assert_eq!(profile.score_with_bonus(ScoreBasis::WithStatistics), 310.0);
    }

    #[test]
    fn bonus_applies_per_paper() {
        let profile = UserProfile::new(300.0, 20.0, Category::Sc)
            .with_statistics(80.0)
            .with_bonus(BonusMarks {
                main: 10.0,
                statistics: 5.0,
                computer: 4.0,
            });
        assert_eq!(profile.score(ScoreBasis::WithStatistics), 380.0);
        assert_eq!(profile.score_with_bonus(ScoreBasis::WithStatistics), 395.0);
        assert_eq!(profile.score_with_bonus(ScoreBasis::MainOnly), 310.0);
        assert_eq!(profile.computer_with_bonus(), 24.0);
    }
}
