use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Closed set of candidate categories recognised by the merit list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Ur,
    Obc,
    Ews,
    Sc,
    St,
}

impl Category {
    pub const fn ordered() -> [Self; 5] {
        [Self::Ur, Self::Obc, Self::Ews, Self::Sc, Self::St]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ur => "UR",
            Self::Obc => "OBC",
            Self::Ews => "EWS",
            Self::Sc => "SC",
            Self::St => "ST",
        }
    }

    /// Numeric code used as a model feature; codes follow alphabetical label order.
    pub const fn code(self) -> u8 {
        match self {
            Self::Ews => 0,
            Self::Obc => 1,
            Self::Sc => 2,
            Self::St => 3,
            Self::Ur => 4,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "UR" => Some(Self::Ur),
            "OBC" => Some(Self::Obc),
            "EWS" => Some(Self::Ews),
            "SC" => Some(Self::Sc),
            "ST" => Some(Self::St),
            _ => None,
        }
    }
}

/// Which score column a post ranks candidates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBasis {
    MainOnly,
    WithStatistics,
}

impl ScoreBasis {
    pub const fn label(self) -> &'static str {
        match self {
            Self::MainOnly => "Main paper",
            Self::WithStatistics => "Main + statistics",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComputerThresholds {
    pub base: f64,
    pub elevated: f64,
}

/// Derived computer-proficiency flags for a single candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ComputerQualification {
    pub meets_base: bool,
    pub meets_elevated: bool,
}

impl ComputerQualification {
    /// Whether the marks satisfy a post with or without the elevated requirement.
    pub fn meets(self, elevated: bool) -> bool {
        if elevated {
            self.meets_elevated
        } else {
            self.meets_base
        }
    }
}

/// Per-category minimum computer marks. Candidates outside the closed set use the fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputerRules {
    thresholds: BTreeMap<Category, ComputerThresholds>,
    fallback: ComputerThresholds,
}

impl ComputerRules {
    pub fn standard() -> Self {
        let thresholds = [
            (Category::Ur, 18.0, 27.0),
            (Category::Obc, 15.0, 24.0),
            (Category::Ews, 15.0, 24.0),
            (Category::Sc, 12.0, 21.0),
            (Category::St, 12.0, 21.0),
        ]
        .into_iter()
        .map(|(category, base, elevated)| (category, ComputerThresholds { base, elevated }))
        .collect();

        Self {
            thresholds,
            fallback: ComputerThresholds {
                base: 12.0,
                elevated: 21.0,
            },
        }
    }

    pub fn thresholds(&self, category: Option<Category>) -> ComputerThresholds {
        category
            .and_then(|category| self.thresholds.get(&category).copied())
            .unwrap_or(self.fallback)
    }

    pub fn required(&self, category: Option<Category>, elevated: bool) -> f64 {
        let thresholds = self.thresholds(category);
        if elevated {
            thresholds.elevated
        } else {
            thresholds.base
        }
    }

    pub fn qualification(&self, category: Option<Category>, computer: f64) -> ComputerQualification {
        let thresholds = self.thresholds(category);
        ComputerQualification {
            meets_base: computer >= thresholds.base,
            meets_elevated: computer >= thresholds.elevated,
        }
    }
}

impl Default for ComputerRules {
    fn default() -> Self {
        Self::standard()
    }
}

/// One row of the candidate ledger.
///
/// `category` is `None` when the source label is outside the closed set; such candidates
/// compete for general seats but never enter a reserved pool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub roll_number: String,
    pub category: Option<Category>,
    pub main_score: f64,
    pub computer_score: f64,
    pub statistics_score: Option<f64>,
    pub computer: ComputerQualification,
}

impl Candidate {
    pub fn new(
        roll_number: impl Into<String>,
        category: impl Into<Option<Category>>,
        main_score: f64,
        computer_score: f64,
    ) -> Self {
        let category = category.into();
        Self {
            roll_number: roll_number.into(),
            category,
            main_score,
            computer_score,
            statistics_score: None,
            computer: ComputerRules::standard().qualification(category, computer_score),
        }
    }

    pub fn with_statistics(mut self, statistics_score: f64) -> Self {
        self.statistics_score = Some(statistics_score);
        self
    }

    pub(crate) fn with_rules(mut self, rules: &ComputerRules) -> Self {
        self.computer = rules.qualification(self.category, self.computer_score);
        self
    }

    pub fn score(&self, basis: ScoreBasis) -> f64 {
        match basis {
            ScoreBasis::MainOnly => self.main_score,
            ScoreBasis::WithStatistics => self.main_score + self.statistics_score.unwrap_or(0.0),
        }
    }
}

/// Vacancy counts for a post. `general` is the unreserved quota open to every category;
/// `reserved` holds the category-only seats.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Vacancies {
    pub general: u32,
    pub reserved: BTreeMap<Category, u32>,
}

impl Vacancies {
    pub fn new(general: u32) -> Self {
        Self {
            general,
            reserved: BTreeMap::new(),
        }
    }

    pub fn with_reserved(mut self, category: Category, seats: u32) -> Self {
        self.reserved.insert(category, seats);
        self
    }

    pub fn reserved_for(&self, category: Category) -> u32 {
        self.reserved.get(&category).copied().unwrap_or(0)
    }

    /// Seats a candidate of `category` could claim: the general quota plus their own reserved seats.
    pub fn open_to(&self, category: Category) -> u32 {
        self.general + self.reserved_for(category)
    }

    pub fn total(&self) -> u32 {
        self.general + self.reserved.values().sum::<u32>()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub pay_level: u8,
    pub name: String,
    pub vacancies: Vacancies,
    pub requires_statistics: bool,
    pub elevated_computer: bool,
}

impl Post {
    pub fn new(pay_level: u8, name: impl Into<String>, vacancies: Vacancies) -> Self {
        Self {
            pay_level,
            name: name.into(),
            vacancies,
            requires_statistics: false,
            elevated_computer: false,
        }
    }

    pub fn requiring_statistics(mut self) -> Self {
        self.requires_statistics = true;
        self
    }

    pub fn with_elevated_computer(mut self) -> Self {
        self.elevated_computer = true;
        self
    }

    pub fn pay_level_label(&self) -> String {
        format!("L-{}", self.pay_level)
    }

    pub fn score_basis(&self) -> ScoreBasis {
        if self.requires_statistics {
            ScoreBasis::WithStatistics
        } else {
            ScoreBasis::MainOnly
        }
    }

    /// Higher pay level first, then post name ascending.
    pub fn priority_cmp(&self, other: &Self) -> Ordering {
        other
            .pay_level
            .cmp(&self.pay_level)
            .then_with(|| self.name.cmp(&other.name))
    }
}

/// A cell of the cutoff matrix: the general quota or one reserved category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    General,
    Reserved(Category),
}

impl Seat {
    pub const fn label(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Reserved(category) => category.label(),
        }
    }
}

/// Minimum admitted score of a cell, or the not-applicable sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cutoff {
    NotApplicable,
    Score(f64),
}

impl Cutoff {
    pub const SENTINEL: &'static str = "N/A";

    pub fn score(self) -> Option<f64> {
        match self {
            Self::NotApplicable => None,
            Self::Score(score) => Some(score),
        }
    }

    pub fn is_applicable(self) -> bool {
        matches!(self, Self::Score(_))
    }

    pub fn display(self) -> String {
        match self {
            Self::NotApplicable => Self::SENTINEL.to_string(),
            Self::Score(score) => format_score(score),
        }
    }
}

impl Serialize for Cutoff {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::NotApplicable => serializer.serialize_str(Self::SENTINEL),
            Self::Score(score) => serializer.serialize_f64(*score),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CutoffCell {
    pub vacancies: u32,
    pub filled: u32,
    pub cutoff: Cutoff,
}

impl CutoffCell {
    pub fn empty(vacancies: u32) -> Self {
        Self {
            vacancies,
            filled: 0,
            cutoff: Cutoff::NotApplicable,
        }
    }

    pub fn shortfall(&self) -> u32 {
        self.vacancies.saturating_sub(self.filled)
    }

    /// Whether a score reaches the lowest admitted score of this cell. A cell nobody was
    /// admitted to has no merit line and admits nothing, whatever its shortfall.
    pub fn admits(&self, score: f64) -> bool {
        match self.cutoff {
            Cutoff::Score(cutoff) => self.vacancies > 0 && score >= cutoff,
            Cutoff::NotApplicable => false,
        }
    }
}

pub(crate) fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.0}")
    } else {
        format!("{score:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parse_is_case_and_space_insensitive() {
        assert_eq!(Category::parse(" obc "), Some(Category::Obc));
        assert_eq!(Category::parse("UR"), Some(Category::Ur));
        assert_eq!(Category::parse("PWD"), None);
        assert_eq!(Category::parse(""), None);
    }

    #[test]
    fn computer_rules_fall_back_for_unknown_category() {
        let rules = ComputerRules::standard();
        assert_eq!(rules.required(Some(Category::Ur), true), 27.0);
        assert_eq!(rules.required(Some(Category::Obc), false), 15.0);
        assert_eq!(rules.required(None, false), 12.0);
        assert_eq!(rules.required(None, true), 21.0);

        let flags = rules.qualification(Some(Category::Ur), 20.0);
        assert!(flags.meets_base);
        assert!(!flags.meets_elevated);
    }

    #[test]
    fn statistics_basis_treats_missing_paper_as_zero() {
        let candidate = Candidate::new("r-1", Category::Sc, 250.0, 30.0);
        assert_eq!(candidate.score(ScoreBasis::WithStatistics), 250.0);

        let candidate = candidate.with_statistics(40.5);
        assert_eq!(candidate.score(ScoreBasis::WithStatistics), 290.5);
        assert_eq!(candidate.score(ScoreBasis::MainOnly), 250.0);
    }

    #[test]
    fn posts_order_by_pay_level_then_name() {
        let mut posts = [
            Post::new(6, "Beta", Vacancies::new(1)),
            Post::new(7, "Zeta", Vacancies::new(1)),
            Post::new(6, "Alpha", Vacancies::new(1)),
        ];
        posts.sort_by(Post::priority_cmp);
        let names: Vec<_> = posts.iter().map(|post| post.name.as_str()).collect();
        assert_eq!(names, ["Zeta", "Alpha", "Beta"]);
    }

    #[test]
    fn cutoff_serializes_sentinel_instead_of_zero() {
        let cell = CutoffCell::empty(0);
        let json = serde_json::to_value(cell).expect("serialize");
        assert_eq!(json["cutoff"], "N/A");
        assert!(!cell.admits(1000.0));

        let json = serde_json::to_value(Cutoff::Score(0.0)).expect("serialize");
        assert_eq!(json, serde_json::json!(0.0));
    }

    #[test]
    fn partially_filled_cell_compares_against_lowest_admitted() {
        let cell = CutoffCell {
            vacancies: 3,
            filled: 1,
            cutoff: Cutoff::Score(200.0),
        };
        assert_eq!(cell.shortfall(), 2);
        assert!(!cell.admits(10.0));
        assert!(cell.admits(200.0));

        let unfilled = CutoffCell::empty(2);
        assert_eq!(unfilled.shortfall(), 2);
        assert!(!unfilled.admits(f64::MAX));

        let full = CutoffCell {
            vacancies: 1,
            filled: 1,
            cutoff: Cutoff::Score(200.0),
        };
        assert!(full.admits(200.0));
        assert!(!full.admits(199.5));
    }
}
