use super::domain::{Category, Post, Vacancies};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::io::Read;
use std::path::Path;

/// Published post list: (pay level, post, [UR, SC, ST, OBC, EWS], elevated computer, requires statistics).
/// The UR column is the unreserved quota.
const STANDARD_POSTS: &[(u8, &str, [u32; 5], bool, bool)] = &[
    (7, "CSS (DoPT) - ASO", [273, 104, 52, 185, 68], true, false),
    (7, "MEA - ASO", [44, 13, 0, 33, 10], true, false),
    (7, "CBIC - Inspector (Examiner)", [68, 18, 24, 13, 14], true, false),
    (7, "CBIC - Inspector (Preventive Officer)", [138, 75, 20, 91, 29], true, false),
    (7, "CBIC - Inspector (Central Excise)", [611, 175, 82, 269, 169], true, false),
    (7, "CBDT - IT Inspector", [176, 52, 39, 95, 27], false, false),
    (7, "ED - Assistant Enforcement Officer", [1, 2, 2, 13, 0], false, false),
    (7, "IB - ASO", [100, 24, 19, 39, 15], false, false),
    (7, "Railways - ASO", [23, 4, 4, 14, 3], false, false),
    (7, "EPFO - ASO", [36, 17, 5, 30, 6], false, false),
    (7, "CBI - Sub Inspector", [52, 12, 5, 18, 6], false, false),
    (7, "NIC - ASO", [2, 0, 0, 0, 1], false, false),
    (7, "CAT - ASO", [0, 0, 0, 0, 1], false, false),
    (7, "CBN - Inspector", [1, 1, 0, 1, 1], false, false),
    (7, "ECI - ASO", [0, 0, 0, 5, 1], false, false),
    (7, "MeitY - ASO", [2, 0, 1, 0, 0], false, false),
    (6, "CBIC - Executive Assistant", [89, 24, 12, 40, 18], true, false),
    (6, "CBDT - Office Superintendent", [2766, 1012, 496, 1822, 657], false, false),
    (6, "RGI - Statistical Investigator Gr. II", [50, 18, 12, 28, 10], false, true),
    (6, "MoSPI - Junior Statistical Officer", [124, 47, 15, 36, 27], false, true),
    (6, "ED - Assistant", [0, 0, 0, 3, 0], false, false),
    (6, "TRAI - Assistant", [2, 1, 0, 0, 0], false, false),
    (6, "Official Language - Assistant", [4, 0, 0, 1, 0], false, false),
    (6, "MCA - Assistant", [0, 1, 0, 0, 0], false, false),
    (6, "Mines - Assistant", [11, 2, 2, 3, 4], true, false),
    (6, "Textiles - Assistant", [1, 0, 0, 0, 0], false, false),
    (6, "Indian Coast Guard - Assistant", [8, 3, 1, 5, 1], false, false),
    (6, "DFSS - Assistant", [1, 0, 0, 1, 1], false, false),
    (6, "NCB - ASO", [7, 1, 1, 2, 0], false, false),
    (6, "NCB - Sub-Inspector/JIO", [10, 3, 4, 8, 5], false, false),
    (6, "NIA - Sub Inspector", [6, 2, 1, 3, 2], false, false),
    (6, "MoSPI - Assistant", [0, 0, 0, 2, 0], false, false),
    (5, "CGDA - Auditor", [477, 176, 88, 316, 117], false, false),
    (5, "C&AG - Accountant", [86, 31, 17, 28, 18], false, false),
    (5, "Posts - Accountant", [42, 13, 6, 12, 3], false, false),
    (5, "CGCA - Accountant", [15, 6, 3, 9, 3], false, false),
    (4, "CBIC - Tax Assistant", [256, 136, 82, 203, 94], true, false),
    (4, "CBDT - Tax Assistant", [572, 171, 80, 340, 86], false, false),
    (4, "MSME - UDC/SSA", [25, 4, 5, 16, 5], false, false),
    (4, "Science & Tech - UDC/SSA", [24, 9, 4, 16, 6], false, false),
    (4, "CBN - UDC/SSA", [12, 2, 0, 5, 2], false, false),
    (4, "CBN - Sub-Inspector", [11, 2, 0, 6, 0], false, false),
    (4, "Mines - UDC/SSA", [13, 2, 3, 4, 4], false, false),
    (4, "DGDE - UDC/SSA", [7, 2, 1, 3, 1], false, false),
    (4, "MeitY - UDC/SSA", [5, 1, 1, 2, 1], false, false),
    (4, "Textiles - UDC/SSA", [4, 0, 1, 1, 2], false, false),
    (4, "Water Resources - UDC/SSA", [5, 0, 0, 0, 0], false, false),
    (4, "BRO - UDC/SSA", [20, 1, 0, 0, 4], false, false),
    (4, "Agriculture - UDC/SSA", [2, 0, 0, 0, 1], false, false),
    (4, "Health - UDC/SSA", [1, 0, 0, 0, 0], false, false),
    (4, "Dept of Post - PA/SA", [0, 0, 0, 0, 0], true, false),
];

/// Fixed list of posts with their vacancy counts and qualifying flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VacancyCatalog {
    posts: Vec<Post>,
}

impl VacancyCatalog {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    pub fn standard() -> Self {
        let posts = STANDARD_POSTS
            .iter()
            .map(|&(pay_level, name, [ur, sc, st, obc, ews], elevated, statistics)| {
                let vacancies = Vacancies::new(ur)
                    .with_reserved(Category::Sc, sc)
                    .with_reserved(Category::St, st)
                    .with_reserved(Category::Obc, obc)
                    .with_reserved(Category::Ews, ews);
                Post {
                    pay_level,
                    name: name.to_string(),
                    vacancies,
                    requires_statistics: statistics,
                    elevated_computer: elevated,
                }
            })
            .collect();
        Self { posts }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Reads `Pay Level, Post, UR, SC, ST, OBC, EWS, [UR Reserved], Elevated Computer,
    /// Requires Statistics`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut posts = Vec::new();

        for (index, record) in csv_reader.deserialize::<CatalogRow>().enumerate() {
            let row = record?;
            let line = index + 2;
            posts.push(row.into_post(line)?);
        }

        Ok(Self { posts })
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn in_priority_order(&self) -> Vec<&Post> {
        let mut ordered: Vec<&Post> = self.posts.iter().collect();
        ordered.sort_by(|a, b| a.priority_cmp(b));
        ordered
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Pay Level")]
    pay_level: String,
    #[serde(rename = "Post")]
    post: String,
    #[serde(rename = "UR")]
    ur: u32,
    #[serde(rename = "SC")]
    sc: u32,
    #[serde(rename = "ST")]
    st: u32,
    #[serde(rename = "OBC")]
    obc: u32,
    #[serde(rename = "EWS")]
    ews: u32,
    #[serde(rename = "UR Reserved", default)]
    ur_reserved: u32,
    #[serde(rename = "Elevated Computer", deserialize_with = "flag")]
    elevated_computer: bool,
    #[serde(rename = "Requires Statistics", deserialize_with = "flag")]
    requires_statistics: bool,
}

impl CatalogRow {
    fn into_post(self, line: usize) -> Result<Post, CatalogError> {
        let pay_level = parse_pay_level(&self.pay_level).ok_or_else(|| CatalogError::InvalidRow {
            line,
            reason: format!("unrecognised pay level '{}'", self.pay_level),
        })?;
        if self.post.is_empty() {
            return Err(CatalogError::InvalidRow {
                line,
                reason: "post name is empty".to_string(),
            });
        }

        let vacancies = Vacancies::new(self.ur)
            .with_reserved(Category::Ur, self.ur_reserved)
            .with_reserved(Category::Sc, self.sc)
            .with_reserved(Category::St, self.st)
            .with_reserved(Category::Obc, self.obc)
            .with_reserved(Category::Ews, self.ews);

        Ok(Post {
            pay_level,
            name: self.post,
            vacancies,
            requires_statistics: self.requires_statistics,
            elevated_computer: self.elevated_computer,
        })
    }
}

fn parse_pay_level(raw: &str) -> Option<u8> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix("L-")
        .or_else(|| trimmed.strip_prefix("l-"))
        .unwrap_or(trimmed);
    digits.trim().parse().ok()
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected a yes/no flag, got '{other}'"
        ))),
    }
}

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow { line: usize, reason: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(err) => write!(f, "failed to read vacancy catalog: {}", err),
            CatalogError::Csv(err) => write!(f, "invalid vacancy catalog data: {}", err),
            CatalogError::InvalidRow { line, reason } => {
                write!(f, "vacancy catalog line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(err) => Some(err),
            CatalogError::Csv(err) => Some(err),
            CatalogError::InvalidRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}
