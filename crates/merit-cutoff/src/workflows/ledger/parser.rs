use super::normalizer::{decode_field, normalize_header, parse_category, parse_score, CategoryField};
use crate::workflows::merit::domain::Category;
use std::collections::HashMap;
use std::io::Read;
use tracing::debug;

pub(crate) const KEY_COLUMN: &str = "Roll Number";
pub(crate) const MAIN_COLUMN: &str = "Main Paper Marks";
pub(crate) const COMPUTER_COLUMN: &str = "Computer Marks";
pub(crate) const CATEGORY_COLUMN: &str = "Category";
pub(crate) const STATISTICS_COLUMN: &str = "Stat Marks";

/// Header plus data rows of a loosely formatted CSV export.
#[derive(Debug, Default)]
pub(crate) struct RawTable {
    pub(crate) header: Vec<String>,
    pub(crate) rows: Vec<Vec<String>>,
}

impl RawTable {
    pub(crate) fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|column| column == name)
    }

    /// `Roll Number` when present, otherwise the first column.
    pub(crate) fn key_column(&self) -> usize {
        self.column(KEY_COLUMN).unwrap_or(0)
    }
}

/// Reads every record. When `anchor` is given and missing from the first row, the second row is
/// tried as the header so exports with a leading title line still load.
pub(crate) fn read_table<R: Read>(reader: R, anchor: Option<&str>) -> Result<RawTable, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for record in csv_reader.byte_records() {
        let record = record?;
        let fields: Vec<String> = record.iter().map(decode_field).collect();
        records.push(fields);
    }

    let header_index = match anchor {
        Some(anchor) => records
            .iter()
            .take(2)
            .position(|row| row.iter().any(|cell| normalize_header(cell) == anchor))
            .unwrap_or(0),
        None => 0,
    };

    let mut records = records.into_iter().skip(header_index);
    let header = records
        .next()
        .map(|row| row.iter().map(|cell| normalize_header(cell)).collect())
        .unwrap_or_default();

    Ok(RawTable {
        header,
        rows: records.collect(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RowRejection {
    MissingKey,
    MissingMainScore,
    MissingComputerScore,
    MissingCategory,
}

impl RowRejection {
    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::MissingKey => "missing roll number",
            Self::MissingMainScore => "missing or non-numeric main paper marks",
            Self::MissingComputerScore => "missing or non-numeric computer marks",
            Self::MissingCategory => "missing category",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MainRecord {
    pub(crate) roll_number: String,
    pub(crate) category: Option<Category>,
    pub(crate) main_score: f64,
    pub(crate) computer_score: f64,
}

pub(crate) struct MainColumns {
    pub(crate) key: usize,
    pub(crate) main: usize,
    pub(crate) computer: usize,
    pub(crate) category: usize,
}

pub(crate) fn parse_main_row(row: &[String], columns: &MainColumns) -> Result<MainRecord, RowRejection> {
    let cell = |index: usize| row.get(index).map(String::as_str).unwrap_or("");

    let roll_number = cell(columns.key).trim().to_string();
    if roll_number.is_empty() {
        return Err(RowRejection::MissingKey);
    }
    let main_score = parse_score(cell(columns.main)).ok_or(RowRejection::MissingMainScore)?;
    let computer_score =
        parse_score(cell(columns.computer)).ok_or(RowRejection::MissingComputerScore)?;
    let category = match parse_category(cell(columns.category)) {
        CategoryField::Missing => return Err(RowRejection::MissingCategory),
        CategoryField::Known(category) => Some(category),
        CategoryField::Unrecognised => None,
    };

    Ok(MainRecord {
        roll_number,
        category,
        main_score,
        computer_score,
    })
}

/// Builds the roll number -> statistics score lookup. The first occurrence of a key wins and
/// non-numeric scores are skipped.
pub(crate) fn statistics_lookup(table: &RawTable) -> HashMap<String, f64> {
    let key = table.key_column();
    let score = table
        .column(STATISTICS_COLUMN)
        .unwrap_or_else(|| table.header.len().saturating_sub(1));

    let mut lookup = HashMap::with_capacity(table.rows.len());
    for row in &table.rows {
        let roll_number = row.get(key).map(|value| value.trim()).unwrap_or("");
        if roll_number.is_empty() {
            continue;
        }
        match row.get(score).and_then(|value| parse_score(value)) {
            Some(value) => {
                lookup.entry(roll_number.to_string()).or_insert(value);
            }
            None => debug!(roll_number, "statistics row without a numeric score"),
        }
    }
    lookup
}
