//! Candidate ledger ingestion.
//!
//! Rows missing main paper marks, computer marks or a category are dropped, never defaulted.
//! The optional statistics table is left-joined by roll number; candidates without a match
//! carry no statistics score.

mod normalizer;
mod parser;

use crate::workflows::merit::domain::{Candidate, ComputerRules};
use parser::{MainColumns, RawTable};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug)]
pub enum LedgerImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingSource { path: PathBuf },
    MissingColumn { table: &'static str, column: &'static str },
}

impl fmt::Display for LedgerImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerImportError::Io(err) => write!(f, "failed to read marks table: {}", err),
            LedgerImportError::Csv(err) => write!(f, "invalid marks CSV data: {}", err),
            LedgerImportError::MissingSource { path } => {
                write!(f, "marks file '{}' not found", path.display())
            }
            LedgerImportError::MissingColumn { table, column } => {
                write!(f, "{} table has no '{}' column", table, column)
            }
        }
    }
}

impl std::error::Error for LedgerImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LedgerImportError::Io(err) => Some(err),
            LedgerImportError::Csv(err) => Some(err),
            LedgerImportError::MissingSource { .. } | LedgerImportError::MissingColumn { .. } => {
                None
            }
        }
    }
}

impl From<std::io::Error> for LedgerImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for LedgerImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub statistics_table: bool,
    pub statistics_matched: usize,
    pub statistics_unmatched: usize,
}

/// Immutable, normalized candidate table in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateLedger {
    candidates: Vec<Candidate>,
    summary: IngestSummary,
}

impl CandidateLedger {
    /// Builds a ledger from candidates already in memory. With no source tables to inspect,
    /// `statistics_table` is inferred as true when any candidate carries a statistics score.
    /// Imported ledgers report whether a statistics table was actually read.
    pub fn new(candidates: Vec<Candidate>) -> Self {
        let statistics_matched = candidates
            .iter()
            .filter(|candidate| candidate.statistics_score.is_some())
            .count();
        let summary = IngestSummary {
            rows_read: candidates.len(),
            rows_dropped: 0,
            statistics_table: statistics_matched > 0,
            statistics_matched,
            statistics_unmatched: candidates.len() - statistics_matched,
        };
        Self {
            candidates,
            summary,
        }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn summary(&self) -> IngestSummary {
        self.summary
    }

    pub fn find(&self, roll_number: &str) -> Option<&Candidate> {
        self.candidates
            .iter()
            .find(|candidate| candidate.roll_number == roll_number)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Loads the main marks table and the optional statistics table into a [`CandidateLedger`].
#[derive(Debug, Clone, Default)]
pub struct LedgerImporter {
    rules: ComputerRules,
}

impl LedgerImporter {
    pub fn new(rules: ComputerRules) -> Self {
        Self { rules }
    }

    /// The main table must exist. A statistics path that does not exist is logged and skipped.
    pub fn from_paths<P: AsRef<Path>>(
        &self,
        main: P,
        statistics: Option<&Path>,
    ) -> Result<CandidateLedger, LedgerImportError> {
        let main = main.as_ref();
        if !main.exists() {
            return Err(LedgerImportError::MissingSource {
                path: main.to_path_buf(),
            });
        }
        let main_table = parser::read_table(std::fs::File::open(main)?, Some(parser::MAIN_COLUMN))?;

        let statistics_table = match statistics {
            Some(path) if path.exists() => {
                Some(parser::read_table(std::fs::File::open(path)?, None)?)
            }
            Some(path) => {
                warn!(path = %path.display(), "statistics table not found; statistics marks default to zero");
                None
            }
            None => None,
        };

        self.build(main_table, statistics_table)
    }

    pub fn from_reader<R: Read>(&self, main: R) -> Result<CandidateLedger, LedgerImportError> {
        let main_table = parser::read_table(main, Some(parser::MAIN_COLUMN))?;
        self.build(main_table, None)
    }

    pub fn from_readers<R: Read, S: Read>(
        &self,
        main: R,
        statistics: S,
    ) -> Result<CandidateLedger, LedgerImportError> {
        let main_table = parser::read_table(main, Some(parser::MAIN_COLUMN))?;
        let statistics_table = parser::read_table(statistics, None)?;
        self.build(main_table, Some(statistics_table))
    }

    fn build(
        &self,
        main: RawTable,
        statistics: Option<RawTable>,
    ) -> Result<CandidateLedger, LedgerImportError> {
        let columns = MainColumns {
            key: main.key_column(),
            main: require_column(&main, parser::MAIN_COLUMN)?,
            computer: require_column(&main, parser::COMPUTER_COLUMN)?,
            category: require_column(&main, parser::CATEGORY_COLUMN)?,
        };
        let lookup: Option<HashMap<String, f64>> = statistics.as_ref().map(parser::statistics_lookup);

        let mut summary = IngestSummary {
            statistics_table: lookup.is_some(),
            ..IngestSummary::default()
        };
        let mut candidates = Vec::with_capacity(main.rows.len());

        for (index, row) in main.rows.iter().enumerate() {
            summary.rows_read += 1;
            let record = match parser::parse_main_row(row, &columns) {
                Ok(record) => record,
                Err(rejection) => {
                    summary.rows_dropped += 1;
                    debug!(row = index + 1, reason = rejection.label(), "dropping ledger row");
                    continue;
                }
            };

            let mut candidate = Candidate::new(
                record.roll_number,
                record.category,
                record.main_score,
                record.computer_score,
            )
            .with_rules(&self.rules);

            if let Some(lookup) = &lookup {
                match lookup.get(&candidate.roll_number) {
                    Some(&score) => {
                        candidate = candidate.with_statistics(score);
                        summary.statistics_matched += 1;
                    }
                    None => summary.statistics_unmatched += 1,
                }
            }

            candidates.push(candidate);
        }

        info!(
            rows_read = summary.rows_read,
            rows_dropped = summary.rows_dropped,
            statistics_matched = summary.statistics_matched,
            statistics_unmatched = summary.statistics_unmatched,
            "candidate ledger loaded"
        );

        Ok(CandidateLedger {
            candidates,
            summary,
        })
    }
}

fn require_column(table: &RawTable, column: &'static str) -> Result<usize, LedgerImportError> {
    table.column(column).ok_or(LedgerImportError::MissingColumn {
        table: "main",
        column,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::merit::domain::{Category, ScoreBasis};
    use std::io::Cursor;

    const MAIN: &str = "Roll Number,Name,Category,Main Paper Marks,Computer Marks\n\
1001,Asha,UR,312.5,30\n\
1002,Bilal,OBC,AB,25\n\
1003,Chitra,,280,22\n\
1004,Dev,SC,260,\n\
1005,Esha,ESM,250,19\n\
1006,Farid,st,240,13\n";

    const STATS: &str = "Roll Number,Stat Marks\n1001,120\n1006,abc\n1001,10\n";

    #[test]
    fn drops_rows_missing_required_fields() {
        let ledger = LedgerImporter::default()
            .from_reader(Cursor::new(MAIN))
            .expect("ledger loads");

        let rolls: Vec<_> = ledger
            .candidates()
            .iter()
            .map(|candidate| candidate.roll_number.as_str())
            .collect();
        assert_eq!(rolls, ["1001", "1005", "1006"]);

        let summary = ledger.summary();
        assert_eq!(summary.rows_read, 6);
        assert_eq!(summary.rows_dropped, 3);
        assert!(!summary.statistics_table);
    }

    #[test]
    fn unrecognised_category_is_kept_without_reserved_pool() {
        let ledger = LedgerImporter::default()
            .from_reader(Cursor::new(MAIN))
            .expect("ledger loads");

        let esha = ledger.find("1005").expect("row kept");
        assert_eq!(esha.category, None);
        assert!(esha.computer.meets_base);

        let farid = ledger.find("1006").expect("row kept");
        assert_eq!(farid.category, Some(Category::St));
        assert!(farid.computer.meets_base);
        assert!(!farid.computer.meets_elevated);
    }

    #[test]
    fn statistics_join_is_left_and_first_match_wins() {
        let ledger = LedgerImporter::default()
            .from_readers(Cursor::new(MAIN), Cursor::new(STATS))
            .expect("ledger loads");

        let asha = ledger.find("1001").expect("present");
        assert_eq!(asha.statistics_score, Some(120.0));
        assert_eq!(asha.score(ScoreBasis::WithStatistics), 432.5);

        let farid = ledger.find("1006").expect("present");
        assert_eq!(farid.statistics_score, None);
        assert_eq!(farid.score(ScoreBasis::WithStatistics), 240.0);

        let summary = ledger.summary();
        assert_eq!(summary.statistics_matched, 1);
        assert_eq!(summary.statistics_unmatched, 2);
    }

    #[test]
    fn statistics_table_flag_reflects_the_source() {
        let unmatched = "Roll Number,Stat Marks\n9999,150\n";
        let imported = LedgerImporter::default()
            .from_readers(Cursor::new(MAIN), Cursor::new(unmatched))
            .expect("ledger loads");
        let summary = imported.summary();
        assert!(summary.statistics_table);
        assert_eq!(summary.statistics_matched, 0);
        assert_eq!(summary.statistics_unmatched, 3);

        let in_memory = CandidateLedger::new(imported.candidates().to_vec());
        assert!(!in_memory.summary().statistics_table);

        let with_scores = CandidateLedger::new(vec![
            Candidate::new("1", Category::Ur, 300.0, 30.0).with_statistics(90.0),
            Candidate::new("2", Category::Sc, 250.0, 30.0),
        ]);
        let summary = with_scores.summary();
        assert!(summary.statistics_table);
        assert_eq!(summary.statistics_matched, 1);
        assert_eq!(summary.statistics_unmatched, 1);
    }

    #[test]
    fn title_row_before_header_is_skipped() {
        let csv = "Marks List 2025,,,\nRoll Number,Category,Main Paper Marks,Computer Marks\n2001,EWS,300,40\n";
        let ledger = LedgerImporter::default()
            .from_reader(Cursor::new(csv))
            .expect("ledger loads");
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.candidates()[0].category, Some(Category::Ews));
    }

    #[test]
    fn key_falls_back_to_first_column_and_stat_to_last() {
        let main = "Reg No,Category,Main Paper Marks,Computer Marks\nA-1,UR,300,30\n";
        let stats = "Reg No,Name,Score\nA-1,Asha,55\n";
        let ledger = LedgerImporter::default()
            .from_readers(Cursor::new(main), Cursor::new(stats))
            .expect("ledger loads");
        assert_eq!(ledger.candidates()[0].roll_number, "A-1");
        assert_eq!(ledger.candidates()[0].statistics_score, Some(55.0));
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let csv = "Roll Number,Category,Computer Marks\n1,UR,30\n";
        match LedgerImporter::default().from_reader(Cursor::new(csv)) {
            Err(LedgerImportError::MissingColumn { column, .. }) => {
                assert_eq!(column, "Main Paper Marks")
            }
            other => panic!("expected missing column, got {other:?}"),
        }
    }

    #[test]
    fn missing_main_file_is_reported() {
        let error = LedgerImporter::default()
            .from_paths("./does-not-exist.csv", None)
            .expect_err("expected missing source");
        match error {
            LedgerImportError::MissingSource { path } => {
                assert!(path.ends_with("does-not-exist.csv"))
            }
            other => panic!("expected missing source, got {other:?}"),
        }
    }
}
