use crate::infra::load_service;
use clap::Args;
use merit_cutoff::config::{AppConfig, DataConfig};
use merit_cutoff::error::AppError;
use merit_cutoff::telemetry;
use merit_cutoff::workflows::merit::{
    BonusMarks, Category, MeritPredictorService, PredictionPolicy, ReportTable, UserProfile,
};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Overrides for the configured data sources.
#[derive(Args, Debug, Default)]
pub(crate) struct DataArgs {
    /// Main marks table (defaults to MERIT_LEDGER_CSV)
    #[arg(long)]
    pub(crate) ledger: Option<PathBuf>,
    /// Statistics marks table (defaults to MERIT_STATISTICS_CSV)
    #[arg(long)]
    pub(crate) statistics: Option<PathBuf>,
    /// Vacancy catalog CSV (defaults to the built-in post list)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Prediction policy: all or first
    #[arg(long, value_parser = parse_policy)]
    pub(crate) policy: Option<PredictionPolicy>,
}

impl DataArgs {
    pub(crate) fn apply(self, data: &mut DataConfig) {
        if let Some(ledger) = self.ledger {
            data.ledger_csv = ledger;
        }
        if let Some(statistics) = self.statistics {
            data.statistics_csv = Some(statistics);
        }
        if let Some(catalog) = self.catalog {
            data.catalog_csv = Some(catalog);
        }
        if let Some(policy) = self.policy {
            data.prediction_policy = policy;
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ProfileArgs {
    /// Main paper marks (0-390)
    #[arg(long)]
    pub(crate) main: f64,
    /// Computer proficiency marks (0-60)
    #[arg(long)]
    pub(crate) computer: f64,
    /// Reservation category: UR, OBC, EWS, SC or ST
    #[arg(long, value_parser = parse_category)]
    pub(crate) category: Category,
    /// Statistics paper marks (0-200); omit or pass 0 when not attempted
    #[arg(long)]
    pub(crate) statistics_score: Option<f64>,
    #[arg(long, default_value_t = 0.0)]
    pub(crate) bonus_main: f64,
    #[arg(long, default_value_t = 0.0)]
    pub(crate) bonus_statistics: f64,
    #[arg(long, default_value_t = 0.0)]
    pub(crate) bonus_computer: f64,
}

impl ProfileArgs {
    pub(crate) fn to_profile(&self) -> UserProfile {
        let mut profile = UserProfile::new(self.main, self.computer, self.category).with_bonus(
            BonusMarks {
                main: self.bonus_main,
                statistics: self.bonus_statistics,
                computer: self.bonus_computer,
            },
        );
        if let Some(statistics) = self.statistics_score {
            profile = profile.with_statistics(statistics);
        }
        profile
    }
}

#[derive(Args, Debug)]
pub(crate) struct CutoffsArgs {
    #[command(flatten)]
    pub(crate) data: DataArgs,
    /// Write the table as CSV to this path instead of printing it
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Main paper marks; adds a verdict column together with --computer and --category
    #[arg(long, requires = "computer", requires = "category")]
    pub(crate) main: Option<f64>,
    #[arg(long, requires = "main")]
    pub(crate) computer: Option<f64>,
    #[arg(long, requires = "main", value_parser = parse_category)]
    pub(crate) category: Option<Category>,
    #[arg(long, requires = "main")]
    pub(crate) statistics_score: Option<f64>,
}

impl CutoffsArgs {
    fn profile(&self) -> Option<UserProfile> {
        let (main, computer, category) = (self.main?, self.computer?, self.category?);
        let profile = UserProfile::new(main, computer, category);
        Some(match self.statistics_score {
            Some(statistics) => profile.with_statistics(statistics),
            None => profile,
        })
    }
}

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    #[command(flatten)]
    pub(crate) data: DataArgs,
    #[command(flatten)]
    pub(crate) profile: ProfileArgs,
    /// Write the predicted posts as CSV to this path
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

pub(crate) fn run_cutoffs(args: CutoffsArgs) -> Result<(), AppError> {
    let profile = args.profile();
    let CutoffsArgs { data, csv, .. } = args;
    let service = load_from_args(data)?;

    let report = service.cutoff_report(profile.as_ref())?;
    let summary = service.ledger().summary();
    println!(
        "Cutoffs for {} candidates across {} posts ({} rows dropped, computed {})",
        service.ledger().len(),
        service.catalog().len(),
        summary.rows_dropped,
        service.computed_at().format("%Y-%m-%d %H:%M UTC")
    );

    emit(&report, csv.as_deref())
}

pub(crate) fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let PredictArgs { data, profile, csv } = args;
    let profile = profile.to_profile();
    let service = load_from_args(data)?;

    let evaluation = service.evaluate(&profile)?;
    let impact = &evaluation.bonus_impact;

    println!("Merit position ({})", impact.basis.label());
    println!(
        "- score {} -> overall rank {}, {} rank {}",
        impact.original_score,
        impact.original.overall,
        profile.category.label(),
        impact.original.category
    );
    if impact.new_score != impact.original_score {
        println!(
            "- with bonus {} -> overall rank {}, {} rank {}",
            impact.new_score,
            impact.new.overall,
            profile.category.label(),
            impact.new.category
        );
    }
    println!("- {}", impact.summary());

    println!("\nPost verdicts");
    print!("{}", service.cutoff_report(Some(&profile))?.render_text());

    let predictions = evaluation.prediction_report();
    if predictions.rows.is_empty() {
        println!("\nPredicted posts: none");
        return Ok(());
    }

    let label = match service.policy() {
        PredictionPolicy::AllMatches => "all matches",
        PredictionPolicy::FirstMatch => "first match",
    };
    println!("\nPredicted posts ({label})");
    emit(&predictions, csv.as_deref())
}

fn load_from_args(data: DataArgs) -> Result<MeritPredictorService, AppError> {
    let mut config = AppConfig::load()?;
    data.apply(&mut config.data);
    telemetry::init(&config.telemetry)?;
    load_service(&config.data)
}

fn emit(report: &ReportTable, csv: Option<&Path>) -> Result<(), AppError> {
    match csv {
        Some(path) => {
            let file = File::create(path)?;
            report.write_csv(file).map_err(std::io::Error::from)?;
            println!("Wrote {} rows to {}", report.rows.len(), path.display());
        }
        None => print!("{}", report.render_text()),
    }
    Ok(())
}

pub(crate) fn parse_category(raw: &str) -> Result<Category, String> {
    Category::parse(raw)
        .ok_or_else(|| format!("unknown category '{raw}' (expected UR, OBC, EWS, SC or ST)"))
}

pub(crate) fn parse_policy(raw: &str) -> Result<PredictionPolicy, String> {
    PredictionPolicy::parse(raw)
        .ok_or_else(|| format!("unknown policy '{raw}' (expected all or first)"))
}
