use merit_cutoff::config::DataConfig;
use merit_cutoff::error::AppError;
use merit_cutoff::workflows::ledger::LedgerImporter;
use merit_cutoff::workflows::merit::{
    ComputerRules, MeritPredictorService, PredictionConfig, VacancyCatalog,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads the marks tables and catalog, then runs the allocation pass once.
pub(crate) fn load_service(data: &DataConfig) -> Result<MeritPredictorService, AppError> {
    let rules = ComputerRules::standard();
    let ledger = LedgerImporter::new(rules.clone())
        .from_paths(&data.ledger_csv, data.statistics_csv.as_deref())?;

    let catalog = match &data.catalog_csv {
        Some(path) => VacancyCatalog::from_path(path)?,
        None => VacancyCatalog::standard(),
    };
    info!(
        ledger = %data.ledger_csv.display(),
        catalog = data
            .catalog_csv
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "built-in".to_string()),
        "merit data loaded"
    );

    Ok(MeritPredictorService::new(
        Arc::new(ledger),
        Arc::new(catalog),
        PredictionConfig {
            policy: data.prediction_policy,
            computer_rules: rules,
        },
    ))
}
