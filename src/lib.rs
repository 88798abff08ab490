pub mod chart;
pub mod commands;
pub mod config;
pub mod models;
pub mod store;
pub mod timeline;
pub mod trends;

use std::path::Path;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::commands::CommandError;
use crate::config::TrendConfig;
use crate::models::{PatientRecord, RecordError};
use crate::store::FileStore;

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// filter. Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Error, Debug)]
pub enum RunError {
    #[error("usage: telechart <record.json> [24h|7d]\n       telechart --patient <id> [24h|7d]")]
    Usage,

    #[error("Cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Command(#[from] CommandError),
}

/// CLI entry: render the chart payload as pretty JSON, either for a record
/// file or, with `--patient <id>`, for a patient in the local store.
pub fn run<I>(args: I) -> Result<String, RunError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let first = args.next().ok_or(RunError::Usage)?;
    if first == "--patient" {
        let patient_id = args.next().ok_or(RunError::Usage)?;
        let selector = args.next().unwrap_or_else(|| "7d".to_string());
        return patient_chart(&config::store_path(), &patient_id, &selector);
    }
    let selector = args.next().unwrap_or_else(|| "7d".to_string());
    record_file_chart(&first, &selector)
}

fn record_file_chart(path: &str, selector: &str) -> Result<String, RunError> {
    tracing::info!("{} v{} reading {}", config::APP_NAME, config::APP_VERSION, path);

    let bytes = std::fs::read(Path::new(path)).map_err(|source| RunError::Read {
        path: path.to_string(),
        source,
    })?;
    let record = PatientRecord::from_value(serde_json::from_slice(&bytes)?)?;
    let chart = commands::chart::build_chart_now(&record, selector, &TrendConfig::default());
    Ok(serde_json::to_string_pretty(&chart)?)
}

fn patient_chart(store_path: &Path, patient_id: &str, selector: &str) -> Result<String, RunError> {
    tracing::info!(
        "{} v{} opening store {}",
        config::APP_NAME,
        config::APP_VERSION,
        store_path.display()
    );

    let store = FileStore::open(store_path).map_err(CommandError::from)?;
    let chart = commands::chart::get_chart_data(&store, patient_id, selector)?;
    Ok(serde_json::to_string_pretty(&chart)?)
}
