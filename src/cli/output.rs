use crate::cli::args::OutputFormat;
use crate::core::dispatcher::{CleanOutcome, DatasetStatus, DownloadReport};
use crate::domain::config::BenchConfig;
use serde_json;
use std::io;
use tabled::{Table, Tabled};

/// Output writer trait for different formats
pub trait OutputWriter {
    fn write_download(&self, report: &DownloadReport) -> Result<(), OutputError>;
    fn write_status(&self, datasets: &[DatasetStatus]) -> Result<(), OutputError>;
    fn write_clean(&self, outcome: CleanOutcome) -> Result<(), OutputError>;
    fn write_config(&self, config: &BenchConfig) -> Result<(), OutputError>;
    fn write_message(&self, message: &str) -> Result<(), OutputError>;
    fn write_error(&self, error: &str) -> Result<(), OutputError>;
}

/// Output formatting errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl From<OutputError> for crate::domain::error::BenchError {
    fn from(err: OutputError) -> Self {
        Self::Output(err.to_string())
    }
}

/// Console output writer
pub struct ConsoleWriter {
    format: OutputFormat,
}

impl ConsoleWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl OutputWriter for ConsoleWriter {
    fn write_download(&self, report: &DownloadReport) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Text => {
                println!("Downloaded {}", report.dataset);
                for corpus in &report.corpora {
                    println!("  {}: {}", corpus.variant, corpus.path.display());
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(report)?);
            }
            OutputFormat::Table => {
                let rows: Vec<CorpusTableRow> = report
                    .corpora
                    .iter()
                    .map(|corpus| CorpusTableRow {
                        variant: corpus.variant.to_string(),
                        source: corpus.remote_key.clone(),
                        path: corpus.path.display().to_string(),
                    })
                    .collect();
                println!("{}", Table::new(rows));
            }
        }
        Ok(())
    }

    fn write_status(&self, datasets: &[DatasetStatus]) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Text => {
                if datasets.is_empty() {
                    println!("No datasets downloaded");
                }
                for dataset in datasets {
                    let state = if dataset.is_complete() { "ready" } else { "incomplete" };
                    println!("{}/{} ({})", dataset.kind, dataset.stem, state);
                    println!("  full: {}", format_size(dataset.full_bytes));
                    println!("  sample: {}", format_size(dataset.sample_bytes));
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(datasets)?);
            }
            OutputFormat::Table => {
                if !datasets.is_empty() {
                    let rows: Vec<DatasetTableRow> = datasets.iter().map(DatasetTableRow::from).collect();
                    println!("{}", Table::new(rows));
                }
            }
        }
        Ok(())
    }

    fn write_clean(&self, outcome: CleanOutcome) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::json!({ "outcome": outcome }));
            }
            OutputFormat::Text | OutputFormat::Table => match outcome {
                CleanOutcome::Missing => println!("Nothing to clean"),
                CleanOutcome::Declined => println!("Scratch directory kept"),
                CleanOutcome::Removed => println!("Scratch directory removed"),
            },
        }
        Ok(())
    }

    fn write_config(&self, config: &BenchConfig) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Text => {
                println!("phrase-bench Configuration:");
                println!("  Scratch root: {}", config.scratch_root.display());
                println!("  Remote root: {}", config.remote_root);
                println!("  Prefix variable: {}", config.env_var);
                println!("  Log level: {}", config.log_level);
                println!("  Tools:");
                println!("    fetch: {}", config.tools.fetch);
                println!("    decompress: {}", config.tools.decompress);
                println!("    bench: {}", config.tools.bench);
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(config)?);
            }
            OutputFormat::Table => {
                let rows = vec![
                    SettingTableRow::new("scratch_root", config.scratch_root.display().to_string()),
                    SettingTableRow::new("remote_root", config.remote_root.clone()),
                    SettingTableRow::new("env_var", config.env_var.clone()),
                    SettingTableRow::new("log_level", config.log_level.clone()),
                    SettingTableRow::new("tools.fetch", config.tools.fetch.to_string()),
                    SettingTableRow::new("tools.decompress", config.tools.decompress.to_string()),
                    SettingTableRow::new("tools.bench", config.tools.bench.to_string()),
                ];
                println!("{}", Table::new(rows));
            }
        }
        Ok(())
    }

    fn write_message(&self, message: &str) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::json!({ "message": message }));
            }
            _ => println!("{}", message),
        }
        Ok(())
    }

    fn write_error(&self, error: &str) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Json => {
                eprintln!("{}", serde_json::json!({ "error": error }));
            }
            _ => eprintln!("Error: {}", error),
        }
        Ok(())
    }
}

fn format_size(bytes: Option<u64>) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];

    let Some(bytes) = bytes else {
        return "missing".to_string();
    };
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

/// Table row for one extracted corpus
#[derive(Tabled)]
struct CorpusTableRow {
    #[tabled(rename = "Variant")]
    variant: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Path")]
    path: String,
}

/// Table row for dataset status
#[derive(Tabled)]
struct DatasetTableRow {
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Dataset")]
    stem: String,
    #[tabled(rename = "Full")]
    full: String,
    #[tabled(rename = "Sample")]
    sample: String,
}

impl From<&DatasetStatus> for DatasetTableRow {
    fn from(dataset: &DatasetStatus) -> Self {
        Self {
            kind: dataset.kind.clone(),
            stem: dataset.stem.clone(),
            full: format_size(dataset.full_bytes),
            sample: format_size(dataset.sample_bytes),
        }
    }
}

/// Table row for a configuration setting
#[derive(Tabled)]
struct SettingTableRow {
    #[tabled(rename = "Setting")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl SettingTableRow {
    fn new(name: &str, value: String) -> Self {
        Self { name: name.to_string(), value }
    }
}
