//! phrase-bench Library
//!
//! Downloads benchmark corpora from an object store, runs the benchmark
//! runner against them and clears the local scratch directory. External
//! programs sit behind the [`Toolchain`] trait so they can be replaced in tests.

pub mod cli;
pub mod core;
pub mod domain;
pub mod infrastructure;

pub use domain::error::{BenchError, BenchResult, INVALID_COMMAND_EXIT_CODE};
pub use domain::config::{BenchConfig, ToolCommand, ToolsConfig};
pub use domain::dataset::{CorpusVariant, DatasetKey};
pub use core::dispatcher::{CleanOutcome, DatasetStatus, Dispatcher, DownloadReport, DownloadedCorpus};
pub use core::tools::Toolchain;
pub use infrastructure::process::ProcessToolchain;
