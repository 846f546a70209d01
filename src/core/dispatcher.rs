use crate::core::tools::Toolchain;
use crate::domain::config::BenchConfig;
use crate::domain::dataset::{CorpusVariant, DatasetKey};
use crate::domain::error::BenchResult;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One corpus extracted by `download`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DownloadedCorpus {
    pub variant: CorpusVariant,
    pub remote_key: String,
    pub path: PathBuf,
}

/// Result of a completed download
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DownloadReport {
    pub dataset: DatasetKey,
    pub corpora: Vec<DownloadedCorpus>,
}

/// What `clean` ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CleanOutcome {
    /// Scratch root did not exist, nothing was asked
    Missing,
    /// Operator answered `n`
    Declined,
    /// Scratch root was removed
    Removed,
}

/// A dataset found under the scratch root
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStatus {
    pub kind: String,
    pub stem: String,
    pub full_bytes: Option<u64>,
    pub sample_bytes: Option<u64>,
}

impl DatasetStatus {
    /// Both corpora are present, so `run` can use this dataset
    pub fn is_complete(&self) -> bool {
        self.full_bytes.is_some() && self.sample_bytes.is_some()
    }
}

/// Routes the `download`, `run`, `clean` and `status` verbs to the toolchain.
///
/// Handlers return their result; mapping to an exit code is left to the caller.
pub struct Dispatcher<T: Toolchain> {
    config: BenchConfig,
    tools: T,
}

impl<T: Toolchain> Dispatcher<T> {
    pub fn new(config: BenchConfig, tools: T) -> Self {
        Self { config, tools }
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    pub fn tools(&self) -> &T {
        &self.tools
    }

    fn scratch_root(&self) -> &Path {
        &self.config.scratch_root
    }

    /// Fetch and extract the full and sample corpora of `key`.
    ///
    /// Stops at the first failure; files already extracted are left in place.
    pub async fn download(&self, key: &DatasetKey) -> BenchResult<DownloadReport> {
        let kind_dir = key.kind_dir(self.scratch_root());
        tokio::fs::create_dir_all(&kind_dir).await?;
        info!("Downloading {} into {}", key, kind_dir.display());

        let mut corpora = Vec::with_capacity(CorpusVariant::ALL.len());
        for variant in CorpusVariant::ALL {
            let remote_key = key.remote_key(&self.config.remote_root, variant);
            let archive = key.archive_path(self.scratch_root(), variant);

            debug!("Fetching {} -> {}", remote_key, archive.display());
            self.tools.fetch(&remote_key, &archive).await?;

            let path = self.tools.decompress(&archive).await?;
            info!("Extracted {} corpus to {}", variant, path.display());

            corpora.push(DownloadedCorpus { variant, remote_key, path });
        }

        Ok(DownloadReport { dataset: key.clone(), corpora })
    }

    /// Run the benchmark group `key.kind` against the corpora of `key`
    pub async fn run(&self, key: &DatasetKey) -> BenchResult<()> {
        let prefix = key.bench_prefix(self.scratch_root());
        for variant in CorpusVariant::ALL {
            let corpus = key.corpus_path(self.scratch_root(), variant);
            if !tokio::fs::try_exists(&corpus).await? {
                warn!("{} corpus {} is missing, run `download` first", variant, corpus.display());
            }
        }

        let env = vec![(self.config.env_var.clone(), prefix.to_string_lossy().into_owned())];
        info!("Running {} benchmarks with {}={}", key.kind, env[0].0, env[0].1);
        self.tools.run_benchmarks(&key.kind, &env).await
    }

    /// Remove the scratch root after asking for confirmation on `input`.
    ///
    /// Anything but `n` confirms, including an empty line or end of input.
    /// The line is read synchronously; `clean` is the only work on the runtime.
    pub async fn clean<R: BufRead, W: Write>(&self, mut input: R, mut prompt: W) -> BenchResult<CleanOutcome> {
        let root = self.scratch_root();
        if !tokio::fs::try_exists(root).await? {
            debug!("{} does not exist, nothing to clean", root.display());
            return Ok(CleanOutcome::Missing);
        }

        write!(prompt, "Remove {} and everything under it? [Y/n] ", root.display())?;
        prompt.flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            warn!("No answer received, treating as confirmation");
        }
        if answer.trim() == "n" {
            info!("Keeping {}", root.display());
            return Ok(CleanOutcome::Declined);
        }

        tokio::fs::remove_dir_all(root).await?;
        info!("Removed {}", root.display());
        Ok(CleanOutcome::Removed)
    }

    /// Datasets currently extracted under the scratch root, sorted by kind then stem
    pub async fn status(&self) -> BenchResult<Vec<DatasetStatus>> {
        let root = self.scratch_root();
        if !tokio::fs::try_exists(root).await? {
            return Ok(Vec::new());
        }

        let mut found: BTreeMap<(String, String), DatasetStatus> = BTreeMap::new();
        let mut kinds = tokio::fs::read_dir(root).await?;
        while let Some(kind_entry) = kinds.next_entry().await? {
            if !kind_entry.file_type().await?.is_dir() {
                continue;
            }
            let kind = kind_entry.file_name().to_string_lossy().into_owned();

            let mut files = tokio::fs::read_dir(kind_entry.path()).await?;
            while let Some(file) = files.next_entry().await? {
                let name = file.file_name().to_string_lossy().into_owned();
                let Some(base) = name.strip_suffix(".txt") else {
                    continue;
                };
                let (stem, variant) = match base.strip_suffix("_sample") {
                    Some(stem) => (stem, CorpusVariant::Sample),
                    None => (base, CorpusVariant::Full),
                };
                let size = file.metadata().await?.len();

                let entry = found
                    .entry((kind.clone(), stem.to_string()))
                    .or_insert_with(|| DatasetStatus {
                        kind: kind.clone(),
                        stem: stem.to_string(),
                        full_bytes: None,
                        sample_bytes: None,
                    });
                match variant {
                    CorpusVariant::Full => entry.full_bytes = Some(size),
                    CorpusVariant::Sample => entry.sample_bytes = Some(size),
                }
            }
        }

        Ok(found.into_values().collect())
    }
}
