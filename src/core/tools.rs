use crate::domain::error::BenchResult;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Which external collaborator an operation goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Fetch,
    Decompress,
    Bench,
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolKind::Fetch => write!(f, "fetch"),
            ToolKind::Decompress => write!(f, "decompress"),
            ToolKind::Bench => write!(f, "bench"),
        }
    }
}

/// External programs the dispatcher depends on.
///
/// Implementations block the caller until the underlying tool finishes and
/// report a non-zero exit as `BenchError::ToolFailed`.
#[async_trait]
pub trait Toolchain: Send + Sync {
    /// Copy the remote object `remote_key` to the local file `dest`
    async fn fetch(&self, remote_key: &str, dest: &Path) -> BenchResult<()>;

    /// Decompress `archive` in place, removing it, and return the extracted path
    async fn decompress(&self, archive: &Path) -> BenchResult<PathBuf>;

    /// Run the benchmark group named by `selector` with `env` set for the child only
    async fn run_benchmarks(&self, selector: &str, env: &[(String, String)]) -> BenchResult<()>;
}

/// Path a `.gz` archive extracts to
pub fn decompressed_path(archive: &Path) -> PathBuf {
    match archive.extension() {
        Some(ext) if ext == "gz" => archive.with_extension(""),
        _ => archive.to_path_buf(),
    }
}
