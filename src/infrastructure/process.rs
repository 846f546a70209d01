// Process module - Toolchain backed by external programs
use crate::core::tools::{decompressed_path, ToolKind, Toolchain};
use crate::domain::config::{ToolCommand, ToolsConfig};
use crate::domain::error::{BenchError, BenchResult};
use async_trait::async_trait;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, error};

/// Runs the configured fetch, decompress and bench programs as child processes
pub struct ProcessToolchain {
    tools: ToolsConfig,
}

impl ProcessToolchain {
    pub fn new(tools: ToolsConfig) -> Self {
        Self { tools }
    }

    fn command_for(&self, kind: ToolKind) -> &ToolCommand {
        match kind {
            ToolKind::Fetch => &self.tools.fetch,
            ToolKind::Decompress => &self.tools.decompress,
            ToolKind::Bench => &self.tools.bench,
        }
    }

    /// Spawn the tool with its configured args plus `operands` and wait for it.
    ///
    /// Stdio is inherited so tool progress reaches the operator directly.
    async fn invoke<I, S>(&self, kind: ToolKind, operands: I, env: &[(String, String)]) -> BenchResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let tool = self.command_for(kind);
        let mut command = Command::new(&tool.program);
        command.args(&tool.args).args(operands);
        for (name, value) in env {
            command.env(name, value);
        }

        debug!("Spawning {} tool: {:?}", kind, command.as_std());
        let status = command.status().await.map_err(|source| BenchError::ToolUnavailable {
            tool: tool.program.clone(),
            source,
        })?;

        if status.success() {
            Ok(())
        } else {
            error!("{} tool `{}` exited with {}", kind, tool, status);
            Err(BenchError::ToolFailed {
                tool: tool.program.clone(),
                code: status.code(),
            })
        }
    }
}

#[async_trait]
impl Toolchain for ProcessToolchain {
    async fn fetch(&self, remote_key: &str, dest: &Path) -> BenchResult<()> {
        self.invoke(ToolKind::Fetch, [OsStr::new(remote_key), dest.as_os_str()], &[])
            .await
    }

    async fn decompress(&self, archive: &Path) -> BenchResult<PathBuf> {
        self.invoke(ToolKind::Decompress, [archive.as_os_str()], &[]).await?;
        Ok(decompressed_path(archive))
    }

    async fn run_benchmarks(&self, selector: &str, env: &[(String, String)]) -> BenchResult<()> {
        self.invoke(ToolKind::Bench, [selector], env).await
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn shell(script: &str) -> ToolCommand {
        ToolCommand::new("sh", &["-c", script, "tool"])
    }

    fn toolchain(fetch: ToolCommand, decompress: ToolCommand, bench: ToolCommand) -> ProcessToolchain {
        ProcessToolchain::new(ToolsConfig { fetch, decompress, bench })
    }

    #[tokio::test]
    async fn test_fetch_passes_key_and_destination() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("us_en_latn.txt.gz");
        let tools = toolchain(
            shell(r#"printf '%s' "$1" > "$2""#),
            ToolCommand::new("true", &[]),
            ToolCommand::new("true", &[]),
        );

        tools.fetch("s3://bucket/phrase/us_en_latn.txt.gz", &dest).await.unwrap();

        let written = std::fs::read_to_string(&dest).unwrap();
        assert_eq!(written, "s3://bucket/phrase/us_en_latn.txt.gz");
    }

    #[tokio::test]
    async fn test_bench_env_reaches_child_only() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("env.txt");
        let script = format!(r#"printf '%s %s' "$1" "$PHRASE_BENCH_TEST_PREFIX" > '{}'"#, out.display());
        let tools = toolchain(ToolCommand::new("true", &[]), ToolCommand::new("true", &[]), shell(&script));

        let env = vec![("PHRASE_BENCH_TEST_PREFIX".to_string(), "/s/phrase/us_en_latn".to_string())];
        tools.run_benchmarks("phrase", &env).await.unwrap();

        assert_eq!(std::fs::read_to_string(&out).unwrap(), "phrase /s/phrase/us_en_latn");
        assert!(std::env::var("PHRASE_BENCH_TEST_PREFIX").is_err());
    }

    #[tokio::test]
    async fn test_failing_tool_reports_exit_code() {
        let tools = toolchain(shell("exit 7"), ToolCommand::new("true", &[]), ToolCommand::new("true", &[]));

        let err = tools.fetch("s3://x/y", Path::new("/nonexistent/y")).await.unwrap_err();
        assert!(matches!(err, BenchError::ToolFailed { code: Some(7), .. }));
        assert_eq!(err.exit_code(), 7);
    }

    #[tokio::test]
    async fn test_missing_program_is_unavailable() {
        let tools = toolchain(
            ToolCommand::new("true", &[]),
            ToolCommand::new("phrase-bench-no-such-program", &[]),
            ToolCommand::new("true", &[]),
        );

        let err = tools.decompress(Path::new("a.txt.gz")).await.unwrap_err();
        assert!(matches!(err, BenchError::ToolUnavailable { .. }));
    }
}
