use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// phrase-bench configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Local directory holding downloaded and extracted corpora
    #[serde(default = "default_scratch_root")]
    pub scratch_root: PathBuf,
    /// Base location in the object store corpora are fetched from
    #[serde(default = "default_remote_root")]
    pub remote_root: String,
    /// Environment variable carrying the corpus path prefix to the benchmark runner
    #[serde(default = "default_env_var")]
    pub env_var: String,
    /// Default log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// External programs
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// External programs the dispatcher shells out to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Object-store copy tool, invoked as `<program> <args..> <remote_key> <dest>`
    #[serde(default = "default_fetch_tool")]
    pub fetch: ToolCommand,
    /// Decompression tool, invoked as `<program> <args..> <archive>`
    #[serde(default = "default_decompress_tool")]
    pub decompress: ToolCommand,
    /// Benchmark runner, invoked as `<program> <args..> <selector>`
    #[serde(default = "default_bench_tool")]
    pub bench: ToolCommand,
}

/// A program plus the leading arguments passed before the operands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

// Default value functions
fn default_scratch_root() -> PathBuf {
    PathBuf::from("/tmp/fuzzy-phrase-bench")
}

fn default_remote_root() -> String {
    "s3://fuzzy-phrase-bench".to_string()
}

fn default_env_var() -> String {
    "PHRASE_BENCH".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_fetch_tool() -> ToolCommand {
    ToolCommand::new("aws", &["s3", "cp"])
}

fn default_decompress_tool() -> ToolCommand {
    ToolCommand::new("gunzip", &[])
}

fn default_bench_tool() -> ToolCommand {
    ToolCommand::new("cargo", &["bench"])
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            scratch_root: default_scratch_root(),
            remote_root: default_remote_root(),
            env_var: default_env_var(),
            log_level: default_log_level(),
            tools: ToolsConfig::default(),
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            fetch: default_fetch_tool(),
            decompress: default_decompress_tool(),
            bench: default_bench_tool(),
        }
    }
}

impl std::fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
