use crate::domain::dataset::DatasetKey;
use crate::domain::error::INVALID_COMMAND_EXIT_CODE;
use clap::error::ErrorKind;
use clap::{Arg, Args as ClapArgs, CommandFactory, Parser, Subcommand, ValueEnum};
use std::ffi::OsString;
use std::path::PathBuf;

/// Command line arguments for phrase-bench
#[derive(Parser, Debug)]
#[command(
    name = "phrase-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Benchmark corpus helper for fuzzy phrase matching",
    long_about = "Downloads compressed benchmark corpora from an object store, runs the benchmark group for a dataset against them and clears the local scratch directory.",
    disable_help_subcommand = true
)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Local directory for downloaded and extracted corpora
    #[arg(long, global = true)]
    pub scratch_root: Option<PathBuf>,

    /// Base location dataset objects are fetched from
    #[arg(long, global = true)]
    pub remote_root: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch and extract the full and sample corpora of a dataset
    Download(DatasetArgs),
    /// Run the benchmark group for a dataset
    Run(DatasetArgs),
    /// Delete the scratch directory after confirmation
    Clean,
    /// List datasets present in the scratch directory
    Status,
    /// Configuration management commands
    Config(ConfigArgs),
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
    /// Table output
    Table,
}

/// Positional dataset selection shared by `download` and `run`
#[derive(ClapArgs, Debug, Clone)]
pub struct DatasetArgs {
    /// Benchmark category, e.g. "phrase"
    pub kind: String,
    /// Country code
    pub country: String,
    /// Language code
    pub language: String,
    /// Script code
    pub script: String,
}

/// Configuration management arguments
#[derive(ClapArgs, Debug)]
pub struct ConfigArgs {
    /// Configuration subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Create a default configuration file
    Init {
        /// Directory to create `.phrase-bench/config.toml` in (defaults to the current directory)
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Write the global configuration instead
        #[arg(short, long)]
        global: bool,
    },
}

/// Diagnostic printed for an unknown or missing verb
pub const INVALID_COMMAND_MESSAGE: &str = "not ok - invalid command";

/// How a failed argument parse should be reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    /// `--help` or `--version` output, not an error
    Informational,
    /// Unknown or missing verb
    InvalidCommand,
    /// Recognised verb with bad arguments
    Usage,
}

impl ParseFailure {
    /// Classify a parse error of `argv` (program name included).
    ///
    /// An unknown flag only counts as a usage error once a verb has been given.
    pub fn classify(kind: ErrorKind, argv: &[OsString]) -> Self {
        match kind {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ParseFailure::Informational,
            ErrorKind::InvalidSubcommand
            | ErrorKind::MissingSubcommand
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => ParseFailure::InvalidCommand,
            ErrorKind::UnknownArgument if leading_verb(argv).is_none() => ParseFailure::InvalidCommand,
            _ => ParseFailure::Usage,
        }
    }

    pub fn exit_code(self) -> i32 {
        match self {
            ParseFailure::Informational => 0,
            ParseFailure::InvalidCommand | ParseFailure::Usage => INVALID_COMMAND_EXIT_CODE,
        }
    }
}

/// The verb `argv` starts with, after any recognised global options
fn leading_verb(argv: &[OsString]) -> Option<String> {
    let command = Args::command();
    let mut tokens = argv.iter().skip(1).map(|token| token.to_string_lossy());

    while let Some(token) = tokens.next() {
        if !token.starts_with('-') {
            let verb = token.into_owned();
            return command.get_subcommands().any(|sub| sub.get_name() == verb).then_some(verb);
        }
        let (flag, inline_value) = match token.split_once('=') {
            Some((flag, _)) => (flag, true),
            None => (token.as_ref(), false),
        };
        let arg = command.get_arguments().find(|arg| names_flag(arg, flag))?;
        if arg.get_action().takes_values() && !inline_value {
            tokens.next();
        }
    }
    None
}

fn names_flag(arg: &Arg, token: &str) -> bool {
    if let Some(long) = token.strip_prefix("--") {
        return arg.get_long() == Some(long);
    }
    let mut chars = token.chars().skip(1);
    match (chars.next(), chars.next()) {
        (Some(short), None) => arg.get_short() == Some(short),
        _ => false,
    }
}

impl From<DatasetArgs> for DatasetKey {
    fn from(args: DatasetArgs) -> Self {
        DatasetKey::new(args.kind, args.country, args.language, args.script)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Table => write!(f, "table"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<OsString> {
        std::iter::once("phrase-bench").chain(args.iter().copied()).map(OsString::from).collect()
    }

    fn classify(args: &[&str]) -> ParseFailure {
        let argv = argv(args);
        let err = Args::try_parse_from(&argv).unwrap_err();
        ParseFailure::classify(err.kind(), &argv)
    }

    #[test]
    fn test_parse_download() {
        let args = Args::try_parse_from(["phrase-bench", "download", "phrase", "us", "en", "latn"]).unwrap();
        match args.command {
            Command::Download(dataset) => {
                let key: DatasetKey = dataset.into();
                assert_eq!(key, DatasetKey::new("phrase", "us", "en", "latn"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_verb() {
        let args = Args::try_parse_from([
            "phrase-bench", "run", "phrase", "us", "en", "latn", "--scratch-root", "/data", "-o", "json",
        ])
        .unwrap();
        assert_eq!(args.scratch_root, Some(PathBuf::from("/data")));
        assert_eq!(args.output.to_string(), "json");
    }

    #[test]
    fn test_unknown_verb_is_invalid_subcommand() {
        let err = Args::try_parse_from(["phrase-bench", "foo"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
        assert_eq!(classify(&["foo"]), ParseFailure::InvalidCommand);
    }

    #[test]
    fn test_no_verb_is_invalid_command() {
        assert_eq!(classify(&[]), ParseFailure::InvalidCommand);
        assert_eq!(classify(&[]).exit_code(), 3);
    }

    #[test]
    fn test_help_word_is_not_a_verb() {
        assert_eq!(classify(&["help"]), ParseFailure::InvalidCommand);
    }

    #[test]
    fn test_unknown_flag_before_verb_is_invalid_command() {
        assert_eq!(classify(&["--bogus"]), ParseFailure::InvalidCommand);
        assert_eq!(classify(&["-q", "--bogus", "clean"]), ParseFailure::InvalidCommand);
    }

    #[test]
    fn test_unknown_flag_after_verb_is_usage() {
        assert_eq!(classify(&["clean", "--bogus"]), ParseFailure::Usage);
        assert_eq!(classify(&["--scratch-root", "/data", "status", "--bogus"]), ParseFailure::Usage);
        assert_eq!(classify(&["--output=json", "status", "--bogus"]), ParseFailure::Usage);
    }

    #[test]
    fn test_help_is_informational() {
        assert_eq!(classify(&["--help"]), ParseFailure::Informational);
        assert_eq!(ParseFailure::Informational.exit_code(), 0);
    }

    #[test]
    fn test_missing_positionals() {
        let err = Args::try_parse_from(["phrase-bench", "download", "phrase", "us"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(classify(&["download", "phrase", "us"]), ParseFailure::Usage);
    }
}
