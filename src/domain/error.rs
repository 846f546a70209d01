use thiserror::Error;

/// Exit code used for argument errors (unknown verb, missing positionals)
pub const INVALID_COMMAND_EXIT_CODE: i32 = 3;

/// phrase-bench unified error type
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{tool} failed with {}", describe_code(.code))]
    ToolFailed { tool: String, code: Option<i32> },

    #[error("Could not start {tool}: {source}")]
    ToolUnavailable {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Output error: {0}")]
    Output(String),
}

impl BenchError {
    /// Process exit code the top-level entry point should terminate with
    pub fn exit_code(&self) -> i32 {
        match self {
            // A child killed by a signal has no code of its own
            BenchError::ToolFailed { code, .. } => match code {
                Some(code) if *code != 0 => *code,
                _ => 1,
            },
            _ => 1,
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        None => "termination by signal".to_string(),
    }
}

pub type BenchResult<T> = Result<T, BenchError>;
