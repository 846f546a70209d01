// phrase-bench - Benchmark corpus helper
use clap::Parser;
use phrase_bench::cli::args::{Args, ParseFailure, INVALID_COMMAND_MESSAGE};
use phrase_bench::cli::commands::execute_command;
use phrase_bench::cli::output::{ConsoleWriter, OutputWriter};
use std::ffi::OsString;

#[tokio::main]
async fn main() {
    let argv: Vec<OsString> = std::env::args_os().collect();
    let args = match Args::try_parse_from(&argv) {
        Ok(args) => args,
        Err(e) => {
            let failure = ParseFailure::classify(e.kind(), &argv);
            match failure {
                ParseFailure::InvalidCommand => eprintln!("{}", INVALID_COMMAND_MESSAGE),
                ParseFailure::Informational | ParseFailure::Usage => {
                    let _ = e.print();
                }
            }
            std::process::exit(failure.exit_code());
        }
    };

    let writer = ConsoleWriter::new(args.output.clone());
    if let Err(e) = execute_command(args).await {
        let _ = writer.write_error(&e.to_string());
        std::process::exit(e.exit_code());
    }
}
