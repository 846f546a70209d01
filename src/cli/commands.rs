use crate::cli::args::{Args, Command, ConfigCommand};
use crate::cli::output::{ConsoleWriter, OutputWriter};
use crate::core::dispatcher::Dispatcher;
use crate::domain::config::BenchConfig;
use crate::domain::dataset::DatasetKey;
use crate::domain::error::{BenchError, BenchResult};
use crate::infrastructure::config::ConfigManager;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::process::ProcessToolchain;
use std::io;

/// Execute CLI command
pub async fn execute_command(args: Args) -> Result<(), BenchError> {
    let writer = ConsoleWriter::new(args.output.clone());

    let config_manager = ConfigManager::new()?;
    let config = resolve_config(&args, &config_manager)?;

    if !args.quiet {
        // A subscriber may already be installed when embedded; keep going without ours
        if let Err(e) = init_logging(&config.log_level, args.verbose) {
            eprintln!("Warning: logging disabled: {}", e);
        }
    }

    let tools = ProcessToolchain::new(config.tools.clone());
    let dispatcher = Dispatcher::new(config, tools);

    match args.command {
        Command::Download(dataset) => {
            let key = DatasetKey::from(dataset);
            let report = dispatcher.download(&key).await?;
            writer.write_download(&report)?;
            Ok(())
        }
        Command::Run(dataset) => {
            let key = DatasetKey::from(dataset);
            dispatcher.run(&key).await
        }
        Command::Clean => {
            let outcome = dispatcher.clean(io::stdin().lock(), io::stderr()).await?;
            writer.write_clean(outcome)?;
            Ok(())
        }
        Command::Status => {
            let datasets = dispatcher.status().await?;
            writer.write_status(&datasets)?;
            Ok(())
        }
        Command::Config(config_args) => match config_args.command {
            ConfigCommand::Show => {
                writer.write_config(dispatcher.config())?;
                Ok(())
            }
            ConfigCommand::Init { dir, global } => {
                let path = if global {
                    config_manager.init_global_config()?
                } else {
                    let dir = match dir {
                        Some(dir) => dir,
                        None => std::env::current_dir()?,
                    };
                    config_manager.init_project_config(&dir)?
                };
                writer.write_message(&format!("Configuration written to {}", path.display()))?;
                Ok(())
            }
        },
    }
}

/// Effective configuration: files, then environment, then command line flags
pub fn resolve_config(args: &Args, config_manager: &ConfigManager) -> BenchResult<BenchConfig> {
    let mut config = match &args.config {
        Some(path) => config_manager.load_config_from_path(path)?,
        None => config_manager.load_config()?,
    };

    ConfigManager::apply_env_overrides(&mut config);

    if let Some(scratch_root) = &args.scratch_root {
        config.scratch_root = scratch_root.clone();
    }
    if let Some(remote_root) = &args.remote_root {
        config.remote_root = remote_root.clone();
    }

    Ok(config)
}
