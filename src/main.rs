use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use prio_ledger::config::{load_config, Config};
use prio_ledger::script::{load_script, run_steps, RecordEngine, Status};
use prio_ledger::{output, scoring};

const EXIT_SUCCESS: i32 = 0;
const EXIT_CONFIG: i32 = 4;
const EXIT_SCRIPT: i32 = 5;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate the engine configuration and exit
    Check,
    /// Replay a YAML step script against a fresh engine
    Replay {
        /// Path to the script file
        script: PathBuf,

        /// Emit one JSON object per step instead of the table
        #[arg(long)]
        json: bool,

        /// Print the remaining undo history after the run
        #[arg(long)]
        history: bool,

        /// Print the final queue as tab-separated values
        #[arg(long)]
        tsv: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "prio-ledger")]
#[command(about = "Priority bucket queue with validated, undoable updates", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/prio-ledger/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn validate_or_exit(config: &scoring::EngineConfig) {
    if let Err(errors) = scoring::validate_config(config) {
        eprintln!("Engine config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli.config.map(PathBuf::from);
    let config: Config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    match cli.command {
        Commands::Check => {
            validate_or_exit(&config.engine);
            println!("Config OK");
            tracing::info!(
                direction = ?config.engine.direction,
                threshold = config.engine.threshold.as_deref().unwrap_or("(none)"),
                ledger_depth = ?config.engine.ledger_depth,
                "engine config"
            );
        }
        Commands::Replay {
            script,
            json,
            history,
            tsv,
        } => {
            let script = match load_script(&script) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Script error: {:#}", e);
                    std::process::exit(EXIT_SCRIPT);
                }
            };

            // Script sections override the config file
            let engine_config = script.engine.clone().unwrap_or(config.engine);
            let rule = script.scoring.clone().unwrap_or(config.scoring);
            validate_or_exit(&engine_config);

            let mut engine = match RecordEngine::from_config(&engine_config) {
                Ok(e) => e,
                Err(e) => {
                    eprintln!("Config error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };

            let reports = run_steps(&mut engine, &rule, &script.steps);
            let use_colors = output::should_use_colors();

            if json {
                for report in &reports {
                    match serde_json::to_string(report) {
                        Ok(line) => println!("{}", line),
                        Err(e) => {
                            eprintln!("Failed to serialize report: {}", e);
                            std::process::exit(EXIT_SCRIPT);
                        }
                    }
                }
            } else {
                println!("{}", output::format_reports(&reports, use_colors));
                println!();
                if tsv {
                    println!("{}", output::format_tsv(engine.store()));
                } else {
                    println!("{}", output::format_queue_table(engine.store(), use_colors));
                }
            }

            if history {
                println!();
                println!("{}", output::format_history(engine.history(), use_colors));
            }

            if cli.verbose {
                let flagged = reports.iter().filter(|r| r.status == Status::Flagged).count();
                let failed = reports.iter().filter(|r| r.status == Status::Error).count();
                eprintln!();
                eprintln!(
                    "Total: {} steps, {} flagged, {} errors, {} entries left",
                    reports.len(),
                    flagged,
                    failed,
                    engine.total_count()
                );
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
