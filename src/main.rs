mod cli;
mod config;
mod logger;
mod script;
mod trace;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use colored::*;
use script::commands::Status;
use std::fs;
use std::path::Path;
use trace::TraceSink;

const CONFIG_FILE: &str = "config.json";
const TRACE_FILE: &str = "CommandDebugger.log";

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = config::load_config(Path::new(CONFIG_FILE))?;

    fs::create_dir_all(&cli.output_directory).with_context(|| {
        format!(
            "Failed to create output directory {}",
            cli.output_directory.display()
        )
    })?;

    let mut trace = TraceSink::create(TRACE_FILE)?;
    trace.info("New Script Executor Created");
    trace.info(&format!("Configuration file opened at: {CONFIG_FILE}"));
    trace.separator();

    let result = script::run_script(&cli.input, &config, &mut trace)?;
    let log_path = logger::persist(&result, &cli.output_directory, &config, &mut trace)?;

    let total = result.outcomes.len();
    if result.all_passed {
        println!(
            "{} All {} commands passed. Log: {}",
            "✅".green(),
            total,
            log_path.display()
        );
    } else {
        let failed = result
            .outcomes
            .iter()
            .filter(|(_, s)| *s == Status::Failed)
            .count();
        println!(
            "{} {} of {} commands failed. Log: {}",
            "❌".red(),
            failed,
            total,
            log_path.display()
        );
    }

    Ok(())
}
