pub mod commands;
pub mod executor;
pub mod parser;


use crate::config::Config;
use crate::trace::TraceSink;
use anyhow::Result;
use executor::RunResult;
use std::path::Path;

pub fn run_script(script_path: &Path, config: &Config, trace: &mut TraceSink) -> Result<RunResult> {
    let parsed = parser::parse_script(script_path, config)?;
    Ok(executor::execute_script(&parsed, trace))
}
