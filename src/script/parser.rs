use crate::config::Config;
use crate::script::commands::Command;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// A script line that landed inside the executable prefix.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    Run(Command),
    /// Known verb, short argument list. Executes as a single failed command
    /// instead of aborting the run.
    Malformed { reason: String },
}

#[derive(Debug, Default)]
pub struct ParsedScript {
    /// The first `max_commands` non-empty lines, in file order. Lines with
    /// an unrecognized verb are dropped but still consume a slot.
    pub prefix: Vec<ParsedLine>,
    /// Every non-empty line beyond the ceiling, verbatim. Reported during
    /// execution, never run.
    pub unreachable: Vec<String>,
}

pub fn parse_script(path: &Path, config: &Config) -> Result<ParsedScript> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;

    let mut script = ParsedScript::default();
    let mut seen = 0usize;

    for line in content.lines() {
        let line = line.trim_end();
        if line.trim().is_empty() {
            continue;
        }

        if seen >= config.max_commands {
            script.unreachable.push(line.to_string());
            continue;
        }
        seen += 1;

        let mut tokens = line.split_whitespace();
        let Some(verb) = tokens.next() else { continue };
        let args: Vec<&str> = tokens.collect();

        match Command::create(verb, &args, config.threshold_size) {
            Some(Ok(cmd)) => script.prefix.push(ParsedLine::Run(cmd)),
            Some(Err(reason)) => script.prefix.push(ParsedLine::Malformed { reason }),
            None => {}
        }
    }

    Ok(script)
}
