use crate::config::{Config, OutputMode};
use crate::script::executor::RunResult;
use crate::trace::TraceSink;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Sequence number parsed out of `{prefix}{N}.{ext}`.
///
/// Anything that is not purely numeric counts as infinite: it is never
/// picked as the latest file, and it sorts last for eviction, so a stray
/// `Passedx.csv` outlives every numbered log.
fn sequence_number(name: &str, prefix: &str) -> u64 {
    let Some(rest) = name.strip_prefix(prefix) else {
        return u64::MAX;
    };
    // Drop the 4-character extension (".csv" / ".log").
    let stem = match rest.char_indices().rev().nth(3) {
        Some((i, _)) => &rest[..i],
        None => return u64::MAX,
    };
    if stem.is_empty() || !stem.chars().all(|c| c.is_ascii_digit()) {
        return u64::MAX;
    }
    stem.parse().unwrap_or(u64::MAX)
}

fn prefix_files(dir: &Path, prefix: &str) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name();
        if let Some(name) = name.to_str() {
            if name.starts_with(prefix) {
                names.push(name.to_string());
            }
        }
    }
    Ok(names)
}

/// The directory listing is the only source of truth for the counter, so
/// this re-reads it on every call instead of caching.
pub fn next_log_file_name(dir: &Path, prefix: &str, output: OutputMode) -> Result<String> {
    let names = prefix_files(dir, prefix)?;
    let next = names
        .iter()
        .map(|n| sequence_number(n, prefix))
        .filter(|&n| n != u64::MAX)
        .max()
        .map_or(1, |n| n + 1);
    Ok(format!("{prefix}{next}.{}", output.extension()))
}

/// Writes the run's log file and rotates old ones out. Returns the path of
/// the file written.
pub fn persist(
    result: &RunResult,
    output_dir: &Path,
    config: &Config,
    trace: &mut TraceSink,
) -> Result<PathBuf> {
    let prefix = if result.all_passed { "Passed" } else { "Failed" };

    let log_dir = if config.same_dir {
        output_dir.to_path_buf()
    } else if result.all_passed {
        output_dir.join("PassedDirectory")
    } else {
        output_dir.join("FailedDirectory")
    };
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let name = next_log_file_name(&log_dir, prefix, config.output)?;
    let log_path = log_dir.join(&name);

    match config.output {
        OutputMode::Csv => {
            let mut body = String::new();
            for (message, status) in &result.outcomes {
                body.push_str(message);
                body.push(',');
                body.push_str(&status.to_string());
                body.push('\n');
            }
            fs::write(&log_path, body)
                .with_context(|| format!("Failed to write log file {}", log_path.display()))?;
        }
        OutputMode::Log => {
            trace.flush()?;
            fs::copy(trace.path(), &log_path)
                .with_context(|| format!("Failed to copy trace to {}", log_path.display()))?;
        }
    }

    rotate(&log_dir, prefix, config.max_log_files)?;
    Ok(log_path)
}

/// Evicts the lowest-numbered files until at most `keep` remain.
fn rotate(dir: &Path, prefix: &str, keep: usize) -> Result<()> {
    let mut names = prefix_files(dir, prefix)?;
    if names.len() <= keep {
        return Ok(());
    }
    names.sort_by_key(|n| sequence_number(n, prefix));
    let excess = names.len() - keep;
    for name in &names[..excess] {
        log::debug!("Evicting old log file {name}");
        fs::remove_file(dir.join(name))?;
    }
    Ok(())
}
