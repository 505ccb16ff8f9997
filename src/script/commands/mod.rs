pub mod fs;

use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Passed,
    Failed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Passed => write!(f, "Passed"),
            Status::Failed => write!(f, "Failed"),
        }
    }
}

/// What one executed command reports back: a human-readable message and a
/// pass/fail status. Failures never cross this boundary as errors.
pub type Outcome = (String, Status);

/// The closed set of script actions. Each variant carries only the
/// parameters its operation needs; the Categorize threshold comes from the
/// configuration, not the script line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    MoveLast { src: PathBuf, dest: PathBuf },
    Categorize { dir: PathBuf, threshold: u64 },
    Count { dir: PathBuf },
    Delete { file: String, dir: PathBuf },
    Rename { old: String, new: String, dir: PathBuf },
    List { dir: PathBuf },
    Sort { dir: PathBuf, criterion: String },
}

impl Command {
    /// Factory dispatch from a script verb and its positional arguments.
    ///
    /// Unknown verbs produce `None` with a diagnostic; the caller drops the
    /// line. A known verb with too few arguments produces `Some(Err(_))`,
    /// which becomes a failed outcome at execution time rather than aborting
    /// the run.
    pub fn create(verb: &str, args: &[&str], threshold: u64) -> Option<Result<Command, String>> {
        let need = match verb {
            "Mv_last" => 2,
            "Categorize" => 1,
            "Count" => 1,
            "Delete" => 2,
            "Rename" => 3,
            "List" => 1,
            "Sort" => 2,
            _ => {
                log::debug!("{verb} is undefined");
                return None;
            }
        };

        if args.len() < need {
            return Some(Err(format!(
                "{verb} expects {need} arguments, got {}",
                args.len()
            )));
        }

        let cmd = match verb {
            "Mv_last" => Command::MoveLast {
                src: args[0].into(),
                dest: args[1].into(),
            },
            "Categorize" => Command::Categorize {
                dir: args[0].into(),
                threshold,
            },
            "Count" => Command::Count {
                dir: args[0].into(),
            },
            "Delete" => Command::Delete {
                file: args[0].to_string(),
                dir: args[1].into(),
            },
            "Rename" => Command::Rename {
                old: args[0].to_string(),
                new: args[1].to_string(),
                dir: args[2].into(),
            },
            "List" => Command::List {
                dir: args[0].into(),
            },
            "Sort" => Command::Sort {
                dir: args[0].into(),
                criterion: args[1].to_string(),
            },
            _ => unreachable!(),
        };
        Some(Ok(cmd))
    }

    /// Runs the operation once. Every failure inside the body is folded into
    /// a `Failed` outcome with the error in the message.
    pub fn execute(&self) -> Outcome {
        match self {
            Command::MoveLast { src, dest } => fs::move_last(src, dest),
            Command::Categorize { dir, threshold } => fs::categorize(dir, *threshold),
            Command::Count { dir } => fs::count(dir),
            Command::Delete { file, dir } => fs::delete(file, dir),
            Command::Rename { old, new, dir } => fs::rename(old, new, dir),
            Command::List { dir } => fs::list(dir),
            Command::Sort { dir, criterion } => fs::sort(dir, criterion),
        }
    }
}
