// Operation bodies for the seven script commands.

use super::{Outcome, Status};
use anyhow::{Result, bail};
use std::ffi::OsStr;
use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

fn fail(verb: &str, err: impl Display) -> Outcome {
    (format!("{verb}: Failed with error {err}"), Status::Failed)
}

fn outcome(verb: &str, res: Result<String>) -> Outcome {
    match res {
        Ok(msg) => (msg, Status::Passed),
        Err(e) => fail(verb, e),
    }
}

fn is_hidden(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

fn created_time(meta: &fs::Metadata) -> SystemTime {
    // Creation time is not available on every filesystem; mtime is the
    // closest stand-in when it isn't.
    meta.created()
        .or_else(|_| meta.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH)
}

fn read_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        names.push(entry?.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

/// Moves the most recently created visible file out of `src` into `dest`.
pub(crate) fn move_last(src: &Path, dest: &Path) -> Outcome {
    outcome("Mv_last", try_move_last(src, dest))
}

fn try_move_last(src: &Path, dest: &Path) -> Result<String> {
    let mut newest: Option<(SystemTime, fs::DirEntry)> = None;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        if is_hidden(&entry.file_name()) || !entry.path().is_file() {
            continue;
        }
        let created = created_time(&entry.metadata()?);
        if newest.as_ref().is_none_or(|(t, _)| created > *t) {
            newest = Some((created, entry));
        }
    }

    let Some((_, latest)) = newest else {
        bail!("no files found in source directory");
    };
    let name = latest.file_name();
    fs::rename(latest.path(), dest.join(&name))?;
    Ok(format!(
        "Mv_last: Moved {} to {}",
        name.to_string_lossy(),
        dest.display()
    ))
}

/// Buckets every visible file in `dir` into `small_files/` or `large_files/`
/// by comparing its size to the threshold (strictly less goes small).
pub(crate) fn categorize(dir: &Path, threshold: u64) -> Outcome {
    outcome("Categorize", try_categorize(dir, threshold))
}

fn try_categorize(dir: &Path, threshold: u64) -> Result<String> {
    let small = dir.join("small_files");
    let large = dir.join("large_files");
    fs::create_dir_all(&small)?;
    fs::create_dir_all(&large)?;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if is_hidden(&name) || !entry.path().is_file() {
            continue;
        }
        let bucket = if entry.metadata()?.len() < threshold {
            &small
        } else {
            &large
        };
        fs::rename(entry.path(), bucket.join(&name))?;
    }
    Ok(format!("Categorize: Files categorized in {}", dir.display()))
}

/// Counts the regular files directly in `dir`. Hidden files count too.
pub(crate) fn count(dir: &Path) -> Outcome {
    outcome("Count", try_count(dir))
}

fn try_count(dir: &Path) -> Result<String> {
    let mut count = 0usize;
    for entry in fs::read_dir(dir)? {
        if entry?.path().is_file() {
            count += 1;
        }
    }
    Ok(format!("Count: {count} files in {}", dir.display()))
}

pub(crate) fn delete(file: &str, dir: &Path) -> Outcome {
    outcome("Delete", try_delete(file, dir))
}

fn try_delete(file: &str, dir: &Path) -> Result<String> {
    fs::remove_file(dir.join(file))?;
    Ok(format!("Delete: {file} deleted from {}", dir.display()))
}

pub(crate) fn rename(old: &str, new: &str, dir: &Path) -> Outcome {
    outcome("Rename", try_rename(old, new, dir))
}

fn try_rename(old: &str, new: &str, dir: &Path) -> Result<String> {
    if !dir.join(old).exists() {
        bail!("{old} not found in {}", dir.display());
    }
    fs::rename(dir.join(old), dir.join(new))?;
    Ok(format!(
        "Rename: {old} renamed to {new} in {}",
        dir.display()
    ))
}

/// Reports the full listing of `dir`, subdirectories included.
pub(crate) fn list(dir: &Path) -> Outcome {
    outcome("List", try_list(dir))
}

fn try_list(dir: &Path) -> Result<String> {
    let names = read_names(dir)?;
    Ok(format!("List: Files in {} - {:?}", dir.display(), names))
}

/// Orders the listing of `dir` by the given criterion. Report-only: the
/// computed order is never written back to the filesystem.
pub(crate) fn sort(dir: &Path, criterion: &str) -> Outcome {
    let names = match read_names(dir) {
        Ok(n) => n,
        Err(e) => return fail("Sort", e),
    };

    let ordered = match criterion {
        "name" => {
            let mut names = names;
            names.sort();
            names
        }
        "date" => {
            let mut keyed: Vec<(SystemTime, String)> = Vec::new();
            for name in names {
                match fs::metadata(dir.join(&name)) {
                    Ok(m) => keyed.push((created_time(&m), name)),
                    Err(e) => return fail("Sort", e),
                }
            }
            keyed.sort();
            keyed.into_iter().map(|(_, n)| n).collect()
        }
        "size" => {
            let mut keyed: Vec<(u64, String)> = Vec::new();
            for name in names {
                match fs::metadata(dir.join(&name)) {
                    Ok(m) => keyed.push((m.len(), name)),
                    Err(e) => return fail("Sort", e),
                }
            }
            keyed.sort();
            keyed.into_iter().map(|(_, n)| n).collect()
        }
        other => {
            return (
                format!("Sort: Unsupported criteria {other}"),
                Status::Failed,
            );
        }
    };

    log::debug!("Sort order for {}: {:?}", dir.display(), ordered);
    (
        format!("Sort: Files in {} sorted by {}", dir.display(), criterion),
        Status::Passed,
    )
}
