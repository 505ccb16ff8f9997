use anyhow::{Context, Result};
use chrono::Local;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const SEPARATOR: &str = "---------------------------------------------------------";

/// Run-scoped debug trace. Every line the executor emits lands here, and the
/// raw-copy output mode duplicates this file verbatim, so it must be flushed
/// before anyone copies it.
pub struct TraceSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl TraceSink {
    /// Truncates any trace left over from a previous run.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = File::create(&path)
            .with_context(|| format!("Failed to create trace file {}", path.display()))?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn info(&mut self, msg: &str) {
        self.write_line("INFO", msg);
    }

    pub fn debug(&mut self, msg: &str) {
        self.write_line("DEBUG", msg);
    }

    pub fn separator(&mut self) {
        self.info(SEPARATOR);
    }

    fn write_line(&mut self, level: &str, msg: &str) {
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        // A full disk must not take the run down with it.
        if let Err(e) = writeln!(self.writer, "{stamp} - {level} - {msg}") {
            log::warn!("trace write failed: {e}");
        }
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush trace file")
    }
}

impl Drop for TraceSink {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}
