use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// One `message,status` line per executed command.
    Csv,
    /// Verbatim copy of the run's debug trace.
    Log,
}

impl OutputMode {
    pub fn extension(self) -> &'static str {
        match self {
            OutputMode::Csv => "csv",
            OutputMode::Log => "log",
        }
    }
}

// Wire shape of config.json.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(rename = "Threshold_size")]
    threshold_size: String,
    #[serde(rename = "Max_commands")]
    max_commands: usize,
    #[serde(rename = "Max_log_files")]
    max_log_files: usize,
    #[serde(rename = "Same_dir")]
    same_dir: bool,
    #[serde(rename = "Output")]
    output: OutputMode,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Categorize threshold in bytes, converted from the "<N>KB" setting.
    pub threshold_size: u64,
    pub max_commands: usize,
    pub max_log_files: usize,
    /// Write logs directly into the output directory instead of a
    /// Passed/Failed subdirectory.
    pub same_dir: bool,
    pub output: OutputMode,
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        bail!("❌ Critical: {:?} not found.", path);
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let raw: RawConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    Ok(Config {
        threshold_size: parse_threshold(&raw.threshold_size)?,
        max_commands: raw.max_commands,
        max_log_files: raw.max_log_files,
        same_dir: raw.same_dir,
        output: raw.output,
    })
}

fn parse_threshold(spec: &str) -> Result<u64> {
    let Some(count) = spec.strip_suffix("KB") else {
        bail!("Threshold_size must look like \"500KB\", got {:?}", spec);
    };
    let kb: u64 = count
        .trim()
        .parse()
        .with_context(|| format!("Threshold_size is not a number: {:?}", spec))?;
    Ok(kb * 1024)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) -> std::path::PathBuf {
        let path = dir.path().join("config.json");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_load_full_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"{
                "Threshold_size": "500KB",
                "Max_commands": 10,
                "Max_log_files": 5,
                "Same_dir": false,
                "Output": "csv"
            }"#,
        );

        let config = load_config(&path).unwrap();
        assert_eq!(config.threshold_size, 512_000);
        assert_eq!(config.max_commands, 10);
        assert_eq!(config.max_log_files, 5);
        assert!(!config.same_dir);
        assert_eq!(config.output, OutputMode::Csv);
    }

    #[test]
    fn test_log_output_mode() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"{
                "Threshold_size": "1KB",
                "Max_commands": 3,
                "Max_log_files": 2,
                "Same_dir": true,
                "Output": "log"
            }"#,
        );

        let config = load_config(&path).unwrap();
        assert!(config.same_dir);
        assert_eq!(config.output, OutputMode::Log);
        assert_eq!(config.output.extension(), "log");
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"{
                "Threshold_size": "1KB",
                "Max_commands": 3,
                "Max_log_files": 2
            }"#,
        );
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_unknown_output_mode_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"{
                "Threshold_size": "1KB",
                "Max_commands": 3,
                "Max_log_files": 2,
                "Same_dir": true,
                "Output": "xml"
            }"#,
        );
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_threshold_requires_kb_suffix() {
        assert!(parse_threshold("512").is_err());
        assert!(parse_threshold("twoKB").is_err());
        assert_eq!(parse_threshold("2KB").unwrap(), 2048);
    }

    #[test]
    fn test_missing_config_file() {
        let dir = TempDir::new().unwrap();
        assert!(load_config(&dir.path().join("config.json")).is_err());
    }
}
