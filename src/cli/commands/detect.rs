//! Detect command implementation
//!
//! Scans a text and prints the detection result as JSON, without producing a
//! mapping or touching any session.

use super::{engine_from_config, read_input};
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the detect command
#[derive(Args, Debug)]
pub struct DetectArgs {
    /// File to scan (reads stdin when omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl DetectArgs {
    /// Execute the detect command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let engine = match engine_from_config(config_path) {
            Ok(engine) => engine,
            Err(code) => return Ok(code),
        };

        let text = read_input(self.input.as_deref())?;
        let result = engine.detect(&text);

        tracing::info!(
            items = result.items.len(),
            has_sensitive_info = result.has_sensitive_info,
            "Detection completed"
        );

        let json = if self.pretty {
            serde_json::to_string_pretty(&result)
        } else {
            serde_json::to_string(&result)
        }
        .context("Failed to serialize detection result")?;

        println!("{json}");
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_detect_from_file() {
        let dir = TempDir::new().unwrap();
        let mut input = NamedTempFile::new().unwrap();
        write!(input, "My SSN is 123-45-6789").unwrap();

        let args = DetectArgs {
            input: Some(input.path().to_path_buf()),
            pretty: true,
        };
        let config_path = dir.path().join("veil.toml");
        assert_eq!(args.execute(config_path.to_str().unwrap()).unwrap(), 0);
    }

    #[test]
    fn test_detect_missing_input_is_an_error() {
        let dir = TempDir::new().unwrap();
        let args = DetectArgs {
            input: Some(dir.path().join("missing.txt")),
            pretty: false,
        };
        let config_path = dir.path().join("veil.toml");
        assert!(args.execute(config_path.to_str().unwrap()).is_err());
    }
}
