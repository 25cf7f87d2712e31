//! CLI command implementations
//!
//! This module contains all CLI command implementations. Command output goes to
//! stdout; status and error messages go to stderr so the output can be piped.

pub mod detect;
pub mod init;
pub mod redact;
pub mod restore;
pub mod validate;

use crate::config::load_config_or_default;
use crate::guardrail::GuardrailEngine;
use anyhow::Context;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Read the text to process from a file, or from stdin when no file is given
pub(crate) fn read_input(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read input from stdin")?;
            Ok(buffer)
        }
    }
}

/// Build a guardrail engine from the configuration at `config_path`
///
/// A missing file means defaults. On failure the error is reported on stderr and
/// the configuration-error exit code is returned.
pub(crate) fn engine_from_config(config_path: &str) -> Result<GuardrailEngine, i32> {
    let config = match load_config_or_default(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("❌ Failed to load configuration file");
            eprintln!("   Error: {e}");
            return Err(2); // Configuration error exit code
        }
    };

    match GuardrailEngine::new(config.guardrail) {
        Ok(engine) => Ok(engine),
        Err(e) => {
            eprintln!("❌ Failed to initialize guardrail");
            eprintln!("   Error: {e:#}");
            Err(2) // Configuration error exit code
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_read_input_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "Call 415-555-0199").unwrap();

        let text = read_input(Some(file.path())).unwrap();
        assert_eq!(text, "Call 415-555-0199");
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input(Some(Path::new("/nonexistent/veil-input.txt"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }

    #[test]
    fn test_engine_from_missing_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("veil.toml");

        let engine = engine_from_config(path.to_str().unwrap()).unwrap();
        assert!(engine.is_enabled());
        assert!(!engine.registry().is_empty());
    }

    #[test]
    fn test_engine_from_invalid_config_exits_with_config_code() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[guardrail]\ndisabled_categories = [\"shoe_size\"]").unwrap();

        let code = engine_from_config(file.path().to_str().unwrap()).err().unwrap();
        assert_eq!(code, 2);
    }
}
