//! Redact command implementation
//!
//! Runs one detect, decide and confirm cycle over a text. The anonymized text is
//! printed to stdout and the replacement mapping can be written to a JSON file,
//! optionally merged into the mapping left by a previous run.

use super::{engine_from_config, read_input};
use crate::domain::SessionId;
use crate::guardrail::{GuardrailSession, ReplacementMapping};
use anyhow::Context;
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments for the redact command
#[derive(Args, Debug)]
pub struct RedactArgs {
    /// File to redact (reads stdin when omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Item id to leave untouched (repeatable), e.g. `email-14-34`
    #[arg(long = "ignore", value_name = "ID")]
    pub ignore: Vec<String>,

    /// Write the replacement mapping as JSON to this file
    #[arg(long, value_name = "FILE")]
    pub mapping_out: Option<PathBuf>,

    /// Merge into the mapping already stored in --mapping-out
    #[arg(long, requires = "mapping_out")]
    pub merge: bool,

    /// Session identifier recorded in audit entries
    #[arg(long, value_name = "ID")]
    pub session: Option<String>,
}

impl RedactArgs {
    /// Execute the redact command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let engine = match engine_from_config(config_path) {
            Ok(engine) => engine,
            Err(code) => return Ok(code),
        };

        let session_id = match self.session {
            Some(ref raw) => match SessionId::new(raw.as_str()) {
                Ok(id) => id,
                Err(e) => {
                    eprintln!("❌ {e}");
                    return Ok(2);
                }
            },
            None => SessionId::generate(),
        };

        let mut session = match (self.merge, self.mapping_out.as_deref()) {
            (true, Some(path)) if path.exists() => {
                GuardrailSession::resume(session_id, read_mapping(path)?)
            }
            _ => GuardrailSession::with_id(session_id),
        };

        let text = read_input(self.input.as_deref())?;
        let mut decision = engine.begin(&text);

        for id in &self.ignore {
            if !decision.set_ignored(id, true) {
                eprintln!("❌ No detected item with id: {id}");
                eprintln!("   Run `veil detect` to list item ids");
                decision.cancel();
                return Ok(2);
            }
        }

        let anonymized = engine.confirm(decision, &mut session)?;

        if let Some(ref path) = self.mapping_out {
            write_mapping(path, session.mapping())?;
            tracing::info!(
                path = %path.display(),
                entries = session.mapping().len(),
                "Mapping written"
            );
        }

        print!("{anonymized}");
        Ok(0)
    }
}

/// Read a mapping previously written by [`write_mapping`]
pub(crate) fn read_mapping(path: &Path) -> anyhow::Result<ReplacementMapping> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read mapping file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid mapping file {}", path.display()))
}

fn write_mapping(path: &Path, mapping: &ReplacementMapping) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(mapping).context("Failed to serialize mapping")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write mapping file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn input_file(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{text}").unwrap();
        file
    }

    fn args(input: &NamedTempFile, mapping_out: PathBuf) -> RedactArgs {
        RedactArgs {
            input: Some(input.path().to_path_buf()),
            ignore: Vec::new(),
            mapping_out: Some(mapping_out),
            merge: false,
            session: None,
        }
    }

    #[test]
    fn test_redact_writes_mapping() {
        let dir = TempDir::new().unwrap();
        let input = input_file("My SSN is 123-45-6789");
        let mapping_path = dir.path().join("mapping.json");
        let config_path = dir.path().join("veil.toml");

        let code = args(&input, mapping_path.clone())
            .execute(config_path.to_str().unwrap())
            .unwrap();
        assert_eq!(code, 0);

        let mapping = read_mapping(&mapping_path).unwrap();
        assert_eq!(mapping.get("[SSN_1]"), Some("123-45-6789"));
    }

    #[test]
    fn test_redact_ignored_item_is_not_mapped() {
        let dir = TempDir::new().unwrap();
        let input = input_file("My SSN is 123-45-6789");
        let mapping_path = dir.path().join("mapping.json");
        let config_path = dir.path().join("veil.toml");

        let mut redact = args(&input, mapping_path.clone());
        redact.ignore = vec!["ssn-10-21".to_string()];
        assert_eq!(redact.execute(config_path.to_str().unwrap()).unwrap(), 0);

        assert!(read_mapping(&mapping_path).unwrap().is_empty());
    }

    #[test]
    fn test_redact_unknown_ignore_id() {
        let dir = TempDir::new().unwrap();
        let input = input_file("My SSN is 123-45-6789");
        let mapping_path = dir.path().join("mapping.json");
        let config_path = dir.path().join("veil.toml");

        let mut redact = args(&input, mapping_path.clone());
        redact.ignore = vec!["email-0-5".to_string()];
        assert_eq!(redact.execute(config_path.to_str().unwrap()).unwrap(), 2);
        assert!(!mapping_path.exists());
    }

    #[test]
    fn test_redact_merge_keeps_previous_entries() {
        let dir = TempDir::new().unwrap();
        let mapping_path = dir.path().join("mapping.json");
        let config_path = dir.path().join("veil.toml");

        let existing: ReplacementMapping = [("[EMAIL_1]", "jane.doe@example.com")]
            .into_iter()
            .collect();
        write_mapping(&mapping_path, &existing).unwrap();

        let input = input_file("My SSN is 123-45-6789");
        let mut redact = args(&input, mapping_path.clone());
        redact.merge = true;
        assert_eq!(redact.execute(config_path.to_str().unwrap()).unwrap(), 0);

        let merged = read_mapping(&mapping_path).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get("[EMAIL_1]"), Some("jane.doe@example.com"));
        assert_eq!(merged.get("[SSN_1]"), Some("123-45-6789"));
    }

    #[test]
    fn test_redact_blank_session_id() {
        let dir = TempDir::new().unwrap();
        let input = input_file("nothing here");
        let config_path = dir.path().join("veil.toml");

        let mut redact = args(&input, dir.path().join("mapping.json"));
        redact.session = Some("  ".to_string());
        assert_eq!(redact.execute(config_path.to_str().unwrap()).unwrap(), 2);
    }
}
