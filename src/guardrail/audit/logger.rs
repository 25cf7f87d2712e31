//! Audit logger for guardrail confirmations

use crate::domain::SessionId;
use crate::guardrail::models::SensitiveItem;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry<'a> {
    timestamp: String,
    session_id: &'a str,
    redacted_count: usize,
    ignored_count: usize,
    items: Vec<AuditItem<'a>>,
}

/// Audit item entry (with hashed original)
#[derive(Debug, Serialize)]
struct AuditItem<'a> {
    category: &'a str,
    placeholder: &'a str,
    start: usize,
    end: usize,
    ignored: bool,
    /// SHA-256 hash of the original value (never log plaintext)
    value_hash: String,
}

/// Append-only audit trail of confirmed redactions
#[derive(Debug)]
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
}

impl AuditLogger {
    /// Create a new audit logger, creating the log directory if needed
    pub fn new(log_path: PathBuf, json_format: bool) -> Result<Self> {
        if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create audit log directory: {}", parent.display())
            })?;
        }

        Ok(Self {
            log_path,
            json_format,
        })
    }

    /// Path of the audit file
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Record one confirmed decision
    pub fn log_confirmation(&self, session_id: &SessionId, items: &[SensitiveItem]) -> Result<()> {
        let ignored_count = items.iter().filter(|item| item.ignored).count();

        let entry = AuditLogEntry {
            timestamp: Utc::now().to_rfc3339(),
            session_id: session_id.as_str(),
            redacted_count: items.len() - ignored_count,
            ignored_count,
            items: items
                .iter()
                .map(|item| AuditItem {
                    category: item.category.as_str(),
                    placeholder: &item.placeholder,
                    start: item.start,
                    end: item.end,
                    ignored: item.ignored,
                    value_hash: hash_value(&item.original),
                })
                .collect(),
        };

        self.write_entry(&entry)
    }

    /// Write an audit entry to the log file
    fn write_entry(&self, entry: &AuditLogEntry<'_>) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open audit log: {}", self.log_path.display()))?;

        if self.json_format {
            let json_line =
                serde_json::to_string(entry).context("Failed to serialize audit entry")?;
            writeln!(file, "{json_line}").context("Failed to write audit entry")?;
        } else {
            let categories: Vec<&str> = entry.items.iter().map(|item| item.category).collect();
            writeln!(
                file,
                "[{}] Session: {} | Redacted: {} | Ignored: {} | Categories: {}",
                entry.timestamp,
                entry.session_id,
                entry.redacted_count,
                entry.ignored_count,
                categories.join(",")
            )
            .context("Failed to write audit entry")?;
        }

        Ok(())
    }
}

/// Hash a value using SHA-256
fn hash_value(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    format!("{:x}", hasher.finalize())
}
