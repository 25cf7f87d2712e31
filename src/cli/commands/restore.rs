//! Restore command implementation
//!
//! Replaces the placeholders in a text (typically a model response) with the
//! originals stored in a mapping file written by `veil redact`.

use super::read_input;
use super::redact::read_mapping;
use crate::guardrail::{has_mappable_placeholders, restore_originals};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the restore command
#[derive(Args, Debug)]
pub struct RestoreArgs {
    /// Mapping JSON file produced by `veil redact --mapping-out`
    #[arg(short, long, value_name = "FILE")]
    pub mapping: PathBuf,

    /// File to restore (reads stdin when omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

impl RestoreArgs {
    /// Execute the restore command
    pub fn execute(&self) -> anyhow::Result<i32> {
        let mapping = read_mapping(&self.mapping)?;
        let text = read_input(self.input.as_deref())?;

        if !has_mappable_placeholders(&text, &mapping) {
            tracing::debug!(entries = mapping.len(), "No mapped placeholders in input");
        }

        print!("{}", restore_originals(&text, &mapping));
        Ok(0)
    }
}
