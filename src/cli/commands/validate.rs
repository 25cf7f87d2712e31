//! Validate config command implementation
//!
//! This module implements the `validate-config` command, which loads the
//! configuration file and compiles the rule library it selects.

use crate::config::load_config;
use crate::guardrail::GuardrailEngine;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let engine = match GuardrailEngine::new(config.guardrail.clone()) {
            Ok(engine) => {
                println!("✅ Rule library compiled successfully");
                engine
            }
            Err(e) => {
                println!("❌ Rule library validation failed");
                println!("   Error: {e:#}");
                println!();
                return Ok(2); // Configuration error exit code
            }
        };

        let categories: Vec<&str> = engine
            .registry()
            .categories()
            .iter()
            .map(|c| c.as_str())
            .collect();

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Guardrail Enabled: {}", engine.is_enabled());
        match config.guardrail.pattern_library {
            Some(ref path) => println!("  Rule Library: {}", path.display()),
            None => println!("  Rule Library: built-in"),
        }
        println!("  Rules: {}", engine.registry().len());
        println!("  Categories: {}", categories.join(", "));
        if config.guardrail.audit.enabled {
            println!(
                "  Audit Log: {} ({})",
                config.guardrail.audit.log_path.display(),
                if config.guardrail.audit.json_format {
                    "json"
                } else {
                    "text"
                }
            );
        } else {
            println!("  Audit Log: disabled");
        }
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_missing_file() {
        let args = ValidateArgs {};
        assert_eq!(args.execute("nonexistent-veil.toml").unwrap(), 2);
    }

    #[test]
    fn test_validate_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[guardrail]\ndisabled_categories = [\"name\", \"username\"]").unwrap();

        let args = ValidateArgs {};
        assert_eq!(args.execute(file.path().to_str().unwrap()).unwrap(), 0);
    }

    #[test]
    fn test_validate_broken_rule_library() {
        let mut library = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            library,
            "[[rules]]\ncategory = \"email\"\nlabel = \"Email\"\nprefix = \"EMAIL\"\npatterns = [\"(unclosed\"]"
        )
        .unwrap();

        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[guardrail]\npattern_library = {:?}",
            library.path().to_str().unwrap()
        )
        .unwrap();

        let args = ValidateArgs {};
        assert_eq!(args.execute(file.path().to_str().unwrap()).unwrap(), 2);
    }
}
