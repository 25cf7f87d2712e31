//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "veil.toml")]
    pub output: String,

    /// Include every option with explanatory comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Veil configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Disable categories you do not want redacted");
                println!("  3. Validate configuration: veil validate-config");
                println!("  4. Try it: echo 'My SSN is 123-45-6789' | veil redact");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Veil Configuration File
# Reversible redaction of sensitive information

[application]
log_level = "info"

[guardrail]
enabled = true
disabled_categories = []

[guardrail.audit]
enabled = false
log_path = "./audit/guardrail.log"
json_format = true

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Veil Configuration File
# Reversible redaction of sensitive information
#
# Every section and key is optional; the values below are the defaults.
# Values may reference environment variables with ${VAR_NAME}, and any key can
# be overridden with VEIL_<SECTION>_<KEY>, e.g. VEIL_GUARDRAIL_ENABLED=false.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Guardrail Settings
# ============================================================================
[guardrail]
# When disabled, text passes through untouched and nothing is detected
enabled = true

# Optional: replace the built-in rule library with your own TOML file.
# Rules are evaluated in file order; earlier rules claim text first.
# pattern_library = "./rules.toml"

# Categories to skip. One of: email, phone, credit_card, ssn, api_key,
# password, address, name, username, ip_address, date_of_birth,
# bank_reference, medical_reference
disabled_categories = []

# Audit trail of confirmed redactions. Entries record categories,
# placeholders, offsets and SHA-256 hashes, never the original values.
[guardrail.audit]
enabled = false
log_path = "./audit/guardrail.log"

# JSON lines (true) or one plain-text line per confirmation (false)
json_format = true

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local JSON file logging (console logging always goes to stderr)
local_enabled = false

# Directory for veil.log files
local_path = "./logs"

# Log rotation (daily, hourly, never)
local_rotation = "daily"
"#
        .to_string()
    }
}
