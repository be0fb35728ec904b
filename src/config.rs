//! Calculator configuration.
//!
//! Every field has a default, so a missing file or a partial file is fine.
//! The file lives at `$XDG_CONFIG_HOME/zcalc/config.toml` unless a path is
//! given explicitly.

use crate::calculator::AngleMode;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Display and precision settings for a calculator session.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Longest operand (typed or formatted result) the display accepts.
    pub max_operand_len: usize,
    /// Longest expression the display accepts; longer text is cut from the left.
    pub max_expression_len: usize,
    /// Significant digits kept after each evaluation.
    pub significant_digits: usize,
    /// Significant digits used when a result is too long to show in full.
    pub reduced_precision: usize,
    /// Text shown while the session is error-locked.
    pub error_indicator: String,
    /// Angle mode of a fresh or cleared session.
    pub angle_mode: AngleMode,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            max_operand_len: 16,
            max_expression_len: 42,
            significant_digits: 15,
            reduced_precision: 10,
            error_indicator: "Error".to_string(),
            angle_mode: AngleMode::Degrees,
        }
    }
}

impl CalculatorConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Invalid calculator config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("In config file {}", path.display()))
    }

    /// Load from the default location, falling back to defaults when the
    /// file does not exist.
    pub fn load_default() -> Result<Self> {
        match default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.max_operand_len == 0 {
            anyhow::bail!("max_operand_len must be at least 1");
        }
        if self.max_expression_len < self.max_operand_len {
            anyhow::bail!(
                "max_expression_len ({}) must not be smaller than max_operand_len ({})",
                self.max_expression_len,
                self.max_operand_len
            );
        }
        if !(1..=17).contains(&self.significant_digits) {
            anyhow::bail!("significant_digits must be between 1 and 17");
        }
        if !(1..=self.significant_digits).contains(&self.reduced_precision) {
            anyhow::bail!("reduced_precision must be between 1 and significant_digits");
        }
        Ok(())
    }
}

/// `$XDG_CONFIG_HOME/zcalc/config.toml`, if a config directory exists.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("zcalc").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(
            CalculatorConfig::from_toml("").unwrap(),
            CalculatorConfig::default()
        );
    }

    #[test]
    fn test_partial_override() {
        let config = CalculatorConfig::from_toml(
            r#"
            max_operand_len = 12
            angle_mode = "RADIANS"
            error_indicator = "E"
            "#,
        )
        .unwrap();
        assert_eq!(config.max_operand_len, 12);
        assert_eq!(config.max_expression_len, 42);
        assert_eq!(config.angle_mode, AngleMode::Radians);
        assert_eq!(config.error_indicator, "E");
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(CalculatorConfig::from_toml("max_operand_len = 0").is_err());
        assert!(CalculatorConfig::from_toml("max_expression_len = 8").is_err());
        assert!(CalculatorConfig::from_toml("significant_digits = 20").is_err());
        assert!(CalculatorConfig::from_toml("angle_mode = \"GRADIANS\"").is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        let path = Path::new("/nonexistent/zcalc/config.toml");
        assert!(CalculatorConfig::load(path).is_err());
    }
}
