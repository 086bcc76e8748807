//! Panel connection settings
//!
//! Loaded from an optional TOML file and overridden from the command line:
//!
//! ```toml
//! device = "/dev/i2c-1"
//! address = 0x3C
//! contrast = 127
//! ```

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default i2c-dev node on a Raspberry Pi
pub const DEFAULT_DEVICE: &str = "/dev/i2c-1";

/// Default SSD1306 slave address (SA0 low)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Connection settings for one panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OledConfig {
    /// i2c-dev node (e.g., /dev/i2c-1)
    pub device: PathBuf,
    /// 7-bit slave address
    pub address: u8,
    /// Contrast applied after initialization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrast: Option<u8>,
}

impl Default for OledConfig {
    fn default() -> Self {
        Self {
            device: PathBuf::from(DEFAULT_DEVICE),
            address: DEFAULT_ADDRESS,
            contrast: None,
        }
    }
}

impl OledConfig {
    /// Read settings from a TOML file; missing keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Parse settings from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the i2c-dev node
    pub fn with_device(mut self, device: PathBuf) -> Self {
        self.device = device;
        self
    }

    /// Set the slave address
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Set the contrast applied after initialization
    pub fn with_contrast(mut self, contrast: u8) -> Self {
        self.contrast = Some(contrast);
        self
    }

    fn validate(&self) -> Result<()> {
        if self.address > 0x7F {
            bail!("address 0x{:02X} is not a 7-bit I2C address", self.address);
        }
        Ok(())
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

/// Parse a 7-bit slave address given as decimal or `0x` hex
pub fn parse_address(s: &str) -> Result<u8, String> {
    let s = s.trim();
    let value = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse::<u8>(),
    }
    .map_err(|e| format!("invalid address '{}': {}", s, e))?;

    if value > 0x7F {
        return Err(format!("address 0x{:02X} is not a 7-bit I2C address", value));
    }
    Ok(value)
}
