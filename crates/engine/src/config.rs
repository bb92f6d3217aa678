use crate::connect::ConnectLimits;
use crate::error::{EngineError, Result};
use resonance_lexicon::PhraseQuotas;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest value handed to the factorization chain (10^18).
pub const DEFAULT_UNFOLD_THRESHOLD: u64 = 1_000_000_000_000_000_000;

/// Ciphers whose values are concatenated into the initial number, in order.
pub const DEFAULT_PRIMARY_CIPHERS: [&str; 3] = ["gemini-resonance", "english", "simple"];

/// Cipher that scores the phrases drawn by a connection pass.
pub const DEFAULT_CONNECTION_CIPHER: &str = "gemini-resonance";

/// Named set of ciphers concatenated into one extra unfolding seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainGroup {
    pub label: String,
    pub ciphers: Vec<String>,
}

impl ChainGroup {
    pub fn new<S: Into<String>>(
        label: impl Into<String>,
        ciphers: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            label: label.into(),
            ciphers: ciphers.into_iter().map(Into::into).collect(),
        }
    }

    /// Zodiac through the base-N ciphers into composite CTGB
    pub fn zodiac_to_ctgb() -> Self {
        Self::new(
            "zodiac-to-ctgb",
            [
                "zodiac",
                "base-2",
                "base-3",
                "base-4",
                "base-5",
                "base-7",
                "base-9",
                "base-11",
                "composite-ctgb",
            ],
        )
    }

    /// Hexadecimal position through to solfège
    pub fn hex_to_solfege() -> Self {
        Self::new(
            "hex-to-solfege",
            [
                "hexadecimal-position",
                "sumerian",
                "phone-keypad",
                "ascii-sum",
                "base-8",
                "caesar",
                "polybius-square",
                "solfege",
            ],
        )
    }
}

/// Configuration for the resonance pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Values above this are reported as too large and not unfolded
    pub unfold_threshold: u64,

    /// Ciphers concatenated, in this order, into the initial number
    pub primary_ciphers: Vec<String>,

    /// Second-order concatenation passes
    pub chain_groups: Vec<ChainGroup>,

    /// Rewrite cipher and group values in this base, read the digits back
    /// as decimal, and unfold that instead
    pub base_conversion: Option<u32>,

    /// Keep only prime resonance numbers
    pub prime_only: bool,

    /// Default per-number phrase limits
    pub quotas: PhraseQuotas,

    /// Scores the phrases drawn when starting from a number
    pub connection_cipher: String,

    /// Default limits for a connection pass
    pub connect_limits: ConnectLimits,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            unfold_threshold: DEFAULT_UNFOLD_THRESHOLD,
            primary_ciphers: DEFAULT_PRIMARY_CIPHERS.map(String::from).to_vec(),
            chain_groups: vec![ChainGroup::zodiac_to_ctgb(), ChainGroup::hex_to_solfege()],
            base_conversion: None,
            prime_only: false,
            quotas: PhraseQuotas::default(),
            connection_cipher: DEFAULT_CONNECTION_CIPHER.to_string(),
            connect_limits: ConnectLimits::default(),
        }
    }
}

impl EngineConfig {
    /// Default pipeline restricted to prime resonances
    pub fn primes_only() -> Self {
        Self {
            prime_only: true,
            ..Default::default()
        }
    }

    /// Default pipeline without the second-order group passes
    pub fn without_groups() -> Self {
        Self {
            chain_groups: Vec::new(),
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.unfold_threshold == 0 {
            return Err(EngineError::invalid_config("unfold_threshold must be > 0"));
        }
        if self.unfold_threshold > i64::MAX as u64 {
            let (threshold, max) = (self.unfold_threshold, i64::MAX);
            return Err(EngineError::invalid_config(format!(
                "unfold_threshold ({threshold}) cannot exceed {max}"
            )));
        }
        if self.primary_ciphers.is_empty() {
            return Err(EngineError::invalid_config(
                "primary_ciphers must name at least one cipher",
            ));
        }
        if self.connection_cipher.trim().is_empty() {
            return Err(EngineError::invalid_config("connection_cipher cannot be empty"));
        }
        if let Some(base) = self.base_conversion {
            if !(2..=36).contains(&base) {
                return Err(EngineError::invalid_config(format!(
                    "base_conversion ({base}) must be within 2..=36"
                )));
            }
        }
        for group in &self.chain_groups {
            if group.label.trim().is_empty() {
                return Err(EngineError::invalid_config("chain group label cannot be empty"));
            }
            if group.ciphers.is_empty() {
                return Err(EngineError::invalid_config(format!(
                    "chain group '{}' has no ciphers",
                    group.label
                )));
            }
        }
        Ok(())
    }

    /// Parses and validates a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| EngineError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        log::debug!("Loaded engine config from {}", path.display());
        Ok(config)
    }
}
