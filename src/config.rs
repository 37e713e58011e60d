//! Engine configuration.
//!
//! Holds the two paired block identifiers, the optional priority
//! instructor and the quota thresholds that split instructors into
//! load tiers. Loadable from TOML:
//!
//! ```toml
//! priority_instructor = "Ivette"
//!
//! [pair]
//! first = "SA09"
//! second = "SA11"
//!
//! [tiers]
//! high = 10
//! medium = 5
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AssignError, AssignResult};

/// Two block identifiers that must share one instructor or stay unassigned.
///
/// Identifiers are trimmed on construction and on deserialization, the
/// same way block ids are trimmed when decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedBlocks {
    #[serde(deserialize_with = "trimmed")]
    pub first: String,
    #[serde(deserialize_with = "trimmed")]
    pub second: String,
}

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().to_string())
}

impl PairedBlocks {
    /// Creates a pair from trimmed identifiers.
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into().trim().to_string(),
            second: second.into().trim().to_string(),
        }
    }

    /// Whether `block_id` is one of the two paired identifiers.
    #[inline]
    pub fn contains(&self, block_id: &str) -> bool {
        self.first == block_id || self.second == block_id
    }
}

/// Quota thresholds for load tiers.
///
/// `quota >= high` is the high tier, `medium <= quota < high` the medium
/// tier, everything below `medium` the low tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThresholds {
    #[serde(default = "default_high")]
    pub high: u32,
    #[serde(default = "default_medium")]
    pub medium: u32,
}

fn default_high() -> u32 {
    10
}

fn default_medium() -> u32 {
    5
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            high: default_high(),
            medium: default_medium(),
        }
    }
}

/// Assignment engine configuration.
///
/// # Example
/// ```
/// use u_assign::config::EngineConfig;
///
/// let config = EngineConfig::new("SA09", "SA11").with_priority_instructor("Ivette");
/// assert!(config.validate().is_ok());
/// assert_eq!(config.tiers.high, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Substring matched against instructor names. Blank means none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_instructor: Option<String>,
    /// Paired block identifiers.
    pub pair: PairedBlocks,
    /// Load tier thresholds.
    #[serde(default)]
    pub tiers: TierThresholds,
}

impl EngineConfig {
    /// Creates a configuration with the given pair and default tiers.
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            priority_instructor: None,
            pair: PairedBlocks::new(first, second),
            tiers: TierThresholds::default(),
        }
    }

    /// Sets the priority instructor name (substring match).
    pub fn with_priority_instructor(mut self, name: impl Into<String>) -> Self {
        self.priority_instructor = Some(name.into());
        self
    }

    /// Sets the tier thresholds.
    pub fn with_tiers(mut self, high: u32, medium: u32) -> Self {
        self.tiers = TierThresholds { high, medium };
        self
    }

    /// The priority name to match, if any. Blank names count as unset.
    pub fn priority_name(&self) -> Option<&str> {
        self.priority_instructor
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Checks the pair and tier settings.
    pub fn validate(&self) -> AssignResult<()> {
        let first = self.pair.first.as_str();
        let second = self.pair.second.as_str();
        if first.trim().is_empty() || second.trim().is_empty() {
            return Err(AssignError::InvalidConfig(
                "paired block identifiers must not be empty".into(),
            ));
        }
        if let Some(padded) = [first, second].into_iter().find(|id| id.trim() != *id) {
            return Err(AssignError::InvalidConfig(format!(
                "paired block identifier '{padded}' has surrounding whitespace"
            )));
        }
        if first == second {
            return Err(AssignError::InvalidConfig(format!(
                "paired block identifiers must differ, both are '{first}'"
            )));
        }
        if self.tiers.high <= self.tiers.medium {
            return Err(AssignError::InvalidConfig(format!(
                "high tier threshold ({}) must exceed medium threshold ({})",
                self.tiers.high, self.tiers.medium
            )));
        }
        Ok(())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> AssignResult<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML file.
    pub fn from_file(path: &Path) -> AssignResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> AssignResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
