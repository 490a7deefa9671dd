#![forbid(unsafe_code)]

//! Tracker configuration.
//!
//! [`TrackerConfig`] gathers every tunable the host layer supplies: grid
//! size, hit factor, input gating, and layout hints. With the `config-file`
//! feature it can be loaded from TOML or JSON:
//!
//! ```toml
//! # patternlock.toml
//! grid_size = 4
//! hit_factor = 0.5
//! aspect_ratio = "width_bias"
//!
//! [insets]
//! top = 16.0
//! right = 16.0
//! bottom = 16.0
//! left = 16.0
//! ```
//!
//! Missing fields take their defaults, which match the stock widget.

#[cfg(feature = "config-file")]
use std::path::Path;

use crate::error::ConfigError;
use crate::geometry::{AspectRatio, DEFAULT_HIT_FACTOR, Insets, check_hit_factor};
use crate::grid::{DEFAULT_GRID_SIZE, Grid, MAX_GRID_SIZE};

/// Configuration consumed by [`PatternTracker`](crate::tracker::PatternTracker).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrackerConfig {
    /// Dots per axis (default: 3).
    pub grid_size: u16,
    /// Fraction of a cell that counts as a hit along each axis (default: 0.6).
    pub hit_factor: f32,
    /// Whether pointer input is accepted (default: true).
    pub input_enabled: bool,
    /// How the measured view is squared up (default: square).
    pub aspect_ratio: AspectRatio,
    /// Padding between view bounds and the dot matrix (default: none).
    pub insets: Insets,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            hit_factor: DEFAULT_HIT_FACTOR,
            input_enabled: true,
            aspect_ratio: AspectRatio::Square,
            insets: Insets::default(),
        }
    }
}

impl TrackerConfig {
    /// Validate every field.
    ///
    /// Returns a list of problems; empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.grid_size == 0 || self.grid_size > MAX_GRID_SIZE {
            errors.push(format!(
                "grid_size must be in [1, {MAX_GRID_SIZE}], got {}",
                self.grid_size
            ));
        }
        if !(self.hit_factor > 0.0 && self.hit_factor <= 1.0) {
            errors.push(format!(
                "hit_factor must be in (0, 1], got {}",
                self.hit_factor
            ));
        }
        for (side, value) in self.inset_sides() {
            if !(value.is_finite() && value >= 0.0) {
                errors.push(format!("insets.{side} must be a finite value >= 0, got {value}"));
            }
        }

        errors
    }

    /// The configured grid.
    pub fn grid(&self) -> Result<Grid, ConfigError> {
        Grid::new(self.grid_size)
    }

    /// The configured hit factor, checked.
    pub fn checked_hit_factor(&self) -> Result<f32, ConfigError> {
        check_hit_factor(self.hit_factor)
    }

    /// The configured insets, checked to be finite and non-negative.
    pub fn checked_insets(&self) -> Result<Insets, ConfigError> {
        match self
            .inset_sides()
            .into_iter()
            .find(|(_, value)| !(value.is_finite() && *value >= 0.0))
        {
            Some((side, value)) => Err(ConfigError::InvalidInsets { side, value }),
            None => Ok(self.insets),
        }
    }

    fn inset_sides(&self) -> [(&'static str, f32); 4] {
        [
            ("top", self.insets.top),
            ("right", self.insets.right),
            ("bottom", self.insets.bottom),
            ("left", self.insets.left),
        ]
    }
}

#[cfg(feature = "config-file")]
impl TrackerConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigFileError> {
        let config: Self = toml::from_str(s)?;
        config.checked()
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigFileError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigFileError> {
        let config: Self = serde_json::from_str(s)?;
        config.checked()
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigFileError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Serialize to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigFileError> {
        Ok(toml::to_string(self)?)
    }

    fn checked(self) -> Result<Self, ConfigFileError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigFileError::Validation(errors))
        }
    }
}

/// Errors from loading a [`TrackerConfig`] file.
#[cfg(feature = "config-file")]
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
