//! Drawing settings for the truss scene.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Layout constants used when building a [`Scene`](crate::Scene).
///
/// Every field is optional in the TOML file; missing fields take the
/// defaults below.
///
/// ```text
/// margin = 50.0
/// grid_spacing = 10.0
/// node_radius = 7.0
/// label_offset = [-15.0, 15.0]
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Padding added on every side of the node bounding box.
    pub margin: f64,
    /// Distance between neighbouring grid lines.
    pub grid_spacing: f64,
    /// Radius of the marker drawn at each node.
    pub node_radius: f64,
    /// Offset from a node centre to its label anchor.
    pub label_offset: [f64; 2],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            margin: 50.0,
            grid_spacing: 10.0,
            node_radius: 7.0,
            label_offset: [-15.0, 15.0],
        }
    }
}

impl SceneConfig {
    /// Parse and validate a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and the validation
    /// errors described on [`SceneConfig::validate`].
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, otherwise
    /// the errors of [`SceneConfig::from_toml`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Check that the settings describe a drawable scene.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositive`] when `grid_spacing` or
    /// `node_radius` is not strictly positive and
    /// [`ConfigError::NegativeMargin`] when `margin` is negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_spacing.is_nan() || self.grid_spacing <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "grid_spacing",
                value: self.grid_spacing,
            });
        }
        if self.node_radius.is_nan() || self.node_radius <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "node_radius",
                value: self.node_radius,
            });
        }
        if self.margin.is_nan() || self.margin < 0.0 {
            return Err(ConfigError::NegativeMargin(self.margin));
        }
        Ok(())
    }
}
