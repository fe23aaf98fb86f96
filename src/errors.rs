//! Error types produced while importing, editing or configuring trusses.

use std::path::PathBuf;

use thiserror::Error;

/// Reason a single input line could not be turned into model data.
///
/// Parse errors never abort an import; the importer records them against the
/// offending line and moves on.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseError {
    /// Returned when a line has fewer fields than its keyword requires.
    #[error("expected at least {expected} fields but found {found}")]
    MissingFields {
        /// Minimum number of fields, including the keyword itself.
        expected: usize,
        /// Number of fields present on the line.
        found: usize,
    },
    /// Returned when a numeric field is not a decimal number.
    #[error("field `{field}` is not a number: {value:?}")]
    InvalidNumber {
        /// Name of the field being parsed.
        field: &'static str,
        /// Raw text that failed to parse.
        value: String,
    },
}

/// Error returned when editing a [`TrussModel`](crate::TrussModel).
///
/// # Examples
///
/// ```
/// use trussview::{point, ModelEditError, Node, TrussModel};
///
/// let mut model = TrussModel::new();
/// model.add_node(Node::new("A", point(0.0, 0.0))).expect("first node accepted");
/// let error = model
///     .add_node(Node::new("A", point(1.0, 0.0)))
///     .expect_err("duplicate rejected");
/// assert_eq!(error, ModelEditError::DuplicateNode("A".to_owned()));
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ModelEditError {
    /// Returned when a node with the same name already exists.
    #[error("node `{0}` already exists in this truss")]
    DuplicateNode(String),
    /// Returned when a link with the same name already exists.
    #[error("link `{0}` already exists in this truss")]
    DuplicateLink(String),
    /// Returned when a node name cannot be resolved.
    #[error("node `{0}` does not exist in this truss")]
    UnknownNode(String),
}

/// Error returned when loading or validating a [`SceneConfig`](crate::SceneConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when the configuration file cannot be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Location of the file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when the configuration is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// Returned when a spacing or size that must be positive is not.
    #[error("`{field}` must be positive (received {value})")]
    NonPositive {
        /// Name of the rejected setting.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Returned when the padding around the truss is negative.
    #[error("`margin` must not be negative (received {0})")]
    NegativeMargin(f64),
}
