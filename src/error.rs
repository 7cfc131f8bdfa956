//! Error type shared by configuration, grid construction and rendering

use std::fmt;

/// Everything that can be rejected at a construction or configuration boundary.
///
/// Once a maze is built, stepping, running and rendering cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub enum MazeError {
    /// Width or height is zero
    DegenerateGrid {
        /// Requested width in cells
        width: u32,
        /// Requested height in cells
        height: u32,
    },

    /// Backtrack policy name is not one of the supported policies
    UnknownPolicy {
        /// The name that was given
        name: String,
    },

    /// Grid topology name is not one of the supported topologies
    UnknownTopology {
        /// The name that was given
        name: String,
    },

    /// A numeric parameter is out of its valid range
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: &'static str,
    },

    /// A colour string could not be parsed
    InvalidColor {
        /// The string that was given
        value: String,
    },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateGrid { width, height } => {
                write!(f, "Grid must be non-empty, got {width}x{height}")
            }
            Self::UnknownPolicy { name } => {
                write!(
                    f,
                    "Unknown backtrack policy '{name}' (expected oldest, newest or random)"
                )
            }
            Self::UnknownTopology { name } => {
                write!(f, "Unknown topology '{name}' (expected square or hex)")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidColor { value } => {
                write!(f, "Invalid color '{value}' (expected #rgb or #rrggbb)")
            }
        }
    }
}

impl std::error::Error for MazeError {}

/// Convenience type alias for fallible maze operations
pub type Result<T> = std::result::Result<T, MazeError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &'static str,
) -> MazeError {
    MazeError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason,
    }
}

/// Check that `value` is a probability in `[0, 1]`.
pub fn check_probability(parameter: &'static str, value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(invalid_parameter(
            parameter,
            &value,
            "must be a probability between 0 and 1",
        ))
    }
}
