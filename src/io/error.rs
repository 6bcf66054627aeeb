//! Error types for generator construction, tile loading and output
//!
//! A contradiction or an exhausted propagation budget is an ordinary outcome
//! of a randomized search and is reported through
//! [`RunState::Failed`](crate::algorithm::executor::RunState) instead. The
//! only place it becomes an error is at the CLI boundary, where a failed run
//! maps to [`AlgorithmError::GenerationFailed`].

use crate::algorithm::executor::FailureReason;
use crate::spatial::grid::Position;
use std::fmt;
use std::path::PathBuf;

/// Main error type for all algorithm operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Algorithm parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Tile set is empty, has a bad weight or a malformed socket list
    InvalidTileSet {
        /// Description of what's wrong with the tile set
        reason: String,
    },

    /// Tile set file is not valid JSON for the expected schema
    TileSetParse {
        /// Path of the tile set file
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Caller broke an engine precondition
    ///
    /// Raised for collapsing a cell that is already collapsed or addressing
    /// a position outside the grid. Indicates a bug in the caller rather
    /// than an unlucky seed.
    ContractViolation {
        /// Operation that was attempted
        operation: &'static str,
        /// Cell the operation targeted
        position: Position,
        /// What precondition failed
        reason: &'static str,
    },

    /// Generation ended in a contradiction or hit the propagation limit
    GenerationFailed {
        /// Why the run stopped
        reason: FailureReason,
    },

    /// Failed to serialize a report
    Serialization {
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidTileSet { reason } => write!(f, "Invalid tile set: {reason}"),
            Self::TileSetParse { path, source } => {
                write!(
                    f,
                    "Failed to parse tile set '{}': {source}",
                    path.display()
                )
            }
            Self::ContractViolation {
                operation,
                position,
                reason,
            } => {
                write!(f, "Contract violation in {operation} at {position}: {reason}")
            }
            Self::GenerationFailed { reason } => {
                write!(f, "Failed to generate pattern: {reason}")
            }
            Self::Serialization { source } => write!(f, "Failed to serialize output: {source}"),
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TileSetParse { source, .. } | Self::Serialization { source } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for algorithm results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for AlgorithmError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization { source: err }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
