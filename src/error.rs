//! Error types and exit codes for routenet
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, unknown representation)
//! - 3: Data error (malformed graph file, unknown vertex, disconnected graph)
//!
//! Negative analysis outcomes such as "no path exists" are never errors; they are
//! reported as values by the respective algorithm.

use std::fmt::Display;

use thiserror::Error;

use crate::node::NumNodes;

/// Exit codes of the `routenet` binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - malformed input or structural violation (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur while building or analysing a route network
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("unknown graph representation: {0} (expected: list or matrix)")]
    UnknownRepresentation(String),

    #[error("vertex not found: {0}")]
    VertexNotFound(String),

    #[error("adjacency matrix is full (capacity {capacity})")]
    CapacityExceeded { capacity: NumNodes },

    #[error("graph is not connected: only {reached} of {total} vertices reachable")]
    Disconnected { reached: NumNodes, total: NumNodes },

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, GraphError>;

impl GraphError {
    /// Create an error for a vertex value that is not part of the graph
    pub fn vertex_not_found(value: impl Display) -> Self {
        GraphError::VertexNotFound(value.to_string())
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl Display) -> Self {
        GraphError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            GraphError::UnknownRepresentation(_) | GraphError::InvalidValue { .. } => {
                ExitCode::Usage
            }

            GraphError::VertexNotFound(_)
            | GraphError::CapacityExceeded { .. }
            | GraphError::Disconnected { .. } => ExitCode::Data,

            GraphError::Io(err) if err.kind() == std::io::ErrorKind::InvalidData => ExitCode::Data,

            GraphError::Io(_) | GraphError::Config(_) => ExitCode::Failure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        assert_eq!(
            GraphError::UnknownRepresentation("csr".into()).exit_code(),
            ExitCode::Usage
        );
        assert_eq!(GraphError::vertex_not_found(7).exit_code(), ExitCode::Data);
        assert_eq!(
            GraphError::Disconnected {
                reached: 1,
                total: 3
            }
            .exit_code(),
            ExitCode::Data
        );
        assert_eq!(
            GraphError::from(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "bad line"
            ))
            .exit_code(),
            ExitCode::Data
        );
        assert_eq!(
            GraphError::from(std::io::Error::from(std::io::ErrorKind::NotFound)).exit_code(),
            ExitCode::Failure
        );
        assert_eq!(i32::from(ExitCode::Usage), 2);
    }

    #[test]
    fn messages() {
        assert_eq!(
            GraphError::vertex_not_found("Hub A").to_string(),
            "vertex not found: Hub A"
        );
        assert_eq!(
            GraphError::invalid_value("density threshold", 1.5).to_string(),
            "invalid density threshold: 1.5"
        );
    }
}
