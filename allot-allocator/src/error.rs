//! Error types for allocation queries and datafile loading.

use thiserror::Error;

/// Result type for allocation operations.
pub type Result<T> = std::result::Result<T, AllocationError>;

/// Allocation errors.
#[derive(Debug, Error)]
pub enum AllocationError {
    /// Variation allocations were requested for an experiment the datafile
    /// does not contain.
    #[error("Experiment not found: {0}")]
    ExperimentNotFound(String),

    /// Invalid allocator configuration
    #[error("Invalid allocator configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read a datafile
    #[error("Failed to load datafile: {0}")]
    Load(String),

    /// Failed to decode a datafile
    #[error("Failed to parse datafile: {0}")]
    Parse(String),
}

impl AllocationError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a new load error
    pub fn load<S: Into<String>>(msg: S) -> Self {
        Self::Load(msg.into())
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Self::Parse(msg.into())
    }
}
