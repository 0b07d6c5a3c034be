//! Allocator configuration and builder

use crate::allocation::DEFAULT_MAX_BUCKETS;
use crate::allocator::Allocator;
use crate::datafile::Datafile;
use crate::error::{AllocationError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::sync::Arc;
use tracing::{debug, warn};

/// Environment variable overriding the bucket-space size.
pub const MAX_BUCKETS_ENV: &str = "ALLOT_MAX_BUCKETS";

/// Configuration for the allocator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Total number of buckets ranges are computed over
    pub max_buckets: u32,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            max_buckets: DEFAULT_MAX_BUCKETS,
        }
    }
}

impl AllocatorConfig {
    /// Create a new configuration builder
    pub fn builder() -> AllocatorBuilder {
        AllocatorBuilder::new()
    }

    /// Create config from environment variables.
    ///
    /// Values that do not parse are ignored and the default is kept.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = env::var(MAX_BUCKETS_ENV) {
            match raw.trim().parse::<u32>() {
                Ok(max_buckets) => config.max_buckets = max_buckets,
                Err(e) => warn!(
                    value = %raw,
                    error = %e,
                    "Ignoring invalid {}", MAX_BUCKETS_ENV
                ),
            }
        }

        config
    }

    /// Check the configuration can back an allocator
    pub fn validate(&self) -> Result<()> {
        if self.max_buckets == 0 {
            return Err(AllocationError::config("max_buckets must be greater than zero"));
        }
        Ok(())
    }
}

/// Builder for creating an Allocator
#[derive(Debug, Default)]
pub struct AllocatorBuilder {
    config: AllocatorConfig,
    datafile: Option<Arc<Datafile>>,
}

impl AllocatorBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn config(mut self, config: AllocatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the bucket-space size
    pub fn max_buckets(mut self, max_buckets: u32) -> Self {
        self.config.max_buckets = max_buckets;
        self
    }

    /// Set the datafile snapshot
    pub fn datafile(mut self, datafile: impl Into<Arc<Datafile>>) -> Self {
        self.datafile = Some(datafile.into());
        self
    }

    /// Validate the configuration and build the allocator
    ///
    /// Without a datafile the allocator answers every lookup with `None`.
    pub fn build(self) -> Result<Allocator> {
        self.config.validate()?;

        let datafile = self.datafile.unwrap_or_default();
        debug!(max_buckets = self.config.max_buckets, "Building allocator");

        Ok(Allocator::new(datafile, self.config.max_buckets))
    }
}
