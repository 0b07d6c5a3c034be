//! Bucket-range allocation for feature rollouts and experiments
//!
//! Turns the percentages in a datafile into boundaries over a fixed bucket
//! space. A separate bucketing step hashes a unit (a user id, a device id)
//! into `[0, max_buckets)` and compares it against these boundaries; this
//! crate only computes the boundaries, so every SDK reading the same datafile
//! with the same bucket count agrees on them.
//!
//! # Features
//!
//! - **Feature rollouts** - `[0, range_end)` for a feature's percentage
//! - **Experiment inclusion** - `[0, range_end)` for an experiment's traffic share
//! - **Variation splits** - contiguous, non-overlapping ranges built from
//!   cumulative percentages in declaration order
//! - **Datafile loading** - JSON or TOML, missing sections default to empty
//!
//! # Quick Start
//!
//! ```
//! use allot_allocator::*;
//!
//! let datafile = Datafile::new()
//!     .with_feature(Feature::new("f1", 25.0))
//!     .with_experiment(
//!         Experiment::new("e1", 50.0)
//!             .with_variation(Variation::new("a", 30.0))
//!             .with_variation(Variation::new("b", 20.0)),
//!     );
//!
//! let allocator = Allocator::new(datafile, 10_000);
//!
//! assert_eq!(allocator.feature_allocation("f1"), Some(Allocation::new("f1", 2_500)));
//! assert_eq!(allocator.experiment_allocation("e1"), Some(Allocation::new("e1", 5_000)));
//! assert!(allocator.feature_allocation("unknown").is_none());
//! ```
//!
//! # Loading a Datafile
//!
//! ```
//! use allot_allocator::*;
//!
//! let datafile = DatafileLoader::new(FileFormat::Json)
//!     .parse(r#"{ "features": { "beta": { "id": "beta", "percentage": 12.5 } } }"#)?;
//!
//! let allocator = AllocatorConfig::builder()
//!     .max_buckets(1_000)
//!     .datafile(datafile)
//!     .build()?;
//!
//! assert_eq!(allocator.feature_allocation("beta").unwrap().range_end, 125);
//! # Ok::<(), AllocationError>(())
//! ```
//!
//! # Variation Ranges
//!
//! ```
//! use allot_allocator::*;
//!
//! let datafile = Datafile::new().with_experiment(
//!     Experiment::new("button-color", 100.0)
//!         .with_variation(Variation::new("red", 50.0))
//!         .with_variation(Variation::new("blue", 50.0)),
//! );
//! let allocator = Allocator::new(datafile, 100);
//!
//! let ranges = allocator.experiment_ranges("button-color")?;
//! assert_eq!((ranges[1].start, ranges[1].end), (50, 100));
//! # Ok::<(), AllocationError>(())
//! ```

pub mod allocation;
pub mod allocator;
pub mod config;
pub mod datafile;
pub mod error;
pub mod loader;

pub use allocation::{Allocation, BucketRange, DEFAULT_MAX_BUCKETS, range_end};
pub use allocator::Allocator;
pub use config::{AllocatorBuilder, AllocatorConfig, MAX_BUCKETS_ENV};
pub use datafile::{Datafile, Experiment, Feature, Variation};
pub use error::{AllocationError, Result};
pub use loader::{DatafileLoader, FileFormat};
