// Allot - bucket-range allocation for feature flags and experiments
//
// Computes the bucket boundaries a bucketing function compares hashed units
// against. The crate is a facade over the workspace members.

// Re-export the allocator
pub use allot_allocator::*;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Allocation, AllocationError, Allocator, AllocatorConfig, BucketRange, Datafile,
        DatafileLoader, Experiment, Feature, FileFormat, Variation,
    };
}
