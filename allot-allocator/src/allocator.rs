//! Allocator
//!
//! Converts datafile percentages into bucket boundaries over a fixed bucket
//! space. Every query is a pure function of the datafile and the bucket count.

use crate::allocation::{self, Allocation, BucketRange};
use crate::datafile::{Datafile, Experiment, Feature};
use crate::error::{AllocationError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Computes bucket-range allocations for one datafile snapshot
#[derive(Debug, Clone)]
pub struct Allocator {
    datafile: Arc<Datafile>,
    max_buckets: u32,
}

impl Allocator {
    /// Create an allocator over `max_buckets` buckets
    ///
    /// No validation happens here; use [`crate::AllocatorConfig`] when the
    /// bucket count comes from outside the program.
    ///
    /// # Examples
    ///
    /// ```
    /// use allot_allocator::{Allocator, Datafile, Feature};
    ///
    /// let datafile = Datafile::new().with_feature(Feature::new("f1", 25.0));
    /// let allocator = Allocator::new(datafile, 10_000);
    ///
    /// assert_eq!(allocator.feature_allocation("f1").unwrap().range_end, 2_500);
    /// ```
    pub fn new(datafile: impl Into<Arc<Datafile>>, max_buckets: u32) -> Self {
        let datafile = datafile.into();

        debug!(
            experiments = datafile.experiments.len(),
            features = datafile.features.len(),
            max_buckets,
            "Allocator created"
        );

        Self {
            datafile,
            max_buckets,
        }
    }

    /// Size of the bucket space
    pub fn max_buckets(&self) -> u32 {
        self.max_buckets
    }

    /// Shared datafile snapshot
    pub fn datafile(&self) -> &Arc<Datafile> {
        &self.datafile
    }

    /// Bucket boundary for `percentage` in this allocator's bucket space
    #[inline]
    pub fn range_end(&self, percentage: f64) -> i64 {
        allocation::range_end(percentage, self.max_buckets)
    }

    pub fn experiments(&self) -> &HashMap<String, Experiment> {
        &self.datafile.experiments
    }

    pub fn experiment(&self, id: &str) -> Option<&Experiment> {
        self.datafile.experiments.get(id)
    }

    pub fn features(&self) -> &HashMap<String, Feature> {
        &self.datafile.features
    }

    pub fn feature(&self, id: &str) -> Option<&Feature> {
        self.datafile.features.get(id)
    }

    /// Rollout range `[0, range_end)` for a feature, `None` if it does not exist
    pub fn feature_allocation(&self, id: &str) -> Option<Allocation> {
        let feature = self.feature(id)?;
        let range_end = self.range_end(feature.percentage);

        trace!(feature = id, percentage = feature.percentage, range_end, "Feature allocated");

        Some(Allocation::new(id, range_end))
    }

    /// Allocations for every feature, ordered by id
    pub fn feature_allocations(&self) -> Vec<Allocation> {
        let mut allocations: Vec<_> = self
            .features()
            .iter()
            .map(|(id, feature)| Allocation::new(id.as_str(), self.range_end(feature.percentage)))
            .collect();
        allocations.sort_by(|a, b| a.id.cmp(&b.id));
        allocations
    }

    /// Inclusion range `[0, range_end)` for an experiment as a whole
    ///
    /// Uses the experiment's own percentage; its variations play no part.
    pub fn experiment_allocation(&self, id: &str) -> Option<Allocation> {
        let experiment = self.experiment(id)?;
        let range_end = self.range_end(experiment.percentage);

        trace!(
            experiment = id,
            percentage = experiment.percentage,
            range_end,
            "Experiment allocated"
        );

        Some(Allocation::new(id, range_end))
    }

    /// One allocation per variation, in declaration order
    ///
    /// Each boundary is computed from the running sum of variation
    /// percentages, so consecutive boundaries never overlap and rounding can
    /// only shrink the total. Asking for an unknown experiment is an error,
    /// unlike the single-entity lookups.
    ///
    /// # Examples
    ///
    /// ```
    /// use allot_allocator::{Allocation, Allocator, Datafile, Experiment, Variation};
    ///
    /// let datafile = Datafile::new().with_experiment(
    ///     Experiment::new("e1", 50.0)
    ///         .with_variation(Variation::new("a", 30.0))
    ///         .with_variation(Variation::new("b", 20.0)),
    /// );
    /// let allocator = Allocator::new(datafile, 10_000);
    ///
    /// assert_eq!(
    ///     allocator.experiment_allocations("e1").unwrap(),
    ///     vec![Allocation::new("a", 3_000), Allocation::new("b", 5_000)],
    /// );
    /// assert!(allocator.experiment_allocations("missing").is_err());
    /// ```
    pub fn experiment_allocations(&self, id: &str) -> Result<Vec<Allocation>> {
        let experiment = self.experiment(id).ok_or_else(|| {
            debug!(experiment = id, "Variation allocations requested for unknown experiment");
            AllocationError::ExperimentNotFound(id.to_string())
        })?;

        let mut cumulative = 0.0;
        let allocations = experiment
            .variations
            .iter()
            .map(|variation| {
                cumulative += variation.percentage;
                Allocation::new(variation.id.as_str(), self.range_end(cumulative))
            })
            .collect::<Vec<_>>();

        trace!(experiment = id, variations = allocations.len(), "Variations allocated");

        Ok(allocations)
    }

    /// Variation spans `[start, end)`, in declaration order
    pub fn experiment_ranges(&self, id: &str) -> Result<Vec<BucketRange>> {
        self.experiment_allocations(id).map(allocation::to_ranges)
    }
}
