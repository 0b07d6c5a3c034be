//! Datafile Model
//!
//! Defines the configuration snapshot the allocator reads: experiments with
//! their variation splits, and features with their rollout percentage.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Configuration snapshot describing every experiment and feature
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Datafile {
    /// Experiments keyed by id
    #[serde(default)]
    pub experiments: HashMap<String, Experiment>,

    /// Features keyed by id
    #[serde(default)]
    pub features: HashMap<String, Feature>,
}

impl Datafile {
    /// Create an empty datafile
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an experiment, keyed by its id
    ///
    /// # Examples
    ///
    /// ```
    /// use allot_allocator::{Datafile, Experiment, Variation};
    ///
    /// let datafile = Datafile::new().with_experiment(
    ///     Experiment::new("checkout", 50.0)
    ///         .with_variation(Variation::new("control", 25.0))
    ///         .with_variation(Variation::new("treatment", 25.0)),
    /// );
    ///
    /// assert!(datafile.experiments.contains_key("checkout"));
    /// ```
    pub fn with_experiment(mut self, experiment: Experiment) -> Self {
        self.experiments.insert(experiment.id.clone(), experiment);
        self
    }

    /// Add a feature, keyed by its id
    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.insert(feature.id.clone(), feature);
        self
    }
}

/// Experiment with an overall traffic share split across variations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    /// Experiment id
    pub id: String,

    /// Share of all traffic included in the experiment (0-100)
    pub percentage: f64,

    /// Variations, in declaration order
    #[serde(default)]
    pub variations: Vec<Variation>,

    /// Targeting payload, stored but never interpreted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<Value>,
}

impl Experiment {
    pub fn new(id: impl Into<String>, percentage: f64) -> Self {
        Self {
            id: id.into(),
            percentage,
            variations: Vec::new(),
            audience: None,
        }
    }

    /// Append a variation; order of calls is the allocation order
    pub fn with_variation(mut self, variation: Variation) -> Self {
        self.variations.push(variation);
        self
    }

    pub fn with_audience(mut self, audience: Value) -> Self {
        self.audience = Some(audience);
        self
    }
}

/// One arm of an experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    /// Variation id, unique within its experiment
    pub id: String,

    /// Share of traffic (0-100) this variation receives
    pub percentage: f64,
}

impl Variation {
    pub fn new(id: impl Into<String>, percentage: f64) -> Self {
        Self {
            id: id.into(),
            percentage,
        }
    }
}

/// Feature rolled out to a percentage of traffic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Feature id
    pub id: String,

    /// Rollout percentage (0-100)
    pub percentage: f64,

    /// Feature payload, stored but never interpreted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    /// Targeting payload, stored but never interpreted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<Value>,
}

impl Feature {
    pub fn new(id: impl Into<String>, percentage: f64) -> Self {
        Self {
            id: id.into(),
            percentage,
            data: None,
            audience: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_audience(mut self, audience: Value) -> Self {
        self.audience = Some(audience);
        self
    }
}
