//! Allocation output types and the range primitive.

use serde::{Deserialize, Serialize};

/// Default size of the bucket space shared by SDKs reading the same datafile.
pub const DEFAULT_MAX_BUCKETS: u32 = 10_000;

/// Computed upper boundary of the bucket range assigned to `id`.
///
/// For a feature or an experiment the range is `[0, range_end)`. For a
/// variation it is `[previous range_end, range_end)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub id: String,
    pub range_end: i64,
}

impl Allocation {
    pub fn new(id: impl Into<String>, range_end: i64) -> Self {
        Self {
            id: id.into(),
            range_end,
        }
    }
}

/// Half-open bucket span `[start, end)` owned by one variation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BucketRange {
    pub id: String,
    pub start: i64,
    pub end: i64,
}

impl BucketRange {
    /// Number of buckets in the span, zero when the span is empty or inverted.
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start).max(0) as u64
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Map a percentage onto a bucket boundary: `floor(percentage * max_buckets / 100)`.
///
/// The multiply happens before the divide so every SDK evaluating the same
/// datafile lands on identical boundaries. Out-of-range input is not
/// rejected; NaN saturates to 0 and infinities to the `i64` bounds.
///
/// # Examples
///
/// ```
/// use allot_allocator::range_end;
///
/// assert_eq!(range_end(25.0, 10_000), 2_500);
/// assert_eq!(range_end(50.0, 3), 1);
/// ```
#[inline]
pub fn range_end(percentage: f64, max_buckets: u32) -> i64 {
    ((percentage * f64::from(max_buckets)) / 100.0).floor() as i64
}

/// Pair each variation allocation with the boundary before it.
pub(crate) fn to_ranges(allocations: Vec<Allocation>) -> Vec<BucketRange> {
    let mut start = 0;
    allocations
        .into_iter()
        .map(|Allocation { id, range_end }| {
            let range = BucketRange {
                id,
                start,
                end: range_end,
            };
            start = range_end;
            range
        })
        .collect()
}
