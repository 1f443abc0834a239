//! Per-step congestion statistics.
//!
//! Samples are grouped by step with no assumption of order or contiguity.
//! Each group yields the mean level over **all** of its samples and a
//! histogram over levels 2..=5 only:
//!
//! ```text
//! step 1: levels 2 2 4   → mean 8/3, counts [2, 0, 1, 0]
//! step 2: level  6       → mean 6,   counts [0, 0, 0, 0]
//! ```
//!
//! Steps are aggregated as given, negative ones included; output is sorted
//! ascending by step.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::RoadStatus;

/// Lowest level counted in the histogram.
pub const FIRST_COUNTED_LEVEL: i32 = 2;
/// Number of histogram buckets: levels 2, 3, 4 and 5.
pub const LEVEL_BUCKETS: usize = 4;

/// Summary of all road samples at one step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CongestionStat {
    pub step:                    i64,
    pub mean_congestion_level:   f64,
    /// Sample counts for levels 2, 3, 4, 5 in that order.
    pub congestion_level_counts: [u32; LEVEL_BUCKETS],
}

#[derive(Default)]
struct StepAccumulator {
    sum:    i64,
    n:      u32,
    counts: [u32; LEVEL_BUCKETS],
}

impl StepAccumulator {
    fn add(&mut self, level: i32) {
        self.sum += i64::from(level);
        self.n += 1;
        if let Some(bucket) = bucket_of(level) {
            self.counts[bucket] += 1;
        }
    }

    fn mean(&self) -> f64 {
        if self.n == 0 { 0.0 } else { self.sum as f64 / f64::from(self.n) }
    }
}

#[inline]
fn bucket_of(level: i32) -> Option<usize> {
    let offset = usize::try_from(level - FIRST_COUNTED_LEVEL).ok()?;
    (offset < LEVEL_BUCKETS).then_some(offset)
}

/// One [`CongestionStat`] per distinct step in `samples`, sorted by step.
pub fn aggregate_congestion<'a, I>(samples: I) -> Vec<CongestionStat>
where
    I: IntoIterator<Item = &'a RoadStatus>,
{
    let mut by_step: FxHashMap<i64, StepAccumulator> = FxHashMap::default();
    for sample in samples {
        by_step.entry(sample.step).or_default().add(sample.level);
    }

    let mut stats: Vec<CongestionStat> = by_step
        .into_iter()
        .map(|(step, acc)| CongestionStat {
            step,
            mean_congestion_level:   acc.mean(),
            congestion_level_counts: acc.counts,
        })
        .collect();
    stats.sort_unstable_by_key(|s| s.step);
    stats
}
