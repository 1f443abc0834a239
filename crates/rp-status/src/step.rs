//! The stepped-fetch contract.

use rp_core::LonLat;

use crate::{StatusError, StatusResult, StepRecord};

/// WGS84 filter box, half-open: `min ≤ v < max` on both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LonLatFilter {
    pub min_lng: f64,
    pub min_lat: f64,
    pub max_lng: f64,
    pub max_lat: f64,
}

impl LonLatFilter {
    pub fn new(min_lng: f64, min_lat: f64, max_lng: f64, max_lat: f64) -> Self {
        Self { min_lng, min_lat, max_lng, max_lat }
    }

    #[inline]
    pub fn contains(&self, p: LonLat) -> bool {
        p.lng >= self.min_lng && p.lng < self.max_lng && p.lat >= self.min_lat && p.lat < self.max_lat
    }
}

/// Which steps of a stepped table to return.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepQuery {
    /// First requested step.
    pub begin:        i64,
    /// Exclusive upper bound on requested steps.
    pub end:          i64,
    /// Recording interval of the table.
    pub interval:     i64,
    /// Step of the first recording.
    pub offset:       i64,
    /// Distance between requested steps.
    pub sub_interval: i64,
    pub area:         Option<LonLatFilter>,
}

impl StepQuery {
    /// Every `sub_interval`-th step of `[begin, end)` from a table recorded at
    /// every step.
    pub fn new(begin: i64, end: i64, sub_interval: i64) -> Self {
        Self { begin, end, interval: 1, offset: 0, sub_interval, area: None }
    }

    pub fn recorded_every(mut self, interval: i64) -> Self {
        self.interval = interval;
        self
    }

    pub fn within(mut self, area: LonLatFilter) -> Self {
        self.area = Some(area);
        self
    }

    pub fn validate(&self) -> StatusResult<()> {
        if self.begin >= self.end {
            return Err(StatusError::InvalidRange(format!(
                "begin {} must be below end {}",
                self.begin, self.end
            )));
        }
        if self.interval < 1 || self.sub_interval < 1 {
            return Err(StatusError::InvalidRange(format!(
                "intervals must be positive (interval {}, sub-interval {})",
                self.interval, self.sub_interval
            )));
        }
        Ok(())
    }

    /// `begin, begin + sub_interval, …` below `end`.  Empty when the
    /// query is invalid.
    pub fn requested_steps(&self) -> impl Iterator<Item = i64> + '_ {
        let stride = usize::try_from(self.sub_interval.max(1)).unwrap_or(usize::MAX);
        (self.begin..self.end).step_by(stride)
    }

    /// The latest recorded step at or before `step`.
    #[inline]
    pub fn recorded_step(&self, step: i64) -> i64 {
        let interval = self.interval.max(1);
        self.offset + (step - self.offset).div_euclid(interval) * interval
    }

    /// Whether a row passes the area filter.
    #[inline]
    pub fn admits<T: StepRecord>(&self, row: &T) -> bool {
        match (self.area, row.position()) {
            (Some(area), Some(p)) => area.contains(p),
            _ => true,
        }
    }
}

/// Read access to stepped replay tables holding rows of type `T`.
///
/// Rows come back grouped by requested step in ascending order, each row
/// relabelled to the step it was requested for.  A table that does not exist
/// yields an empty result, not an error.
pub trait StepSource<T: StepRecord>: Send + Sync {
    fn query_with_step(&self, table: &str, query: &StepQuery) -> StatusResult<Vec<T>>;
}
