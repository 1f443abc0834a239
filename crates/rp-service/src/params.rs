//! Request parameters shared by the stepped operations.

use serde::{Deserialize, Serialize};

use rp_status::{LonLatFilter, StepQuery};

use crate::{ServiceError, ServiceResult};

fn default_interval() -> i64 {
    1
}

/// Steps `begin, begin + interval, …` below `end`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepRange {
    pub begin:    i64,
    /// Exclusive.
    pub end:      i64,
    #[serde(default = "default_interval")]
    pub interval: i64,
}

impl StepRange {
    pub fn new(begin: i64, end: i64) -> Self {
        Self { begin, end, interval: default_interval() }
    }

    pub fn with_interval(mut self, interval: i64) -> Self {
        self.interval = interval;
        self
    }

    pub fn validate(&self) -> ServiceResult<()> {
        if self.begin >= self.end {
            return Err(ServiceError::InvalidParameter(format!(
                "begin ({}) must be less than end ({})",
                self.begin, self.end
            )));
        }
        if self.interval < 1 {
            return Err(ServiceError::InvalidParameter(format!(
                "interval must be at least 1, got {}",
                self.interval
            )));
        }
        Ok(())
    }

    /// Validated query over a table recorded at every step.
    pub fn step_query(&self) -> ServiceResult<StepQuery> {
        self.validate()?;
        Ok(StepQuery::new(self.begin, self.end, self.interval))
    }
}

/// WGS84 filter box; rows with `lat1 ≤ lat < lat2` and `lng1 ≤ lng < lng2`
/// are kept.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AreaParams {
    pub lat1: f64,
    pub lat2: f64,
    pub lng1: f64,
    pub lng2: f64,
}

impl AreaParams {
    pub fn filter(&self) -> ServiceResult<LonLatFilter> {
        if ![self.lat1, self.lat2, self.lng1, self.lng2].iter().all(|v| v.is_finite()) {
            return Err(ServiceError::InvalidParameter(format!("non-finite filter box {self:?}")));
        }
        Ok(LonLatFilter::new(self.lng1, self.lat1, self.lng2, self.lat2))
    }
}
