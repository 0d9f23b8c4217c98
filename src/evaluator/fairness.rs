use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Points difference under which a trade is labeled fair by default
pub const DEFAULT_FAIRNESS_POINTS: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("fairness threshold must be a non-negative number, got {0}")]
pub struct InvalidThreshold(pub f64);

/// Maximum allowed absolute differential for a trade to count as fair.
///
/// `Absolute` is a fixed number of points. `Relative` is a fraction of the
/// larger side's total, with the total floored at 1 so two empty sides still
/// compare as fair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FairnessThreshold {
    Absolute(f64),
    Relative(f64),
}

impl Default for FairnessThreshold {
    fn default() -> Self {
        FairnessThreshold::Absolute(DEFAULT_FAIRNESS_POINTS)
    }
}

impl FairnessThreshold {
    pub fn limit(&self, total_a: f64, total_b: f64) -> f64 {
        match *self {
            FairnessThreshold::Absolute(points) => points,
            FairnessThreshold::Relative(fraction) => fraction * total_a.max(total_b).max(1.0),
        }
    }

    pub fn is_fair(&self, total_a: f64, total_b: f64) -> bool {
        (total_a - total_b).abs() <= self.limit(total_a, total_b)
    }

    pub fn validate(&self) -> Result<(), InvalidThreshold> {
        let value = match *self {
            FairnessThreshold::Absolute(v) | FairnessThreshold::Relative(v) => v,
        };
        if !value.is_finite() || value < 0.0 {
            return Err(InvalidThreshold(value));
        }
        Ok(())
    }
}
