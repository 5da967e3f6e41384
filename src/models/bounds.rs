use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::optimizer::constants::OPTIMIZER_MAX;

/// Category of a recoverable problem reported by a mutating operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningKind {
    /// A negative, non-finite or oversized value was supplied; the prior value was kept.
    InvalidBoundary,
    /// One side of a min/max pair crossed the other; the other side was moved to match.
    BoundReconciled,
    /// An objective selector outside 0..=4; the prior mode was kept.
    UnknownObjectiveMode,
    /// A food or ingredient with this name already exists; the new definition was dropped.
    DuplicateEntity,
    /// A food name that is not in the catalog.
    UnknownFood,
}

/// A recoverable problem reported by a mutating operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// Build a warning and emit it through `tracing`.
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(?kind, "{}", message);
        Self { kind, message }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Upper side of a bound pair.
///
/// `Unbounded` is translated to a finite surrogate only when the linear
/// program is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum UpperBound {
    Finite(f64),
    Unbounded,
}

impl UpperBound {
    pub fn finite(self) -> Option<f64> {
        match self {
            UpperBound::Finite(v) => Some(v),
            UpperBound::Unbounded => None,
        }
    }

    /// Finite value, or `surrogate` when unbounded.
    pub fn or_surrogate(self, surrogate: f64) -> f64 {
        self.finite().unwrap_or(surrogate)
    }

    fn is_below(self, value: f64) -> bool {
        matches!(self, UpperBound::Finite(max) if max < value)
    }
}

impl From<f64> for UpperBound {
    fn from(value: f64) -> Self {
        UpperBound::Finite(value)
    }
}

impl From<Option<f64>> for UpperBound {
    fn from(value: Option<f64>) -> Self {
        value.map_or(UpperBound::Unbounded, UpperBound::Finite)
    }
}

/// A `minimum <= maximum` pair kept consistent by the elastic policy.
///
/// Moving one side past the other drags the other side along instead of
/// failing. Negative values are rejected and leave the pair unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundPair {
    minimum: f64,
    maximum: UpperBound,
}

impl Default for BoundPair {
    fn default() -> Self {
        Self {
            minimum: 0.0,
            maximum: UpperBound::Unbounded,
        }
    }
}

impl BoundPair {
    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    pub fn maximum(&self) -> UpperBound {
        self.maximum
    }

    /// Set the lower side. `subject` names the pair in warning messages.
    ///
    /// Minimums above [`OPTIMIZER_MAX`] are rejected: an unbounded maximum
    /// becomes that surrogate at the solver, so they could never be met.
    pub fn set_minimum(&mut self, value: f64, subject: &str) -> Option<Warning> {
        if let Some(rejected) = reject_nonphysical(value, subject, "minimum") {
            return Some(rejected);
        }
        if value > OPTIMIZER_MAX {
            return Some(Warning::new(
                WarningKind::InvalidBoundary,
                format!(
                    "{} minimum {} exceeds the largest supported amount {}; ignoring",
                    subject, value, OPTIMIZER_MAX
                ),
            ));
        }

        self.minimum = value;
        if self.maximum.is_below(value) {
            self.maximum = UpperBound::Finite(value);
            return Some(Warning::new(
                WarningKind::BoundReconciled,
                format!("{} minimum {} exceeds maximum; maximum set to match", subject, value),
            ));
        }
        None
    }

    /// Set the upper side. `subject` names the pair in warning messages.
    pub fn set_maximum(&mut self, value: impl Into<UpperBound>, subject: &str) -> Option<Warning> {
        let value = value.into();
        let UpperBound::Finite(max) = value else {
            self.maximum = value;
            return None;
        };

        if let Some(rejected) = reject_nonphysical(max, subject, "maximum") {
            return Some(rejected);
        }

        self.maximum = value;
        if max < self.minimum {
            self.minimum = max;
            return Some(Warning::new(
                WarningKind::BoundReconciled,
                format!("{} maximum {} undercuts minimum; minimum set to match", subject, max),
            ));
        }
        None
    }
}

/// Reject negative or non-finite values for a physical quantity.
pub(crate) fn reject_nonphysical(value: f64, subject: &str, field: &str) -> Option<Warning> {
    if value.is_finite() && value >= 0.0 {
        return None;
    }
    Some(Warning::new(
        WarningKind::InvalidBoundary,
        format!("nonphysical {} {} {}; ignoring", subject, field, value),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pair() {
        let pair = BoundPair::default();
        assert_eq!(pair.minimum(), 0.0);
        assert_eq!(pair.maximum(), UpperBound::Unbounded);
    }

    #[test]
    fn test_minimum_above_maximum_raises_maximum() {
        let mut pair = BoundPair::default();
        assert!(pair.set_maximum(50.0, "test").is_none());

        let warning = pair.set_minimum(80.0, "test").unwrap();
        assert_eq!(warning.kind, WarningKind::BoundReconciled);
        assert_eq!(pair.minimum(), 80.0);
        assert_eq!(pair.maximum(), UpperBound::Finite(80.0));
    }

    #[test]
    fn test_maximum_below_minimum_lowers_minimum() {
        let mut pair = BoundPair::default();
        assert!(pair.set_minimum(30.0, "test").is_none());

        let warning = pair.set_maximum(10.0, "test").unwrap();
        assert_eq!(warning.kind, WarningKind::BoundReconciled);
        assert_eq!(pair.minimum(), 10.0);
        assert_eq!(pair.maximum(), UpperBound::Finite(10.0));
    }

    #[test]
    fn test_negative_values_rejected() {
        let mut pair = BoundPair::default();
        pair.set_minimum(5.0, "test");
        pair.set_maximum(20.0, "test");

        let warning = pair.set_minimum(-1.0, "test").unwrap();
        assert_eq!(warning.kind, WarningKind::InvalidBoundary);
        let warning = pair.set_maximum(-1.0, "test").unwrap();
        assert_eq!(warning.kind, WarningKind::InvalidBoundary);

        assert_eq!(pair.minimum(), 5.0);
        assert_eq!(pair.maximum(), UpperBound::Finite(20.0));
    }

    #[test]
    fn test_nan_rejected() {
        let mut pair = BoundPair::default();
        let warning = pair.set_minimum(f64::NAN, "test").unwrap();
        assert_eq!(warning.kind, WarningKind::InvalidBoundary);
        assert_eq!(pair.minimum(), 0.0);
    }

    #[test]
    fn test_unbounded_maximum_never_reconciles() {
        let mut pair = BoundPair::default();
        pair.set_maximum(10.0, "test");
        assert!(pair.set_maximum(UpperBound::Unbounded, "test").is_none());
        assert!(pair.set_minimum(5e7, "test").is_none());
        assert_eq!(pair.maximum(), UpperBound::Unbounded);
    }

    #[test]
    fn test_minimum_above_surrogate_rejected() {
        let mut pair = BoundPair::default();
        pair.set_minimum(40.0, "test");

        let warning = pair.set_minimum(OPTIMIZER_MAX * 10.0, "test").unwrap();
        assert_eq!(warning.kind, WarningKind::InvalidBoundary);
        assert_eq!(pair.minimum(), 40.0);
        assert_eq!(pair.maximum(), UpperBound::Unbounded);

        assert!(pair.set_minimum(OPTIMIZER_MAX, "test").is_none());
        assert_eq!(pair.minimum(), OPTIMIZER_MAX);
    }

    #[test]
    fn test_equal_sides_are_not_reconciled() {
        let mut pair = BoundPair::default();
        assert!(pair.set_maximum(900.0, "calories").is_none());
        assert!(pair.set_minimum(900.0, "calories").is_none());
        assert_eq!(pair.minimum(), 900.0);
    }

    #[test]
    fn test_upper_bound_conversions() {
        assert_eq!(UpperBound::from(3.0), UpperBound::Finite(3.0));
        assert_eq!(UpperBound::from(None), UpperBound::Unbounded);
        assert_eq!(UpperBound::Unbounded.or_surrogate(1e8), 1e8);
        assert_eq!(UpperBound::Finite(2.0).or_surrogate(1e8), 2.0);
    }
}
