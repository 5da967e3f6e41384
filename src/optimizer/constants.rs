/// Finite stand-in for "no upper bound" at the solver boundary.
///
/// Linear solvers are unstable with unbounded variables; this must never bind
/// for any physical meal.
pub const OPTIMIZER_MAX: f64 = 1e8;

/// Decimal places used when reporting totals.
pub const DEFAULT_ROUNDING_DIGITS: u32 = 2;

/// Largest accepted rounding precision.
pub const MAX_ROUNDING_DIGITS: u32 = 10;

/// Number of objective modes (0 = none .. 4 = max-min).
pub const OBJECTIVE_MODE_COUNT: u8 = 5;

/// Protein + carbs totals below this are treated as zero when reporting the ratio.
pub const RATIO_DENOMINATOR_EPSILON: f64 = 1e-9;

/// Meal name used when none is given.
pub const DEFAULT_MEAL_NAME: &str = "Default";

/// Round `value` to `digits` decimal places.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let scale = 10_f64.powi(digits as i32);
    (value * scale).round() / scale
}
