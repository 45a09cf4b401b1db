//! Value generation for parsed expressions.
//!
//! The number domain of a range is decided by [`DomainStrategy::for_modifiers`],
//! an explicit table keyed by the `(N, Z, Q)` flags of the effective
//! modifier set. `R` is not part of the key.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ExpressionError;
use crate::expression::{Expression, ModifierSet};

/// How a range expression draws its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainStrategy {
    /// Uniform real number, rounded to two decimals.
    UniformReal,
    /// Uniform integer, sign unconstrained.
    SignedInteger,
    /// Uniform integer; the range must not reach below zero.
    NonNegativeInteger,
    /// No strategy is defined for this modifier combination.
    Unsupported,
}

impl DomainStrategy {
    /// Look up the strategy for an (already effective) modifier set.
    pub fn for_modifiers(modifiers: ModifierSet) -> Self {
        match (modifiers.n, modifiers.z, modifiers.q) {
            (true, true, true) => DomainStrategy::UniformReal,
            (true, true, false) => DomainStrategy::SignedInteger,
            (true, false, _) => DomainStrategy::NonNegativeInteger,
            (false, _, _) => DomainStrategy::Unsupported,
        }
    }
}

/// Largest magnitude a range bound may have. Keeps every value, and every
/// value in cents, exactly representable.
const MAX_BOUND: f64 = 1e13;

/// A fully validated draw, ready to sample.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Draw {
    /// Whole cents; the value is `cents / 100`.
    Cents { min: i64, max: i64 },
    Integer { min: i64, max: i64 },
}

/// Resolve the strategy for a range and validate its bounds against it.
fn plan_range(modifiers: ModifierSet, min: f64, max: f64) -> Result<Draw, ExpressionError> {
    let effective = modifiers.effective();

    if !(min.abs() <= MAX_BOUND && max.abs() <= MAX_BOUND) {
        return Err(ExpressionError::InvalidRange {
            expression: format!("{min}..{max}"),
            reason: format!("bounds must lie within ±{MAX_BOUND}"),
        });
    }

    match DomainStrategy::for_modifiers(effective) {
        DomainStrategy::UniformReal => cent_draw(min, max),
        DomainStrategy::SignedInteger => integer_draw(min, max),
        DomainStrategy::NonNegativeInteger => {
            if min < 0.0 {
                return Err(ExpressionError::DomainViolation { min, max });
            }
            integer_draw(min, max)
        }
        DomainStrategy::Unsupported => Err(ExpressionError::UnsupportedModifierCombination {
            modifiers: effective,
        }),
    }
}

/// Restrict a real range to the two-decimal values inside it.
fn cent_draw(min: f64, max: f64) -> Result<Draw, ExpressionError> {
    let mut lo = (min * 100.0).floor() as i64;
    while (lo as f64) / 100.0 < min {
        lo += 1;
    }
    let mut hi = (max * 100.0).ceil() as i64;
    while (hi as f64) / 100.0 > max {
        hi -= 1;
    }

    if lo > hi {
        return Err(ExpressionError::InvalidRange {
            expression: format!("{min}..{max}"),
            reason: "no two-decimal value lies between the bounds".into(),
        });
    }
    Ok(Draw::Cents { min: lo, max: hi })
}

fn integer_draw(min: f64, max: f64) -> Result<Draw, ExpressionError> {
    let (lo, hi) = (min.ceil(), max.floor());
    if lo > hi {
        return Err(ExpressionError::InvalidRange {
            expression: format!("{min}..{max}"),
            reason: "no integer lies between the bounds".into(),
        });
    }
    Ok(Draw::Integer {
        min: lo as i64,
        max: hi as i64,
    })
}

/// Validate an expression without drawing a value.
///
/// Catches every error [`generate`] could raise, so a template that passes
/// this check always renders.
pub fn check(expression: &Expression) -> Result<(), ExpressionError> {
    match expression {
        Expression::Range {
            modifiers,
            min,
            max,
        } => plan_range(*modifiers, *min, *max).map(|_| ()),
        Expression::List { .. } => Ok(()),
    }
}

/// Draw one concrete value for `expression` and format it.
pub fn generate<R>(expression: &Expression, rng: &mut R) -> Result<String, ExpressionError>
where
    R: Rng + ?Sized,
{
    let value = match expression {
        Expression::List { values } => {
            let picked = values
                .choose(rng)
                .copied()
                .ok_or_else(|| ExpressionError::InvalidListElement {
                    element: String::new(),
                })?;
            format_canonical(picked)
        }
        Expression::Range {
            modifiers,
            min,
            max,
        } => {
            let drawn = match plan_range(*modifiers, *min, *max)? {
                Draw::Cents { min, max } => rng.random_range(min..=max) as f64 / 100.0,
                Draw::Integer { min, max } => rng.random_range(min..=max) as f64,
            };
            format_rounded(drawn)
        }
    };

    tracing::trace!(%value, "generated value");
    Ok(value)
}

/// Round to two decimals; integers print bare, everything else with
/// exactly two decimals.
pub fn format_rounded(x: f64) -> String {
    let rounded = normalize_zero((x * 100.0).round() / 100.0);
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.2}")
    }
}

/// Shortest decimal form: `3` rather than `3.0`, `4.2` rather than `4.20`.
pub fn format_canonical(x: f64) -> String {
    normalize_zero(x).to_string()
}

fn normalize_zero(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        x
    }
}
