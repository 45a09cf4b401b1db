//! Expression micro-syntax: locating spans and parsing their content.
//!
//! An expression is everything between a `\[` and the next `]\` in a
//! question template. Two forms exist:
//!
//! - range: `\[<modifiers><min>..<max>]\`, e.g. `\[NZ-5..10]\`
//! - list: `\[v1,v2,...,vn]\`, e.g. `\[1,2,3,4]\`

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::ExpressionError;

/// Opening marker of an expression.
pub const OPEN: &str = "\\[";
/// Closing marker of an expression.
pub const CLOSE: &str = "]\\";

const RANGE_SEPARATOR: &str = "..";
const LIST_SEPARATOR: char = ',';

/// The number-domain modifiers of a range expression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModifierSet {
    /// `N`: natural numbers.
    pub n: bool,
    /// `Z`: integers.
    pub z: bool,
    /// `Q`: rationals.
    pub q: bool,
    /// `R`: reals. Parsed and counted, but never changes the domain.
    pub r: bool,
    /// How many modifier letters were present.
    pub count: usize,
}

impl ModifierSet {
    /// The set used when a range carries no modifier letters at all:
    /// any integer, positive or negative.
    pub const DEFAULT: ModifierSet = ModifierSet {
        n: true,
        z: true,
        q: false,
        r: false,
        count: 2,
    };

    /// Parse the leading run of `N`/`Z`/`Q`/`R` letters (case-insensitive).
    ///
    /// Returns the set and the byte length of the prefix it consumed.
    pub fn parse_prefix(s: &str) -> (ModifierSet, usize) {
        let mut set = ModifierSet::default();
        let mut consumed = 0;

        for c in s.chars() {
            match c.to_ascii_uppercase() {
                'N' => set.n = true,
                'Z' => set.z = true,
                'Q' => set.q = true,
                'R' => set.r = true,
                _ => break,
            }
            set.count += 1;
            consumed += c.len_utf8();
        }

        (set, consumed)
    }

    /// Returns `true` if no modifier letters were present.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The set generation actually uses: the parsed set, or
    /// [`ModifierSet::DEFAULT`] when none were given.
    pub fn effective(self) -> ModifierSet {
        if self.is_empty() {
            ModifierSet::DEFAULT
        } else {
            self
        }
    }
}

impl fmt::Display for ModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "(none)");
        }
        for (flag, letter) in [(self.n, 'N'), (self.z, 'Z'), (self.q, 'Q'), (self.r, 'R')] {
            if flag {
                write!(f, "{letter}")?;
            }
        }
        Ok(())
    }
}

/// A parsed expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Expression {
    /// One number drawn from the inclusive range `min..=max`.
    Range {
        modifiers: ModifierSet,
        min: f64,
        max: f64,
    },
    /// One element drawn uniformly from `values` (never empty).
    List { values: Vec<f64> },
}

/// Find every expression span in `text`, left to right.
///
/// Each returned range covers the content strictly between `\[` and `]\`.
/// Spans never overlap: the search for the next opening marker resumes
/// after the previous closing marker.
pub fn locate(text: &str) -> Result<Vec<Range<usize>>, ExpressionError> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    while let Some(found) = text[cursor..].find(OPEN) {
        let open = cursor + found;
        let start = open + OPEN.len();
        let Some(len) = text[start..].find(CLOSE) else {
            return Err(ExpressionError::UnterminatedExpression { offset: open });
        };
        let end = start + len;

        spans.push(start..end);
        cursor = end + CLOSE.len();
    }

    Ok(spans)
}

/// Parse the content of one expression span.
///
/// Empty content yields `Ok(None)`: a placeholder that renders to nothing.
pub fn parse_expression(content: &str) -> Result<Option<Expression>, ExpressionError> {
    if content.is_empty() {
        return Ok(None);
    }

    let is_range = content.contains(RANGE_SEPARATOR);
    let is_list = content.contains(LIST_SEPARATOR);

    let expression = match (is_range, is_list) {
        (true, true) => {
            return Err(ExpressionError::AmbiguousExpression {
                expression: content.to_string(),
            })
        }
        (true, false) => parse_range(content)?,
        _ => parse_list(content)?,
    };

    Ok(Some(expression))
}

fn parse_range(content: &str) -> Result<Expression, ExpressionError> {
    let invalid = |reason: String| ExpressionError::InvalidRange {
        expression: content.to_string(),
        reason,
    };

    let (start, end) = content
        .split_once(RANGE_SEPARATOR)
        .ok_or_else(|| invalid("missing '..'".into()))?;

    let start = start.trim_start();
    let (modifiers, consumed) = ModifierSet::parse_prefix(start);
    let min_text = &start[consumed..];

    let min = parse_decimal(min_text)
        .ok_or_else(|| invalid(format!("'{}' is not a number", min_text.trim())))?;
    let max =
        parse_decimal(end).ok_or_else(|| invalid(format!("'{}' is not a number", end.trim())))?;

    if min > max {
        return Err(invalid(
            "start of range must be less than end of range".into(),
        ));
    }

    tracing::debug!(%modifiers, min, max, "parsed range expression");
    Ok(Expression::Range {
        modifiers,
        min,
        max,
    })
}

fn parse_list(content: &str) -> Result<Expression, ExpressionError> {
    let trimmed = content.trim_start();
    let (modifiers, consumed) = ModifierSet::parse_prefix(trimmed);
    if !modifiers.is_empty() {
        tracing::debug!(%modifiers, "ignoring modifiers on list expression");
    }

    let values = trimmed[consumed..]
        .split(LIST_SEPARATOR)
        .map(|element| {
            parse_decimal(element).ok_or_else(|| ExpressionError::InvalidListElement {
                element: element.trim().to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(count = values.len(), "parsed list expression");
    Ok(Expression::List { values })
}

/// Parse a plain decimal literal: optional sign, digits, optional fraction.
///
/// Rejects everything `f64::from_str` accepts beyond that (`inf`, `NaN`,
/// exponents), and literals too long to be finite.
pub fn parse_decimal(s: &str) -> Option<f64> {
    let s = s.trim();
    let unsigned = s.strip_prefix(&['+', '-'][..]).unwrap_or(s);
    let (int, frac) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    let has_digits = !int.is_empty() || frac.is_some_and(|f| !f.is_empty());
    if !has_digits || !all_digits(int) || !frac.map_or(true, all_digits) {
        return None;
    }

    s.parse().ok().filter(|v: &f64| v.is_finite())
}
