//! Question rendering: template in, literal text out.

use rand::Rng;

use crate::error::ExpressionError;
use crate::expression::{locate, parse_expression, CLOSE, OPEN};
use crate::generate::{check, generate};

/// Evaluate every expression in `question` and return the literal text.
///
/// Spans are substituted left to right. The output is built in a fresh
/// buffer from the original offsets, so earlier substitutions never shift
/// later spans.
pub fn render<R>(question: &str, rng: &mut R) -> Result<String, ExpressionError>
where
    R: Rng + ?Sized,
{
    let spans = locate(question)?;
    if spans.is_empty() {
        return Ok(question.to_string());
    }

    let mut out = String::with_capacity(question.len());
    let mut cursor = 0;

    for span in spans {
        out.push_str(&question[cursor..span.start - OPEN.len()]);
        if let Some(expression) = parse_expression(&question[span.clone()])? {
            out.push_str(&generate(&expression, rng)?);
        }
        cursor = span.end + CLOSE.len();
    }
    out.push_str(&question[cursor..]);

    Ok(out)
}

/// Check that `question` would render, without drawing any values.
pub fn check_question(question: &str) -> Result<usize, ExpressionError> {
    let spans = locate(question)?;
    for span in &spans {
        if let Some(expression) = parse_expression(&question[span.clone()])? {
            check(&expression)?;
        }
    }
    Ok(spans.len())
}
