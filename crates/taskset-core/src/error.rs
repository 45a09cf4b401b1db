//! Expression and document error types.
//!
//! Every expression error is local to a single `\[...]\` span. They are
//! never recovered from: a failing expression aborts the question it lives
//! in, and the assembler wraps it in a [`DocumentError`] that aborts the
//! whole copy.

use thiserror::Error;

use crate::expression::ModifierSet;

/// Errors raised while locating, parsing or generating an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    /// An opening `\[` marker has no closing `]\` after it.
    #[error("unterminated expression starting at byte {offset}")]
    UnterminatedExpression { offset: usize },

    /// The expression contains both `..` and `,`.
    #[error("ambiguous expression '{expression}': found both '..' and ','")]
    AmbiguousExpression { expression: String },

    /// A range bound failed to parse, or the bounds are out of order.
    #[error("invalid range '{expression}': {reason}")]
    InvalidRange { expression: String, reason: String },

    /// A list element is not a decimal number.
    #[error("invalid list element '{element}'")]
    InvalidListElement { element: String },

    /// The range falls outside the non-negative domain selected by `N`.
    #[error("range {min}..{max} is not valid for natural numbers")]
    DomainViolation { min: f64, max: f64 },

    /// The modifier set has no generation strategy.
    #[error("unsupported modifier combination '{modifiers}'")]
    UnsupportedModifierCombination { modifiers: ModifierSet },
}

/// Errors that abort the assembly of a document copy.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// A question template failed to render. Indices are 0-based; the
    /// message counts from 1.
    #[error("task {}, question {}: {source}", .task + 1, .question + 1)]
    Question {
        task: usize,
        question: usize,
        #[source]
        source: ExpressionError,
    },

    /// A batch was requested with zero copies.
    #[error("at least one copy must be requested")]
    NoCopies,
}

impl DocumentError {
    /// The underlying expression error, if any.
    pub fn expression_error(&self) -> Option<&ExpressionError> {
        match self {
            DocumentError::Question { source, .. } => Some(source),
            DocumentError::NoCopies => None,
        }
    }
}
