//! taskset-core — Expression engine and document assembly.
//!
//! This crate defines the assignment data model, the `\[...]\` expression
//! micro-syntax (locating, parsing, value generation, rendering) and the
//! assembler that lays rendered tasks out through a layout backend.

pub mod assemble;
pub mod config;
pub mod engine;
pub mod error;
pub mod expression;
pub mod generate;
pub mod manifest;
pub mod model;
pub mod parser;
pub mod render;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use assemble::{assemble, AssembledCopy};
pub use error::{DocumentError, ExpressionError};
pub use model::{Assignment, DocumentOptions, Task};
pub use render::render;
