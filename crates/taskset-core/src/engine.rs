//! Copy engine: generates a batch of independently randomized copies.
//!
//! Copies are produced one after another. Each copy draws from its own
//! `StdRng`, seeded from the caller's generator, so copies share no state
//! and a seeded caller reproduces the whole batch.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::assemble::{assemble, AssembledCopy};
use crate::error::DocumentError;
use crate::model::{Assignment, DocumentOptions};
use crate::traits::LayoutBackend;

/// Progress reporting trait.
pub trait ProgressReporter {
    fn on_copy_start(&self, index: usize, total: usize);
    fn on_copy_complete(&self, index: usize, page_order: &[usize]);
    fn on_copy_error(&self, index: usize, error: &DocumentError);
    fn on_batch_complete(&self, total: usize, completed: usize, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_copy_start(&self, _: usize, _: usize) {}
    fn on_copy_complete(&self, _: usize, _: &[usize]) {}
    fn on_copy_error(&self, _: usize, _: &DocumentError) {}
    fn on_batch_complete(&self, _: usize, _: usize, _: Duration) {}
}

/// Generates document copies with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct CopyEngine {
    options: DocumentOptions,
}

impl CopyEngine {
    pub fn new(options: DocumentOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DocumentOptions {
        &self.options
    }

    /// Generate `count` copies of `assignment`.
    ///
    /// `make_backend` supplies a fresh, empty document per copy. The first
    /// copy that fails aborts the batch.
    pub fn generate<B, F, R>(
        &self,
        assignment: &Assignment,
        count: usize,
        mut make_backend: F,
        rng: &mut R,
        progress: &dyn ProgressReporter,
    ) -> Result<Vec<AssembledCopy<B>>, DocumentError>
    where
        B: LayoutBackend,
        F: FnMut() -> B,
        R: Rng,
    {
        if count == 0 {
            return Err(DocumentError::NoCopies);
        }

        let start = Instant::now();
        let mut copies = Vec::with_capacity(count);

        for index in 0..count {
            progress.on_copy_start(index, count);

            let mut copy_rng = StdRng::from_rng(rng);
            match assemble(assignment, &self.options, make_backend(), &mut copy_rng) {
                Ok(copy) => {
                    tracing::info!(copy = index + 1, total = count, "generated copy");
                    progress.on_copy_complete(index, &copy.page_order);
                    copies.push(copy);
                }
                Err(e) => {
                    tracing::error!("copy {} of {count} failed: {e}", index + 1);
                    progress.on_copy_error(index, &e);
                    progress.on_batch_complete(count, copies.len(), start.elapsed());
                    return Err(e);
                }
            }
        }

        progress.on_batch_complete(count, copies.len(), start.elapsed());
        Ok(copies)
    }
}
