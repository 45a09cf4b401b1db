//! The `taskset render` command.

use anyhow::Result;

use taskset_core::render::render;

use super::make_rng;

pub fn execute(template: &str, seed: Option<u64>, times: usize) -> Result<()> {
    anyhow::ensure!(times >= 1, "times must be at least 1");

    let mut rng = make_rng(seed);
    for _ in 0..times {
        println!("{}", render(template, &mut rng)?);
    }

    Ok(())
}
