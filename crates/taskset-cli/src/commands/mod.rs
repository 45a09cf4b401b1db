pub mod generate;
pub mod init;
pub mod render;
pub mod validate;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// A seeded generator when `seed` is given, otherwise one from OS entropy.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
