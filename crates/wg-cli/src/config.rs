//! Options for a play session.

use rand::SeedableRng;
use rand::rngs::StdRng;

/// How a play session starts and where its dice come from.
#[derive(Debug, Clone, Default)]
pub struct PlayConfig {
    /// RNG seed for reproducible rolls. Seeded from the OS when unset.
    pub seed: Option<u64>,
    /// Start over instead of continuing the save slot.
    pub new_game: bool,
}

impl PlayConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Start over instead of continuing.
    pub fn with_new_game(mut self, new_game: bool) -> Self {
        self.new_game = new_game;
        self
    }

    /// The random source for rolls.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
