use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform integer source used by the board to pick cells.
pub trait RandomSource: Send {
    /// Returns a value in `[0, n)`. `n` is always greater than zero.
    fn next_int(&mut self, n: u32) -> u32;
}

pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SessionRng {
    fn next_int(&mut self, n: u32) -> u32 {
        self.rng.random_range(0..n)
    }
}

/// Replays a fixed list of values, cycling when exhausted. Each value is reduced modulo `n`.
#[cfg(test)]
#[derive(Clone, Debug)]
pub struct SequenceRng {
    values: Vec<u32>,
    position: usize,
}

#[cfg(test)]
impl SequenceRng {
    pub fn new(values: Vec<u32>) -> Self {
        assert!(!values.is_empty(), "SequenceRng needs at least one value");
        Self { values, position: 0 }
    }
}

#[cfg(test)]
impl RandomSource for SequenceRng {
    fn next_int(&mut self, n: u32) -> u32 {
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value % n
    }
}
