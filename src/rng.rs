use rand::{Rng, RngCore, SeedableRng};

/// Largest seed handed out when the caller does not supply one.
pub const MAX_SEED: u32 = i32::MAX as u32;

/// Small 32-bit generator (mulberry32) whose output stream is fully determined by its seed.
///
/// Every maze decision is drawn from one of these, so the same seed always produces the same maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mulberry32 {
    seed: u32,
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Mulberry32 { seed, state: seed }
    }

    /// Get a generator seeded from `seed`, or from OS entropy in `[1, 2^31 - 1]` when `None`.
    pub fn from_seed_or_entropy(seed: Option<u32>) -> Self {
        match seed {
            Some(s) => Mulberry32::new(s),
            None => Mulberry32::new(random_seed()),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Rewind the stream to the first value produced for this seed.
    pub fn restart(&mut self) {
        self.state = self.seed;
    }

    /// Advance the state and return the next raw 32-bit output.
    pub fn next_raw(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.next_raw() as f64 / 4_294_967_296.0
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn next_index(&mut self, len: usize) -> usize {
        let idx = (self.next_f64() * len as f64) as usize;
        // Guards against float rounding at the top of the range
        idx.min(len - 1)
    }
}

/// Draw a fresh seed in `[1, 2^31 - 1]`. This is the only non-deterministic entropy the crate uses.
pub fn random_seed() -> u32 {
    rand::rng().random_range(1..=MAX_SEED)
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.next_raw()
    }

    fn next_u64(&mut self) -> u64 {
        let lo = self.next_raw() as u64;
        let hi = self.next_raw() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next_raw().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Mulberry32::new(u32::from_le_bytes(seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_values() {
        // First outputs of mulberry32 for seed 1
        let mut rng = Mulberry32::new(1);
        assert_eq!(rng.next_raw(), 2_693_262_067);
        assert_eq!(rng.next_raw(), 11_749_833);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = Mulberry32::new(12345);
        let mut b = Mulberry32::new(12345);
        for _ in 0..1000 {
            assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
        }
    }

    #[test]
    fn test_restart() {
        let mut rng = Mulberry32::new(99);
        let first = (0..10).map(|_| rng.next_raw()).collect::<Vec<_>>();
        rng.restart();
        let again = (0..10).map(|_| rng.next_raw()).collect::<Vec<_>>();
        assert_eq!(first, again);
    }

    #[test]
    fn test_unit_interval() {
        let mut rng = Mulberry32::new(7);
        assert!((0..10_000).all(|_| {
            let v = rng.next_f64();
            (0.0..1.0).contains(&v)
        }));
    }

    #[test]
    fn test_next_index_in_range() {
        let mut rng = Mulberry32::new(3);
        assert!((0..1000).all(|_| rng.next_index(5) < 5));
    }

    #[test]
    fn test_random_seed_range() {
        for _ in 0..100 {
            let seed = random_seed();
            assert!((1..=MAX_SEED).contains(&seed));
        }
    }

    #[test]
    fn test_seedable() {
        let mut a = Mulberry32::from_seed(42u32.to_le_bytes());
        let mut b = Mulberry32::new(42);
        assert_eq!(a.next_u32(), b.next_raw());
    }
}
