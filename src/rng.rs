use rand::{Error, RngCore, SeedableRng};

/// A linear-congruential generator, per the RNG choice in the design notes: cheap,
/// reproducible draws where only within-implementation determinism matters.
///
/// Parameters follow Numerical Recipes' 64-bit LCG (multiplier and increment from
/// Knuth's MMIX).
pub struct Lcg64 {
    state: u64,
}

const MULTIPLIER: u64 = 6364136223846793005;
const INCREMENT: u64 = 1442695040888963407;

impl Lcg64 {
    fn step(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.state
    }
}

impl RngCore for Lcg64 {
    fn next_u32(&mut self) -> u32 {
        (self.step() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.step()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut chunks = dest.chunks_exact_mut(8);
        for chunk in &mut chunks {
            chunk.copy_from_slice(&self.next_u64().to_le_bytes());
        }
        let remainder = chunks.into_remainder();
        if !remainder.is_empty() {
            let bytes = self.next_u64().to_le_bytes();
            remainder.copy_from_slice(&bytes[..remainder.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Lcg64 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        // Ensure the initial state is odd-ish and well-mixed even for seed = 0.
        let state = u64::from_le_bytes(seed) ^ INCREMENT;
        let mut rng = Lcg64 { state };
        rng.step();
        rng
    }
}

impl Lcg64 {
    pub fn from_u64_seed(seed: u64) -> Self {
        Self::from_seed(seed.to_le_bytes())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn deterministic() {
        let mut a = Lcg64::from_u64_seed(42);
        let mut b = Lcg64::from_u64_seed(42);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn differs_across_seeds() {
        let mut a = Lcg64::from_u64_seed(42);
        let mut b = Lcg64::from_u64_seed(43);
        let seq_a: Vec<u64> = (0..8).map(|_| a.next_u64()).collect();
        let seq_b: Vec<u64> = (0..8).map(|_| b.next_u64()).collect();
        assert_ne!(seq_a, seq_b);
    }
}
