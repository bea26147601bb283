//! Randomness seam used by the random-AND instruction.

/// Source of random bytes for instruction execution.
///
/// Hosts that want reproducible runs can supply a seeded or scripted
/// implementation; anything implementing [`rand::Rng`] works out of the
/// box through the blanket impl.
pub trait RandomSource {
    /// Produces the next random byte.
    fn next_byte(&mut self) -> u8;
}

impl<R: rand::Rng> RandomSource for R {
    fn next_byte(&mut self) -> u8 {
        self.gen()
    }
}

#[cfg(test)]
mod tests {
    use super::RandomSource;
    use rand::rngs::mock::StepRng;

    #[test]
    fn any_rng_acts_as_a_random_source() {
        let mut rng = StepRng::new(0x42, 0);
        assert_eq!(rng.next_byte(), 0x42);
    }
}
