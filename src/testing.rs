//! Test doubles shared by the unit tests.

use rand::{Error, RngCore};

/// An "RNG" that always returns the same word.  `gen::<f64>()` on it
/// yields the value it was built with, so tests can force a particular
/// transform on every draw.
pub struct FixedRng(u64);

impl FixedRng {
    /// `r` must be in [0, 1).
    pub fn at(r: f64) -> Self {
        // rand builds an f64 from the top 53 bits of a u64.
        FixedRng(((r * (1_u64 << 53) as f64) as u64) << 11)
    }
}

impl RngCore for FixedRng {
    fn next_u32(&mut self) -> u32 {
        (self.0 >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for (i, byte) in dest.iter_mut().enumerate() {
            *byte = self.0.to_le_bytes()[i % 8];
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
