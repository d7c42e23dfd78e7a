//! Coefficient generators.
//!
//! All generators fill a packed coefficient vector of
//! `F::coefficients_size(symbols)` bytes. The uniform generator is
//! seedable with a 32-bit seed via a Mersenne-Twister-class PRNG;
//! reseeding always restarts the stream from scratch, which is why `seed` reconstructs the
//! underlying RNG rather than re-seeding it in place.

mod recoding;
mod storage_aware;
mod uniform;

pub use recoding::RecodingGenerator;
pub use storage_aware::StorageAwareGenerator;
pub use uniform::UniformGenerator;

use crate::field::Field;

/// Something that can fill a packed coefficient vector.
pub trait Generator<F: Field> {
    /// Number of source symbols this generator produces coefficients
    /// for.
    fn symbols(&self) -> usize;

    /// Fill `out` (exactly `F::coefficients_size(self.symbols())`
    /// bytes) with a fresh coefficient vector.
    fn generate(&mut self, out: &mut [u8]);
}

/// Draw one field element uniformly from `0..F::ORDER` using `rng`.
/// Shared by the uniform and recoding generators so both draw from
/// the same distribution.
pub(crate) fn draw_element<F: Field>(rng: &mut impl rand::RngCore) -> F::Elem {
    if F::ORDER <= (u32::MAX as u64) + 1 {
        if F::ORDER.is_power_of_two() || F::IS_BINARY {
            F::element_from_u32(rng.next_u32())
        } else {
            // Rejection sampling to avoid modulo bias for non-power-
            // of-two orders (e.g. the prime field).
            let order = F::ORDER as u32;
            let limit = (u32::MAX / order) * order;
            loop {
                let v = rng.next_u32();
                if v < limit {
                    return F::element_from_u32(v % order);
                }
            }
        }
    } else {
        F::element_from_u32(rng.next_u32())
    }
}
