use rand_mt::Mt19937GenRand32;

use crate::field::Field;
use crate::storage::CoefficientStorage;

use super::draw_element;

/// At a recoder holding a partially decoded matrix of rank `r`, draws
/// `r` coefficients and linear-combines them into the `r` pivot rows
/// of the decoder state, producing both a recoded symbol and the
/// corresponding K-length coefficient vector over the source symbol
/// space.
///
/// If `r = 0`, emits an all-zero coefficient vector and zero symbol;
/// downstream decoders must treat a zero-coefficient symbol as a
/// no-op.
pub struct RecodingGenerator {
    rng: Mt19937GenRand32,
}

impl RecodingGenerator {
    pub fn new(seed: u32) -> Self {
        Self { rng: Mt19937GenRand32::new(seed) }
    }

    /// `pivot_rows` lists the row indices with `pivot[i]` set, in any
    /// order. `out_symbol`/`out_coeffs` must already be zeroed and
    /// sized for one symbol / `coefficients_size(symbols)` bytes
    /// respectively.
    pub fn recode<F: Field>(
        &mut self,
        pivot_rows: &[usize],
        storage: &CoefficientStorage<F>,
        out_symbol: &mut [u8],
        out_coeffs: &mut [u8],
    ) {
        for &row in pivot_rows {
            let c = draw_element::<F>(&mut self.rng);
            if F::is_zero(c) {
                continue;
            }
            F::multiply_add(out_symbol, storage.symbol(row), c);
            F::multiply_add(out_coeffs, storage.vector(row), c);
        }
    }
}
