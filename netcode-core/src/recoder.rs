//! Recoder wiring: producing new coded symbols at an
//! intermediate node from already-received coded symbols, without
//! fully decoding first.
//!
//! The recoder shares storage with its local decoder, borrowing it
//! directly rather than holding a two-way parent/child pointer pair:
//! a coder instance is single-threaded and non-`Send` across this
//! boundary, so both stacks always live on the same node and the same
//! thread, and a lifetime-bound reference is the simplest correct
//! design.

use crate::decoder::Decoder;
use crate::field::Field;
use crate::generator::RecodingGenerator;

/// Recodes over a borrowed [`Decoder`]'s pivot rows. Only the
/// coefficient generator and the symbol-id writer are distinct from
/// the decoder's own stack — everything else (storage, field,
/// coefficient-storage reads) is forwarded straight through the
/// borrow. Always emits non-systematic packets.
pub struct Recoder<'a, F: Field> {
    decoder: &'a mut Decoder<F>,
    generator: RecodingGenerator,
}

impl<'a, F: Field> Recoder<'a, F> {
    pub fn new(decoder: &'a mut Decoder<F>, seed: u32) -> Self {
        Self { decoder, generator: RecodingGenerator::new(seed) }
    }

    pub fn rank(&self) -> usize {
        self.decoder.rank()
    }

    /// Produce one recoded symbol + its coefficient vector over the
    /// source symbol space. `out_symbol` must be zeroed and sized for
    /// one symbol; `out_coeffs` must be zeroed and sized for
    /// `F::coefficients_size(symbols)` bytes. If the decoder currently
    /// has rank zero, both outputs stay all-zero — not an error, a valid no-op symbol.
    pub fn recode(&mut self, out_symbol: &mut [u8], out_coeffs: &mut [u8]) {
        let pivots = self.decoder.pivot_rows();
        self.generator.recode::<F>(&pivots, self.decoder.storage(), out_symbol, out_coeffs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::Variant;
    use crate::field::Binary8;

    fn coeffs(symbols: usize, nonzero: &[(usize, u8)]) -> Vec<u8> {
        let mut v = vec![0u8; Binary8::coefficients_size(symbols)];
        for &(i, c) in nonzero {
            Binary8::set_coefficient(&mut v, i, c);
        }
        v
    }

    #[test]
    fn zero_rank_recodes_to_zero() {
        let mut d: Decoder<Binary8> = Decoder::new(3, 4, Variant::Forward);
        let mut recoder = Recoder::new(&mut d, 1);
        let mut out_symbol = vec![0u8; 4];
        let mut out_coeffs = vec![0u8; Binary8::coefficients_size(3)];
        recoder.recode(&mut out_symbol, &mut out_coeffs);
        assert!(out_symbol.iter().all(|&b| b == 0));
        assert!(out_coeffs.iter().all(|&b| b == 0));
    }

    #[test]
    fn nonzero_rank_recodes_over_pivot_rows_only() {
        let mut d: Decoder<Binary8> = Decoder::new(3, 2, Variant::Forward);
        let mut c0 = coeffs(3, &[(0, 1)]);
        d.decode_coded(&mut vec![1, 2], &mut c0);

        let mut recoder = Recoder::new(&mut d, 5);
        let mut out_symbol = vec![0u8; 2];
        let mut out_coeffs = vec![0u8; Binary8::coefficients_size(3)];
        recoder.recode(&mut out_symbol, &mut out_coeffs);

        assert_eq!(Binary8::coefficient(&out_coeffs, 1), 0);
        assert_eq!(Binary8::coefficient(&out_coeffs, 2), 0);
    }
}
