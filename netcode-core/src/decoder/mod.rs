//! Linear-block decoder state machine.
//!
//! One [`Decoder`] holds a K-row matrix: a packed coefficient vector +
//! symbol per row, with three parallel boolean annotations (`pivot`,
//! `coded`, `uncoded`) and the derived `rank`/`max_pivot` counters.
//! [`Variant`] selects between the forward, delayed and backward
//! elimination orders; all three share the same row storage and
//! invariants.

mod largest_nonzero;
mod partial;

pub use largest_nonzero::LargestNonzeroTracker;
pub use partial::PartialDecodingTracker;

use crate::field::Field;
use crate::storage::CoefficientStorage;

/// Which elimination order a [`Decoder`] uses when a fresh coded
/// symbol arrives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /// Full forward+backward substitution on every symbol; pivot
    /// state is always in reduced row-echelon form.
    Forward,
    /// Forward substitution only; backward substitution is deferred
    /// to a single pass once `rank == K`. Fewer total field
    /// operations at the cost of no partial-decoding visibility
    /// mid-stream.
    Delayed,
    /// Eliminates from the top of the matrix downward, taking the
    /// pivot as the largest nonzero column index not yet pivoted.
    /// Semantically equivalent to `Forward`; useful when the upper-
    /// triangular part of the matrix fills in first.
    Backward,
}

pub struct Decoder<F: Field> {
    symbols: usize,
    storage: CoefficientStorage<F>,
    pivot: Vec<bool>,
    coded: Vec<bool>,
    uncoded: Vec<bool>,
    rank: usize,
    max_pivot: Option<usize>,
    variant: Variant,
    largest_nonzero: LargestNonzeroTracker,
}

impl<F: Field> Decoder<F> {
    pub fn new(symbols: usize, symbol_size: usize, variant: Variant) -> Self {
        assert!(symbols > 0, "K must be nonzero");
        Self {
            symbols,
            storage: CoefficientStorage::new(symbols, symbol_size),
            pivot: vec![false; symbols],
            coded: vec![false; symbols],
            uncoded: vec![false; symbols],
            rank: 0,
            max_pivot: None,
            variant,
            largest_nonzero: LargestNonzeroTracker::new(),
        }
    }

    /// Reset all state to a freshly-initialized decoder: `rank=0`, all annotations false, all rows zeroed.
    pub fn reset(&mut self) {
        self.storage.reset();
        self.pivot.iter_mut().for_each(|v| *v = false);
        self.coded.iter_mut().for_each(|v| *v = false);
        self.uncoded.iter_mut().for_each(|v| *v = false);
        self.rank = 0;
        self.max_pivot = None;
        self.largest_nonzero.reset();
    }

    pub fn symbols(&self) -> usize {
        self.symbols
    }

    pub fn symbol_size(&self) -> usize {
        self.storage.symbol_size()
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn max_pivot(&self) -> Option<usize> {
        self.max_pivot
    }

    pub fn is_complete(&self) -> bool {
        self.rank == self.symbols
    }

    pub fn is_pivot(&self, i: usize) -> bool {
        self.pivot[i]
    }

    pub fn is_coded(&self, i: usize) -> bool {
        self.coded[i]
    }

    pub fn is_uncoded(&self, i: usize) -> bool {
        self.uncoded[i]
    }

    pub fn largest_nonzero_index(&self) -> Option<usize> {
        self.largest_nonzero.get()
    }

    pub fn symbol(&self, row: usize) -> &[u8] {
        self.storage.symbol(row)
    }

    pub fn vector(&self, row: usize) -> &[u8] {
        self.storage.vector(row)
    }

    pub fn storage(&self) -> &CoefficientStorage<F> {
        &self.storage
    }

    /// Row indices currently pivoted, in ascending order — the input
    /// a recoder needs to draw coefficients over.
    pub fn pivot_rows(&self) -> Vec<usize> {
        (0..self.symbols).filter(|&i| self.pivot[i]).collect()
    }

    /// Decode a coded symbol: `symbol`/`coefficients` are owned
    /// scratch buffers the routine may freely mutate.
    /// Returns `true` if the symbol contributed a new pivot.
    pub fn decode_coded(&mut self, symbol: &mut [u8], coefficients: &mut [u8]) -> bool {
        self.track_nonzero(coefficients);
        match self.variant {
            Variant::Forward => self.decode_coded_forward(symbol, coefficients, true),
            Variant::Delayed => {
                let pivoted = self.decode_coded_forward(symbol, coefficients, false);
                if self.is_complete() {
                    self.final_backward_substitute();
                }
                pivoted
            }
            Variant::Backward => self.decode_coded_backward(symbol, coefficients),
        }
    }

    /// Decode a raw (systematic) symbol at source index `i`. Idempotent if `i` is already uncoded.
    pub fn decode_uncoded(&mut self, index: usize, symbol: &[u8]) {
        assert!(index < self.symbols);

        if self.uncoded[index] {
            return;
        }

        if self.coded[index] {
            self.swap_decode(index, symbol);
        } else {
            self.storage.symbol_mut(index).copy_from_slice(symbol);
            self.storage.set_unit_row(index, self.symbols);

            self.uncoded[index] = true;
            self.pivot[index] = true;
            self.rank += 1;
            self.bump_max_pivot(index);

            self.eliminate_column_with_unit(index, symbol);
        }

        if matches!(self.variant, Variant::Delayed) && self.is_complete() {
            self.final_backward_substitute();
        }
    }

    fn track_nonzero(&mut self, coefficients: &[u8]) {
        for i in (0..self.symbols).rev() {
            if !F::is_zero(F::coefficient(coefficients, i)) {
                self.largest_nonzero.observe(i);
                break;
            }
        }
    }

    fn bump_max_pivot(&mut self, i: usize) {
        self.max_pivot = Some(self.max_pivot.map_or(i, |m| m.max(i)));
    }

    /// The six-step elimination sequence. `do_backward` controls whether step 5
    /// (eliminate column `i` out of existing coded rows) runs
    /// immediately (forward variant) or is skipped (delayed variant,
    /// which performs it in one pass at completion instead).
    fn decode_coded_forward(&mut self, symbol: &mut [u8], coefficients: &mut [u8], do_backward: bool) -> bool {
        // Step 1: forward substitution to pivot.
        let mut pivot_index = None;
        for i in 0..self.symbols {
            let c = F::coefficient(coefficients, i);
            if F::is_zero(c) {
                continue;
            }
            if self.pivot[i] {
                F::multiply_subtract(coefficients, self.storage.vector(i), c);
                F::multiply_subtract(symbol, self.storage.symbol(i), c);
                continue;
            }
            pivot_index = Some(i);
            break;
        }

        let i = match pivot_index {
            Some(i) => i,
            None => return false, // Step 2: linearly dependent.
        };

        // Step 3: normalize (non-binary fields only).
        if !F::IS_BINARY {
            let inv = F::invert(F::coefficient(coefficients, i));
            F::multiply(coefficients, inv);
            F::multiply(symbol, inv);
        }

        // Step 4: forward substitute from pivot.
        if let Some(max_pivot) = self.max_pivot {
            for j in (i + 1)..=max_pivot {
                let cj = F::coefficient(coefficients, j);
                if !F::is_zero(cj) && self.pivot[j] {
                    F::multiply_subtract(coefficients, self.storage.vector(j), cj);
                    F::multiply_subtract(symbol, self.storage.symbol(j), cj);
                }
            }
        }

        // Step 5: backward substitution against existing coded rows.
        if do_backward {
            self.backward_substitute_existing(i, coefficients, symbol);
        }

        // Step 6: store.
        self.storage.vector_mut(i).copy_from_slice(coefficients);
        self.storage.symbol_mut(i).copy_from_slice(symbol);
        self.coded[i] = true;
        self.pivot[i] = true;
        self.rank += 1;
        self.bump_max_pivot(i);

        true
    }

    /// For every existing coded row `k <= max_pivot` with a nonzero
    /// entry at the new pivot column `i`, subtract the new row from
    /// it. Uncoded rows are skipped since they're unit vectors with
    /// no cross-terms.
    fn backward_substitute_existing(&mut self, i: usize, new_coeffs: &[u8], new_symbol: &[u8]) {
        let max_pivot = match self.max_pivot {
            Some(m) => m,
            None => return,
        };
        for k in 0..=max_pivot {
            if !self.coded[k] || k == i {
                continue;
            }
            let c = F::coefficient(self.storage.vector(k), i);
            if F::is_zero(c) {
                continue;
            }
            let row_k_coeff = self.storage.vector_mut(k);
            F::multiply_subtract(row_k_coeff, new_coeffs, c);
            F::multiply_subtract(self.storage.symbol_mut(k), new_symbol, c);
        }
    }

    /// Eliminate column `index` out of every existing coded row using
    /// a unit-vector row whose associated symbol is `symbol` (used
    /// when a fresh uncoded symbol arrives at a column with no prior
    /// pivot).
    fn eliminate_column_with_unit(&mut self, index: usize, symbol: &[u8]) {
        let max_pivot = match self.max_pivot {
            Some(m) => m,
            None => return,
        };
        for k in 0..=max_pivot {
            if !self.coded[k] {
                continue;
            }
            let c = F::coefficient(self.storage.vector(k), index);
            if F::is_zero(c) {
                continue;
            }
            F::set_coefficient(self.storage.vector_mut(k), index, F::zero());
            F::multiply_subtract(self.storage.symbol_mut(k), symbol, c);
        }
    }

    /// Swap-decode: an uncoded symbol arrives at an index that is
    /// currently a coded pivot. The coded row is displaced (its
    /// column-`index` coefficient cleared, its symbol adjusted by the
    /// incoming uncoded symbol) and re-inserted via the coded-decode
    /// path, since its new leading nonzero strictly exceeds `index`.
    fn swap_decode(&mut self, index: usize, symbol: &[u8]) {
        let mut displaced_coeffs = self.storage.vector(index).to_vec();
        let mut displaced_symbol = self.storage.symbol(index).to_vec();

        let c = F::coefficient(&displaced_coeffs, index);
        F::set_coefficient(&mut displaced_coeffs, index, F::zero());
        F::multiply_subtract(&mut displaced_symbol, symbol, c);

        self.coded[index] = false;
        self.pivot[index] = false;
        self.rank -= 1;

        let do_backward = matches!(self.variant, Variant::Forward | Variant::Backward);
        self.decode_coded_forward(&mut displaced_symbol, &mut displaced_coeffs, do_backward);

        self.storage.symbol_mut(index).copy_from_slice(symbol);
        self.storage.set_unit_row(index, self.symbols);
        self.uncoded[index] = true;
        self.pivot[index] = true;
        self.rank += 1;
        self.bump_max_pivot(index);
    }

    /// Backward-variant decode: eliminate from the top of the matrix
    /// downward, taking the pivot as the largest nonzero column index
    /// not yet pivoted.
    fn decode_coded_backward(&mut self, symbol: &mut [u8], coefficients: &mut [u8]) -> bool {
        let mut pivot_index = None;
        for i in (0..self.symbols).rev() {
            let c = F::coefficient(coefficients, i);
            if F::is_zero(c) {
                continue;
            }
            if self.pivot[i] {
                F::multiply_subtract(coefficients, self.storage.vector(i), c);
                F::multiply_subtract(symbol, self.storage.symbol(i), c);
                continue;
            }
            pivot_index = Some(i);
            break;
        }

        let i = match pivot_index {
            Some(i) => i,
            None => return false,
        };

        if !F::IS_BINARY {
            let inv = F::invert(F::coefficient(coefficients, i));
            F::multiply(coefficients, inv);
            F::multiply(symbol, inv);
        }

        for j in 0..i {
            let cj = F::coefficient(coefficients, j);
            if !F::is_zero(cj) && self.pivot[j] {
                F::multiply_subtract(coefficients, self.storage.vector(j), cj);
                F::multiply_subtract(symbol, self.storage.symbol(j), cj);
            }
        }

        for k in 0..self.symbols {
            if !self.pivot[k] || k == i {
                continue;
            }
            let c = F::coefficient(self.storage.vector(k), i);
            if F::is_zero(c) {
                continue;
            }
            let row_k_coeff = self.storage.vector_mut(k);
            F::multiply_subtract(row_k_coeff, coefficients, c);
            F::multiply_subtract(self.storage.symbol_mut(k), symbol, c);
        }

        self.storage.vector_mut(i).copy_from_slice(coefficients);
        self.storage.symbol_mut(i).copy_from_slice(symbol);
        self.coded[i] = true;
        self.pivot[i] = true;
        self.rank += 1;
        self.bump_max_pivot(i);

        true
    }

    /// Runs backward substitution in one pass from `i = K-1` down to
    /// `0`, transforming the echelon form accumulated by forward-only
    /// decoding into fully reduced row-echelon form.
    fn final_backward_substitute(&mut self) {
        debug_assert!(self.is_complete());
        for i in (0..self.symbols).rev() {
            if !self.coded[i] {
                continue;
            }
            let coeffs = self.storage.vector(i).to_vec();
            let symbol = self.storage.symbol(i).to_vec();
            for k in 0..i {
                if !self.coded[k] {
                    continue;
                }
                let c = F::coefficient(self.storage.vector(k), i);
                if F::is_zero(c) {
                    continue;
                }
                let row_k_coeff = self.storage.vector_mut(k);
                F::multiply_subtract(row_k_coeff, &coeffs, c);
                F::multiply_subtract(self.storage.symbol_mut(k), &symbol, c);
            }
        }
    }
}
