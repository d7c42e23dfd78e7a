//! Linear-block encoder: produces either a raw
//! (systematic) copy of a source symbol, or a random linear
//! combination of every source symbol currently available.

use crate::field::Field;
use crate::storage::SymbolStorage;

pub struct Encoder<F: Field> {
    symbols: usize,
    storage: SymbolStorage,
    available: Vec<bool>,
    rank: usize,
    _marker: std::marker::PhantomData<F>,
}

impl<F: Field> Encoder<F> {
    pub fn new(symbols: usize, symbol_size: usize) -> Self {
        Self {
            symbols,
            storage: SymbolStorage::deep(symbols, symbol_size),
            available: vec![false; symbols],
            rank: 0,
            _marker: std::marker::PhantomData,
        }
    }

    pub fn from_shallow(symbols: usize, symbol_size: usize) -> Self {
        Self {
            symbols,
            storage: SymbolStorage::shallow(symbol_size),
            available: vec![false; symbols],
            rank: 0,
            _marker: std::marker::PhantomData,
        }
    }

    pub fn symbols(&self) -> usize {
        self.symbols
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn symbol_size(&self) -> usize {
        self.storage.symbol_size()
    }

    pub fn is_complete(&self) -> bool {
        self.rank == self.symbols
    }

    pub fn is_symbol_available(&self, i: usize) -> bool {
        self.available[i]
    }

    pub fn set_symbol_deep(&mut self, index: usize, data: &[u8]) {
        self.storage.set_symbol_deep(index, data);
        self.mark_available(index);
    }

    /// Record an externally-owned pointer as source symbol `index`
    /// (shallow storage only); see [`SymbolStorage::set_symbol_shallow`].
    pub fn set_symbol_shallow(&mut self, index: usize, ptr: *mut u8) {
        self.storage.set_symbol_shallow(index, ptr);
        self.mark_available(index);
    }

    fn mark_available(&mut self, index: usize) {
        if !self.available[index] {
            self.available[index] = true;
            self.rank += 1;
        }
    }

    /// Reset to the empty, no-symbols-available state of a freshly
    /// constructed encoder.
    pub fn reset(&mut self) {
        self.available.iter_mut().for_each(|v| *v = false);
        self.rank = 0;
    }

    /// Systematic copy of source symbol `index`. `index` must already be available.
    pub fn encode_raw(&self, index: usize, dst: &mut [u8]) {
        debug_assert!(self.available[index], "encode_raw on unavailable symbol");
        dst.copy_from_slice(self.storage.symbol(index));
    }

    /// Linear combination of every currently-available source symbol,
    /// weighted by `coefficients`. `dst`
    /// must already be zeroed. Coefficients at columns that aren't
    /// available yet are ignored rather than asserted on, so a
    /// storage-aware generator need not special-case them itself.
    pub fn encode(&self, dst: &mut [u8], coefficients: &[u8]) {
        debug_assert!(dst.iter().all(|&b| b == 0), "encode destination must be pre-zeroed");
        for i in 0..self.symbols {
            if !self.available[i] {
                continue;
            }
            let c = F::coefficient(coefficients, i);
            if F::is_zero(c) {
                continue;
            }
            F::multiply_add(dst, self.storage.symbol(i), c);
        }
    }

    /// True for column `i` if it can be referenced by a coded symbol
    /// right now — the predicate a `StorageAwareGenerator` masks
    /// against.
    pub fn symbol_pivot(&self, i: usize) -> bool {
        self.available[i]
    }
}
