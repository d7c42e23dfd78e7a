//! Vandermonde / systematic-Vandermonde matrix construction for
//! Reed-Solomon coding: build the raw matrix, transpose it, then
//! reduce it to an identity-prefixed systematic form.

use std::collections::HashMap;
use std::sync::Arc;

use crate::field::Field;

/// A dense row-major matrix of field elements, each row stored as a
/// packed coefficient vector so it can be handed directly to the
/// encoder core as one contiguous row.
pub struct Matrix<F: Field> {
    rows: usize,
    row_bytes: usize,
    data: Vec<u8>,
    _marker: std::marker::PhantomData<F>,
}

impl<F: Field> Matrix<F> {
    fn new(rows: usize, cols: usize) -> Self {
        let row_bytes = F::coefficients_size(cols);
        Self {
            rows,
            row_bytes,
            data: vec![0u8; rows * row_bytes],
            _marker: std::marker::PhantomData,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn row(&self, i: usize) -> &[u8] {
        &self.data[i * self.row_bytes..(i + 1) * self.row_bytes]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [u8] {
        &mut self.data[i * self.row_bytes..(i + 1) * self.row_bytes]
    }

    pub fn element(&self, i: usize, j: usize) -> F::Elem {
        F::coefficient(self.row(i), j)
    }

    pub fn set_element(&mut self, i: usize, j: usize, v: F::Elem) {
        F::set_coefficient(self.row_mut(i), j, v);
    }
}

/// Build the non-systematic Vandermonde generator matrix for `symbols`
/// source symbols: `K x (order-1)`, `M[j,i] = alpha^(j*i)` with alpha
/// fixed to 2, then transposed to `(order-1) x K` so row `j` of the
/// result holds the coefficients for the j-th emitted symbol
/// contiguously.
pub fn build_vandermonde<F: Field>(symbols: usize) -> Matrix<F> {
    assert!(symbols > 0);
    assert!((symbols as u64) < F::ORDER, "RS requires K < order");

    let max_symbols = (F::ORDER - 1) as usize;
    let mut m = Matrix::<F>::new(symbols, max_symbols);

    let mut a_row = F::one();
    for j in 0..symbols {
        let mut a_column = F::one();
        for i in 0..max_symbols {
            m.set_element(j, i, a_column);
            a_column = mul_elem::<F>(a_row, a_column);
        }
        a_row = mul_elem::<F>(a_row, F::element_from_u32(2));
    }

    transpose(&m)
}

/// Apply Gauss-Jordan row reduction so the first `K` rows of the
/// (already-transposed) Vandermonde matrix form the identity,
/// producing the systematic form.
pub fn systematic_form<F: Field>(m: &Matrix<F>, symbols: usize) -> Matrix<F> {
    let mut out = Matrix::<F> {
        rows: m.rows,
        row_bytes: m.row_bytes,
        data: m.data.clone(),
        _marker: std::marker::PhantomData,
    };

    for i in 0..symbols {
        let pivot = out.element(i, i);
        let inv = F::invert(pivot);
        F::multiply(out.row_mut(i), inv);

        for j in 0..symbols {
            if j == i {
                continue;
            }
            let scale = out.element(j, i);
            if F::is_zero(scale) {
                continue;
            }
            let (row_j, row_i) = split_rows(&mut out.data, out.row_bytes, j, i);
            F::multiply_subtract(row_j, row_i, scale);
        }
    }

    out
}

fn split_rows(data: &mut [u8], row_bytes: usize, a: usize, b: usize) -> (&mut [u8], &mut [u8]) {
    debug_assert_ne!(a, b);
    if a < b {
        let (lo, hi) = data.split_at_mut(b * row_bytes);
        (&mut lo[a * row_bytes..(a + 1) * row_bytes], &mut hi[..row_bytes])
    } else {
        let (lo, hi) = data.split_at_mut(a * row_bytes);
        (&mut hi[..row_bytes], &mut lo[b * row_bytes..(b + 1) * row_bytes])
    }
}

fn transpose<F: Field>(m: &Matrix<F>) -> Matrix<F> {
    let rows = m.rows();
    // `build_vandermonde` always constructs an `F::ORDER - 1`-wide matrix.
    let ncols = (F::ORDER - 1) as usize;
    let mut out = Matrix::<F>::new(ncols, rows);
    for j in 0..rows {
        for i in 0..ncols {
            let v = m.element(j, i);
            out.set_element(i, j, v);
        }
    }
    out
}

fn mul_elem<F: Field>(a: F::Elem, b: F::Elem) -> F::Elem {
    // Multiply two scalars by routing through a one-element buffer;
    // fields expose vector-scale, not scalar*scalar, so we reuse it.
    let size = F::coefficients_size(1);
    let mut buf = vec![0u8; size];
    F::set_coefficient(&mut buf, 0, b);
    F::multiply(&mut buf, a);
    F::coefficient(&buf, 0)
}

/// Caches constructed generator matrices by K, shared across coders
/// produced by the same Reed-Solomon factory. A plain `HashMap::entry`
/// lookup has no off-by-one ambiguity: any K not yet built is simply
/// absent and falls through to construction.
pub struct VandermondeCache<F: Field> {
    systematic: bool,
    entries: HashMap<usize, Arc<Matrix<F>>>,
}

impl<F: Field> VandermondeCache<F> {
    pub fn new(systematic: bool) -> Self {
        Self { systematic, entries: HashMap::new() }
    }

    pub fn get_or_build(&mut self, symbols: usize) -> Arc<Matrix<F>> {
        if let Some(m) = self.entries.get(&symbols) {
            return Arc::clone(m);
        }
        let raw = build_vandermonde::<F>(symbols);
        let m = if self.systematic {
            systematic_form(&raw, symbols)
        } else {
            raw
        };
        let m = Arc::new(m);
        self.entries.insert(symbols, Arc::clone(&m));
        m
    }
}
