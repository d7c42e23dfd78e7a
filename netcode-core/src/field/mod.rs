//! Finite-field arithmetic contract.
//!
//! Every field used by the codec core implements [`Field`]. Byte
//! buffers passed to these operations are always the raw wire
//! representation of a vector of field elements — for [`Binary`] that
//! is a packed bit-vector, for the others one element per 1/2/4 bytes.

mod binary;
mod binary16;
mod binary8;
mod prime2325;

pub use binary::Binary;
pub use binary16::Binary16;
pub use binary8::Binary8;
pub use prime2325::Prime2325;

use std::cell::Cell;

/// A finite field `GF(order)` together with the operations the rest of
/// the codec needs on vectors of its elements.
///
/// `dst`/`src` buffers are the raw byte encoding of a vector of
/// [`Field::Elem`]; their lengths must agree and must be a multiple of
/// `size_of::<Elem>()` for every field except [`Binary`], where the
/// packing is sub-byte. Callers violating the length contract, or
/// calling [`Field::invert`] on zero, trigger a debug assertion —
/// these are programming errors, not recoverable ones.
pub trait Field {
    /// Machine word holding a single field element.
    type Elem: Copy + Default + PartialEq + std::fmt::Debug;

    /// Field cardinality.
    const ORDER: u64;

    /// `true` for GF(2), where multiplication/addition coincide with
    /// XOR and scalar multiplication is absent.
    const IS_BINARY: bool;

    /// `dst ← dst + src`, element-wise. XOR for characteristic-2 fields.
    fn add(dst: &mut [u8], src: &[u8]);

    /// `dst ← dst − src`, element-wise. Identical to `add` for
    /// characteristic-2 fields.
    fn subtract(dst: &mut [u8], src: &[u8]);

    /// `dst ← c · dst`. No-op for [`Binary`] — binary callers must
    /// route scalar-one multiplications through `add`/`subtract`.
    fn multiply(dst: &mut [u8], c: Self::Elem);

    /// `dst ← dst + c·src`.
    fn multiply_add(dst: &mut [u8], src: &[u8], c: Self::Elem);

    /// `dst ← dst − c·src`. `dst` and `src` must not alias.
    fn multiply_subtract(dst: &mut [u8], src: &[u8], c: Self::Elem);

    /// Multiplicative inverse. `v` must be nonzero.
    fn invert(v: Self::Elem) -> Self::Elem;

    /// Read the coefficient at `index` out of a packed coefficient
    /// vector.
    fn coefficient(vector: &[u8], index: usize) -> Self::Elem;

    /// Write the coefficient at `index` into a packed coefficient
    /// vector.
    fn set_coefficient(vector: &mut [u8], index: usize, value: Self::Elem);

    /// Number of bytes needed to pack `elements` coefficients.
    fn coefficients_size(elements: usize) -> usize;

    /// `true` if `v` is the additive identity.
    fn is_zero(v: Self::Elem) -> bool;

    /// The additive identity.
    fn zero() -> Self::Elem;

    /// The multiplicative identity.
    fn one() -> Self::Elem;

    /// Narrow a raw 32-bit random draw down to a valid field element
    /// (mask to the field's word width, or reduce modulo its order),
    /// used by generators before packing the result via
    /// `set_coefficient`.
    fn element_from_u32(v: u32) -> Self::Elem;
}

/// Per-operation invocation counters, reset on `reset_counts`.
///
/// One counter per [`Field`] operation: add, subtract,
/// multiply, multiply_add, multiply_subtract, invert, in that order.
#[derive(Default)]
pub struct OperationCounts {
    counts: Cell<[u64; 6]>,
}

impl OperationCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&self) {
        self.counts.set([0; 6]);
    }

    pub fn get(&self) -> [u64; 6] {
        self.counts.get()
    }

    fn bump(&self, idx: usize) {
        let mut c = self.counts.get();
        c[idx] += 1;
        self.counts.set(c);
    }
}

/// Wraps any [`Field`] implementation, counting invocations of each
/// of the six operations without altering their semantics.
pub struct CountingField<F: Field> {
    _marker: std::marker::PhantomData<F>,
}

impl<F: Field> CountingField<F> {
    pub fn counts_for(counts: &OperationCounts) -> [u64; 6] {
        counts.get()
    }
}

/// Thread-local-free counting decorator: call sites own an
/// `OperationCounts` and pass it alongside calls into this module's
/// free functions, since `Field` itself is a zero-sized dispatch tag
/// and cannot hold per-instance state.
pub mod counting {
    use super::{Field, OperationCounts};

    pub fn add<F: Field>(counts: &OperationCounts, dst: &mut [u8], src: &[u8]) {
        counts.bump(0);
        F::add(dst, src);
    }

    pub fn subtract<F: Field>(counts: &OperationCounts, dst: &mut [u8], src: &[u8]) {
        counts.bump(1);
        F::subtract(dst, src);
    }

    pub fn multiply<F: Field>(counts: &OperationCounts, dst: &mut [u8], c: F::Elem) {
        counts.bump(2);
        F::multiply(dst, c);
    }

    pub fn multiply_add<F: Field>(counts: &OperationCounts, dst: &mut [u8], src: &[u8], c: F::Elem) {
        counts.bump(3);
        F::multiply_add(dst, src, c);
    }

    pub fn multiply_subtract<F: Field>(
        counts: &OperationCounts,
        dst: &mut [u8],
        src: &[u8],
        c: F::Elem,
    ) {
        counts.bump(4);
        F::multiply_subtract(dst, src, c);
    }

    pub fn invert<F: Field>(counts: &OperationCounts, v: F::Elem) -> F::Elem {
        counts.bump(5);
        F::invert(v)
    }
}
