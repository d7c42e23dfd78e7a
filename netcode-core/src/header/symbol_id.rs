//! Inner Symbol-ID formats: how a coded packet's
//! coefficient vector is named on the wire.

use crate::error::NetCodeError;
use crate::field::Field;

/// The coefficient vector itself. Reader exposes a slice straight
/// into the header as the coefficients buffer — callers that need
/// alignment should route it through
/// [`ensure_aligned`](super::ensure_aligned).
pub struct PlainSymbolId;

impl PlainSymbolId {
    pub fn header_size<F: Field>(symbols: usize) -> usize {
        F::coefficients_size(symbols)
    }

    pub fn write(header: &mut Vec<u8>, coefficients: &[u8]) {
        header.extend_from_slice(coefficients);
    }

    pub fn read(header: &[u8]) -> &[u8] {
        header
    }
}

/// A 4-byte big-endian seed. The reader re-seeds its generator,
/// generates into an aligned buffer, and exposes that as the
/// coefficients — seed decoders do not support downstream recoding,
/// since the seed alone can't reproduce an arbitrary recoded vector.
pub struct SeedSymbolId;

impl SeedSymbolId {
    pub const HEADER_SIZE: usize = 4;

    pub fn write(header: &mut Vec<u8>, seed: u32) {
        header.extend_from_slice(&seed.to_be_bytes());
    }

    pub fn read(header: &[u8]) -> u32 {
        u32::from_be_bytes(header[..Self::HEADER_SIZE].try_into().unwrap())
    }
}

/// A `W`-byte big-endian row index into the cached generator matrix.
/// The writer emits the current encoded-symbol count; encoding is
/// therefore not rateless — `row_index` must stay below `order - 1`
/// at the encoder.
pub struct ReedSolomonSymbolId {
    row_index_bytes: usize,
}

impl ReedSolomonSymbolId {
    pub fn new(row_index_bytes: usize) -> Self {
        Self { row_index_bytes }
    }

    pub fn header_size(&self) -> usize {
        self.row_index_bytes
    }

    /// Write `row_index`, rejecting it once it reaches `limit` (the
    /// generator matrix's `order - 1`): past that point there are no
    /// further distinct rows left to draw from.
    pub fn write(&self, header: &mut Vec<u8>, row_index: u64, limit: u64) -> Result<(), NetCodeError> {
        if row_index >= limit {
            return Err(NetCodeError::RowIndexOutOfRange { index: row_index, limit });
        }
        let full = row_index.to_be_bytes();
        header.extend_from_slice(&full[8 - self.row_index_bytes..]);
        Ok(())
    }

    pub fn read(&self, header: &[u8]) -> u64 {
        let mut full = [0u8; 8];
        full[8 - self.row_index_bytes..].copy_from_slice(&header[..self.row_index_bytes]);
        u64::from_be_bytes(full)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Binary8;

    #[test]
    fn plain_symbol_id_round_trips() {
        let coeffs = [1u8, 2, 3, 4];
        let mut header = Vec::new();
        PlainSymbolId::write(&mut header, &coeffs);
        assert_eq!(PlainSymbolId::read(&header), &coeffs);
        assert_eq!(PlainSymbolId::header_size::<Binary8>(4), 4);
    }

    #[test]
    fn seed_symbol_id_round_trips() {
        let mut header = Vec::new();
        SeedSymbolId::write(&mut header, 0xDEAD_BEEF);
        assert_eq!(SeedSymbolId::read(&header), 0xDEAD_BEEF);
    }

    #[test]
    fn reed_solomon_symbol_id_round_trips_narrow_width() {
        let id = ReedSolomonSymbolId::new(2);
        let mut header = Vec::new();
        id.write(&mut header, 300, 1 << 16).unwrap();
        assert_eq!(header.len(), 2);
        assert_eq!(id.read(&header), 300);
    }

    #[test]
    fn reed_solomon_symbol_id_rejects_row_index_at_or_past_limit() {
        let id = ReedSolomonSymbolId::new(2);
        let mut header = Vec::new();
        let err = id.write(&mut header, 255, 255).unwrap_err();
        match err {
            NetCodeError::RowIndexOutOfRange { index, limit } => {
                assert_eq!(index, 255);
                assert_eq!(limit, 255);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(header.is_empty());
    }
}
