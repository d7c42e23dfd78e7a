//! Payload framing and the rank-piggyback layer.
//!
//! Wire layout: `[symbol_data (symbol_size) | header (H)]`, where `H`
//! optionally starts with a 4-byte big-endian encoder-rank prefix
//! ahead of whatever the systematic/non-systematic framer writes.

use crate::error::NetCodeError;

/// Size in bytes of the rank-piggyback prefix.
pub const RANK_PREFIX_SIZE: usize = 4;

/// Prepends a 4-byte big-endian rank value to the outer payload.
pub struct RankEncoder {
    rank: u32,
}

impl RankEncoder {
    pub fn new() -> Self {
        Self { rank: 0 }
    }

    /// Update the advertised rank. Must not decrease — the rank
    /// reported on the wire tracks a monotonically growing encoder
    /// state.
    pub fn set_rank(&mut self, rank: u32) {
        debug_assert!(rank >= self.rank, "encoder rank must not regress");
        self.rank = rank;
    }

    pub fn rank(&self) -> u32 {
        self.rank
    }

    pub fn write(&self, payload: &mut Vec<u8>) {
        payload.extend_from_slice(&self.rank.to_be_bytes());
    }
}

impl Default for RankEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts the rank prefix and tracks the observed `encoder_rank`,
/// rejecting a regression — the rank arrives over the wire, so a
/// decrease is a peer/transport fault rather than a programmer error.
pub struct RankDecoder {
    encoder_rank: u32,
}

impl RankDecoder {
    pub fn new() -> Self {
        Self { encoder_rank: 0 }
    }

    pub fn encoder_rank(&self) -> u32 {
        self.encoder_rank
    }

    /// Split the rank prefix off `payload`, returning the remainder
    /// and updating the tracked `encoder_rank`.
    pub fn read<'a>(&mut self, payload: &'a [u8]) -> Result<&'a [u8], NetCodeError> {
        let (prefix, rest) = payload.split_at(RANK_PREFIX_SIZE);
        let rank = u32::from_be_bytes(prefix.try_into().unwrap());
        if rank < self.encoder_rank {
            return Err(NetCodeError::RankRegressed { previous: self.encoder_rank, observed: rank });
        }
        self.encoder_rank = rank;
        Ok(rest)
    }
}

impl Default for RankDecoder {
    fn default() -> Self {
        Self::new()
    }
}
