//! Ambient error type for this crate: one `thiserror` enum
//! implementing the workspace-wide fault marker trait.
//!
//! Linear dependence and zero recoder output are deliberately absent
//! here — they are not errors, just ordinary `Ok`/no-op outcomes.

use netcode_error::NetCodeFault;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetCodeError {
    #[error("encoder rank regressed: observed {observed} after {previous}")]
    RankRegressed { previous: u32, observed: u32 },

    #[error("reed-solomon row index {index} is out of range (order-1={limit})")]
    RowIndexOutOfRange { index: u64, limit: u64 },

    #[error("requested annex size {requested} exceeds the maximum {max} for this partitioning")]
    AnnexTooLarge { requested: u32, max: u32 },
}

impl NetCodeFault for NetCodeError {}
