//! Network coding codec core: finite-field arithmetic, the linear-block
//! decoder/encoder state machines, coefficient generators, coding-header
//! framing, object partitioning, and the random-annex overlap scheme.
//!
//! The pipeline is realized here as one layer per module, mirroring a
//! classic template-stack network coding library collapsed from
//! compile-time C++ layering into Rust modules and traits:
//!
//! `field` (arithmetic) → `storage` (symbol/coefficient buffers) →
//! `generator` (coefficient generation) → `vandermonde` (Reed-Solomon
//! matrices) → `encoder` / `decoder` (the codec core) → `header` /
//! `payload` (wire framing) → `partition` / `annex` (object-level
//! splitting and cross-block overlap) → `recoder` (proxy encoding over a
//! decoder's state) → `factory` (coder lifecycle and pooling).

pub mod annex;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod factory;
pub mod field;
pub mod generator;
pub mod header;
pub mod partition;
pub mod payload;
pub mod recoder;
pub mod storage;
pub mod vandermonde;

pub use error::NetCodeError;
