//! Coder lifecycle: construction, initialization, pooling.
//!
//! A factory owns the parameters shared by every coder it produces
//! (`max_symbols`, `max_symbol_size`, field/header choice) plus a
//! single-consumer free-list of pre-built coders (`Mutex<Vec<T>>`,
//! checkout/release), generalized from raw byte buffers to whole
//! `Decoder`/`Encoder` instances: the pool hands back a coder sized to
//! the factory's maxima, and the caller's `initialize` call narrows
//! `K`/`symbol_size` for that particular use.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::decoder::{Decoder, Variant};
use crate::encoder::Encoder;
use crate::field::Field;

/// Which finite field a coder is parameterized over.
/// Serializable so it can travel in an out-of-band config.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Binary,
    Binary8,
    Binary16,
    Prime2325,
}

/// Which inner Symbol-ID format an encoder writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolIdKind {
    Plain,
    Seed,
    ReedSolomon,
}

/// Parameters shared by every coder a factory produces.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FactoryConfig {
    /// Upper bound on K for any coder this factory produces.
    pub max_symbols: usize,
    /// Upper bound on `symbol_size`; must be a multiple of the
    /// field's word size.
    pub max_symbol_size: usize,
    pub field: FieldKind,
    pub symbol_id: SymbolIdKind,
    /// Default state of the systematic on/off toggle for encoders
    /// built by this factory.
    pub systematic: bool,
    pub variant: DecoderVariantConfig,
}

/// Serializable mirror of [`crate::decoder::Variant`] for use in
/// `FactoryConfig`, since `Variant` itself carries no serde derive
/// (it's an internal-only selector, not wire state).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecoderVariantConfig {
    Forward,
    Delayed,
    Backward,
}

impl From<DecoderVariantConfig> for Variant {
    fn from(v: DecoderVariantConfig) -> Self {
        match v {
            DecoderVariantConfig::Forward => Variant::Forward,
            DecoderVariantConfig::Delayed => Variant::Delayed,
            DecoderVariantConfig::Backward => Variant::Backward,
        }
    }
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            max_symbols: 64,
            max_symbol_size: 1400,
            field: FieldKind::Binary8,
            symbol_id: SymbolIdKind::Plain,
            systematic: true,
            variant: DecoderVariantConfig::Forward,
        }
    }
}

/// Single-consumer free-list of pre-built decoders, reused across
/// `initialize` calls instead of reallocated. A `Mutex` guards only
/// the checkout/check-in boundary; once checked out, a coder is used
/// single-threaded by its owner.
struct CoderPool<T> {
    free: Mutex<Vec<T>>,
}

impl<T> CoderPool<T> {
    fn new() -> Self {
        Self { free: Mutex::new(Vec::new()) }
    }

    fn checkout(&self) -> Option<T> {
        self.free.lock().expect("coder pool mutex poisoned").pop()
    }

    fn release(&self, item: T) {
        self.free.lock().expect("coder pool mutex poisoned").push(item);
    }

    fn len(&self) -> usize {
        self.free.lock().expect("coder pool mutex poisoned").len()
    }
}

/// Owns a [`FactoryConfig`] and a pool of reusable [`Decoder`]
/// instances, all built at the factory's maximum `K`/`symbol_size`.
pub struct DecoderFactory<F: Field> {
    config: FactoryConfig,
    pool: CoderPool<Decoder<F>>,
}

impl<F: Field> DecoderFactory<F> {
    pub fn new(config: FactoryConfig) -> Self {
        assert!(config.max_symbols > 0, "K must be nonzero");
        assert!(config.max_symbol_size > 0);
        log::debug!(
            "decoder factory constructed: max_symbols={} max_symbol_size={}",
            config.max_symbols,
            config.max_symbol_size
        );
        Self { config, pool: CoderPool::new() }
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Number of idle decoders currently sitting in the pool.
    pub fn pooled(&self) -> usize {
        self.pool.len()
    }

    /// Check out a decoder initialized for `symbols`/`symbol_size`
    /// (both must not exceed the factory's maxima), reusing a pooled
    /// instance when one of the right shape is available.
    pub fn build(&self, symbols: usize, symbol_size: usize) -> Decoder<F> {
        assert!(symbols <= self.config.max_symbols);
        assert!(symbol_size <= self.config.max_symbol_size);

        if let Some(mut reused) = self.pool.checkout() {
            if reused.symbols() == symbols && reused.symbol_size() == symbol_size {
                reused.reset();
                return reused;
            }
            // Shape mismatch: drop the reused instance and build fresh
            // rather than threading a resize path through `Decoder`.
        }
        log::trace!("decoder factory allocating new instance (K={symbols})");
        Decoder::new(symbols, symbol_size, self.config.variant.into())
    }

    /// Return a decoder to the pool for reuse by a later `build` call.
    pub fn recycle(&self, decoder: Decoder<F>) {
        self.pool.release(decoder);
    }
}

/// Mirror of [`DecoderFactory`] for the encoder side.
pub struct EncoderFactory<F: Field> {
    config: FactoryConfig,
    pool: CoderPool<Encoder<F>>,
}

impl<F: Field> EncoderFactory<F> {
    pub fn new(config: FactoryConfig) -> Self {
        assert!(config.max_symbols > 0);
        assert!(config.max_symbol_size > 0);
        log::debug!(
            "encoder factory constructed: max_symbols={} max_symbol_size={}",
            config.max_symbols,
            config.max_symbol_size
        );
        Self { config, pool: CoderPool::new() }
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    pub fn pooled(&self) -> usize {
        self.pool.len()
    }

    pub fn build(&self, symbols: usize, symbol_size: usize) -> Encoder<F> {
        assert!(symbols <= self.config.max_symbols);
        assert!(symbol_size <= self.config.max_symbol_size);

        if let Some(mut reused) = self.pool.checkout() {
            if reused.symbols() == symbols && reused.symbol_size() == symbol_size {
                reused.reset();
                return reused;
            }
        }
        log::trace!("encoder factory allocating new instance (K={symbols})");
        Encoder::new(symbols, symbol_size)
    }

    pub fn recycle(&self, encoder: Encoder<F>) {
        self.pool.release(encoder);
    }
}
