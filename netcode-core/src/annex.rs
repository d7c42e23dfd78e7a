//! Random-annex overlap: cross-block symbol references that give
//! otherwise-independent block decoders overlap, enabling decoding
//! progress in one block to propagate into its neighbors via
//! [`AnnexTable::propagate_from`].

use std::collections::HashSet;

use rand_mt::Mt19937GenRand32;

use crate::error::NetCodeError;

/// One cross-block reference: block `b`'s annex includes symbol
/// `symbol` of block `other_block`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnnexEntry {
    pub other_block: u32,
    pub symbol: u32,
}

/// Maximum annex size admissible for a partitioning with `total_symbols`
/// symbols over blocks of at most `max_symbols`.
pub fn max_annex_size(total_symbols: usize, max_symbols: usize) -> usize {
    let a = total_symbols.saturating_sub(max_symbols);
    let b = max_symbols.saturating_sub(1);
    if a > 0 && b > 0 {
        a.min(b)
    } else {
        0
    }
}

/// The annex table for one partitioned object: for every block, the
/// set of `(other_block, symbol)` pairs included for overlap, plus the
/// reverse-index bit matrix used during decoding propagation.
pub struct AnnexTable {
    blocks: usize,
    annex_size: usize,
    entries: Vec<Vec<AnnexEntry>>,
    /// `reverse_index[b][d]` is true if block `d` has an annex entry
    /// whose source is block `b`.
    reverse_index: Vec<Vec<bool>>,
}

impl AnnexTable {
    /// Build the table by drawing, for every block, `annex_size`
    /// distinct `(other_block, symbol_index)` pairs.
    /// `symbols_in_block(b)` must return `symbols(b)` as defined by
    /// the object's partitioning.
    pub fn build(
        blocks: usize,
        annex_size: usize,
        max_symbols: usize,
        symbols_in_block: impl Fn(usize) -> usize,
        seed: u32,
    ) -> Result<Self, NetCodeError> {
        let total_symbols: usize = (0..blocks).map(&symbols_in_block).sum();
        let max = max_annex_size(total_symbols, max_symbols);
        if annex_size > max {
            return Err(NetCodeError::AnnexTooLarge { requested: annex_size as u32, max: max as u32 });
        }

        let mut rng = Mt19937GenRand32::new(seed);
        let mut entries = vec![Vec::with_capacity(annex_size); blocks];
        let mut reverse_index = vec![vec![false; blocks]; blocks];

        for b in 0..blocks {
            let mut seen: HashSet<(u32, u32)> = HashSet::new();
            while seen.len() < annex_size {
                let other_block = select_block(&mut rng, blocks, b);
                let other_symbols = symbols_in_block(other_block);
                let symbol = select_symbol(&mut rng, other_symbols);
                if seen.insert((other_block as u32, symbol as u32)) {
                    entries[b].push(AnnexEntry { other_block: other_block as u32, symbol: symbol as u32 });
                    reverse_index[other_block][b] = true;
                }
            }
        }

        Ok(Self { blocks, annex_size, entries, reverse_index })
    }

    pub fn blocks(&self) -> usize {
        self.blocks
    }

    pub fn annex_size(&self) -> usize {
        self.annex_size
    }

    pub fn entries_for(&self, block: usize) -> &[AnnexEntry] {
        &self.entries[block]
    }

    /// True if block `d` has an annex entry whose source is block `b`.
    pub fn depends_on(&self, d: usize, b: usize) -> bool {
        self.reverse_index[b][d]
    }

    pub fn dependents_of(&self, b: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.blocks).filter(move |&d| self.reverse_index[b][d])
    }

    /// Drive decoding propagation out of a newly-completed block
    /// `source`: for every dependent block `d` (`depends_on(d, source)`)
    /// and every one of `d`'s annex entries actually sourced from
    /// `source`, call `inject(d, slot, entry)` — `slot` is `entry`'s
    /// position within `entries_for(d)`, i.e. the annex row to fill —
    /// so the caller can carry the corresponding symbol from `source`'s
    /// decoder into `d`'s.
    pub fn propagate_from<Inject>(&self, source: usize, mut inject: Inject)
    where
        Inject: FnMut(usize, usize, &AnnexEntry),
    {
        for d in self.dependents_of(source) {
            for (slot, entry) in self.entries_for(d).iter().enumerate() {
                if entry.other_block as usize == source {
                    inject(d, slot, entry);
                }
            }
        }
    }
}

/// Draw a block index uniformly from `{0..blocks-1} \ {exclude}` using
/// the index-shift trick: draw in `[0, blocks-2]`, then `+1` if the
/// draw lands at or above `exclude`.
fn select_block(rng: &mut Mt19937GenRand32, blocks: usize, exclude: usize) -> usize {
    debug_assert!(blocks > 1);
    let draw = uniform(rng, (blocks - 1) as u32) as usize;
    if draw >= exclude {
        draw + 1
    } else {
        draw
    }
}

/// Draw a symbol index uniformly from `0..symbols-1`.
fn select_symbol(rng: &mut Mt19937GenRand32, symbols: usize) -> usize {
    uniform(rng, symbols as u32) as usize
}

/// Uniform draw in `[0, bound)` via rejection sampling to avoid modulo
/// bias, matching the generator's own treatment of non-power-of-two
/// ranges.
fn uniform(rng: &mut Mt19937GenRand32, bound: u32) -> u32 {
    use rand::RngCore;
    debug_assert!(bound > 0);
    let limit = (u32::MAX / bound) * bound;
    loop {
        let v = rng.next_u32();
        if v < limit {
            return v % bound;
        }
    }
}
