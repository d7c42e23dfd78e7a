//! RFC 5052 object partitioning: splitting a byte object into blocks
//! of at most `max_symbols` symbols each, with near-even sizing
//! between large and small blocks.

/// One block's placement within the partitioned object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockInfo {
    pub symbols: usize,
    pub symbol_size: usize,
    pub byte_offset: usize,
    pub bytes_used: usize,
}

/// Splits an object of `object_size` bytes into blocks of at most
/// `max_symbols` symbols of `max_symbol_size` bytes each, following
/// RFC 5052: large blocks (one extra symbol) come before small blocks,
/// and every block but the last is fully used.
pub struct Partition {
    total_symbols: usize,
    total_blocks: usize,
    large_block_symbols: usize,
    small_block_symbols: usize,
    large_blocks: usize,
    max_symbol_size: usize,
    object_size: usize,
}

impl Partition {
    pub fn new(object_size: usize, max_symbols: usize, max_symbol_size: usize) -> Self {
        assert!(object_size > 0);
        assert!(max_symbols > 0);
        assert!(max_symbol_size > 0);

        let total_symbols = (object_size - 1) / max_symbol_size + 1;
        let total_blocks = (total_symbols - 1) / max_symbols + 1;
        let large_block_symbols = (total_symbols - 1) / total_blocks + 1;
        let small_block_symbols = total_symbols / total_blocks;
        let large_blocks = total_symbols - small_block_symbols * total_blocks;

        Self {
            total_symbols,
            total_blocks,
            large_block_symbols,
            small_block_symbols,
            large_blocks,
            max_symbol_size,
            object_size,
        }
    }

    pub fn total_symbols(&self) -> usize {
        self.total_symbols
    }

    pub fn total_blocks(&self) -> usize {
        self.total_blocks
    }

    fn symbols_in(&self, block: usize) -> usize {
        if block < self.large_blocks {
            self.large_block_symbols
        } else {
            self.small_block_symbols
        }
    }

    fn byte_offset(&self, block: usize) -> usize {
        let large = block.min(self.large_blocks);
        let small = block - large;
        (large * self.large_block_symbols + small * self.small_block_symbols) * self.max_symbol_size
    }

    pub fn block(&self, block: usize) -> BlockInfo {
        assert!(block < self.total_blocks);
        let symbols = self.symbols_in(block);
        let byte_offset = self.byte_offset(block);
        let bytes_used = (self.object_size - byte_offset).min(symbols * self.max_symbol_size);
        BlockInfo { symbols, symbol_size: self.max_symbol_size, byte_offset, bytes_used }
    }

    pub fn blocks(&self) -> impl Iterator<Item = BlockInfo> + '_ {
        (0..self.total_blocks).map(move |b| self.block(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_block_fits_wholly() {
        let p = Partition::new(100, 16, 10);
        assert_eq!(p.total_symbols(), 10);
        assert_eq!(p.total_blocks(), 1);
        let b = p.block(0);
        assert_eq!(b.symbols, 10);
        assert_eq!(b.bytes_used, 100);
        assert_eq!(b.byte_offset, 0);
    }

    #[test]
    fn large_blocks_precede_small_blocks() {
        // 10 symbols over 3 blocks of max 4 each -> large=4 (2 blocks worth
        // covers total_symbols/total_blocks rounding): total_blocks=3,
        // large_block_symbols=4, small_block_symbols=3, large_blocks=1.
        let p = Partition::new(10 * 7, 4, 7);
        assert_eq!(p.total_symbols(), 10);
        assert_eq!(p.total_blocks(), 3);
        let sizes: Vec<usize> = p.blocks().map(|b| b.symbols).collect();
        assert_eq!(sizes, vec![4, 3, 3]);
    }

    #[test]
    fn bytes_used_sums_to_object_size_with_partial_last_block() {
        let object_size = 342430usize;
        let p = Partition::new(object_size, 16, 1400);
        let sum: usize = p.blocks().map(|b| b.bytes_used).sum();
        assert_eq!(sum, object_size);
        let last = p.block(p.total_blocks() - 1);
        assert!(last.bytes_used <= last.symbols * last.symbol_size);
    }

    #[test]
    fn byte_offsets_are_contiguous_prefix_sums() {
        let p = Partition::new(10 * 7, 4, 7);
        let mut expect = 0usize;
        for b in p.blocks() {
            assert_eq!(b.byte_offset, expect);
            expect += b.symbols * b.symbol_size;
        }
    }
}
