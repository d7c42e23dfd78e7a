//! S6: a 342430-byte object, K=16, symbol_size=1400, annex A=4.
//! Checks object coverage, annex bounds, and — after every block's own
//! source symbols are delivered with zero loss but BEFORE any annex
//! forwarding runs — that every block's decoder is still short of
//! completion (its A annex rows are unpivoted). Only once
//! `AnnexTable::propagate_from` has pushed each completed block's
//! symbols out to its dependents, via the reverse-index bit matrix, do
//! all blocks complete and the original object reconstruct exactly.

use std::collections::HashSet;

use rand::RngCore;
use rand_mt::Mt19937GenRand32;

use netcode_core::annex::AnnexTable;
use netcode_core::decoder::{Decoder, Variant};
use netcode_core::field::Binary8;
use netcode_core::partition::Partition;

const OBJECT_SIZE: usize = 342_430;
const MAX_SYMBOLS: usize = 16;
const MAX_SYMBOL_SIZE: usize = 1400;
const ANNEX_SIZE: usize = 4;

#[test]
fn s6_object_partition_and_annex() {
    let mut rng = Mt19937GenRand32::new(2024);
    let mut object = vec![0u8; OBJECT_SIZE];
    rng.fill_bytes(&mut object);

    let partition = Partition::new(OBJECT_SIZE, MAX_SYMBOLS, MAX_SYMBOL_SIZE);
    let blocks: Vec<_> = partition.blocks().collect();

    // Invariant 9: object coverage.
    let total_bytes_used: usize = blocks.iter().map(|b| b.bytes_used).sum();
    assert_eq!(total_bytes_used, OBJECT_SIZE);
    let mut prev_offset = None;
    for b in &blocks {
        if let Some(prev) = prev_offset {
            assert!(b.byte_offset > prev, "byte offsets must strictly increase");
        }
        assert!(b.symbols * b.symbol_size >= b.bytes_used);
        prev_offset = Some(b.byte_offset);
    }

    let table = AnnexTable::build(
        blocks.len(),
        ANNEX_SIZE,
        MAX_SYMBOLS,
        |b| blocks[b].symbols,
        555,
    )
    .expect("annex size must fit within this partitioning's bound");

    // Invariant 10: annex bounds.
    for b in 0..blocks.len() {
        let entries = table.entries_for(b);
        assert_eq!(entries.len(), ANNEX_SIZE);
        let mut seen = HashSet::new();
        for e in entries {
            assert_ne!(e.other_block as usize, b, "annex must never reference its own block");
            assert!(seen.insert((e.other_block, e.symbol)), "annex pairs must be distinct within a block");
        }
    }

    // Build each block's symbol bytes straight out of the object,
    // zero-padding the short tail of the final (possibly partial) block.
    let block_symbol = |b: usize, local_index: usize| -> Vec<u8> {
        let info = blocks[b];
        let mut sym = vec![0u8; info.symbol_size];
        let start = info.byte_offset + local_index * info.symbol_size;
        if start < OBJECT_SIZE {
            let end = (start + info.symbol_size).min(OBJECT_SIZE);
            sym[..end - start].copy_from_slice(&object[start..end]);
        }
        sym
    };

    // Feed every block's own source symbols directly, simulated loss
    // rate 0% — each block's decoder reaches full local rank from its
    // own symbols alone, with its A annex slots still unpivoted.
    let mut decoders: Vec<Decoder<Binary8>> = blocks
        .iter()
        .map(|info| Decoder::new(info.symbols + ANNEX_SIZE, info.symbol_size, Variant::Forward))
        .collect();

    for (b, info) in blocks.iter().enumerate() {
        for local_index in 0..info.symbols {
            let sym = block_symbol(b, local_index);
            decoders[b].decode_uncoded(local_index, &sym);
        }
        assert_eq!(decoders[b].rank(), info.symbols);
        for i in 0..info.symbols {
            assert!(decoders[b].is_uncoded(i));
        }
        // Every block is still short of completion: its A annex rows
        // genuinely depend on the forwarding step below, not on
        // anything delivered so far.
        assert!(
            !decoders[b].is_complete(),
            "block {b} should not be complete before annex forwarding"
        );
    }

    // Forwarding step: drive propagation off the reverse-index bit
    // matrix. Each completed source block pushes its decoded symbols
    // out to every block whose annex depends on it.
    for source in 0..blocks.len() {
        let mut forwards: Vec<(usize, usize, Vec<u8>)> = Vec::new();
        table.propagate_from(source, |dependent, slot, entry| {
            assert!(decoders[source].is_uncoded(entry.symbol as usize));
            let symbol = decoders[source].symbol(entry.symbol as usize).to_vec();
            forwards.push((dependent, slot, symbol));
        });
        for (dependent, slot, symbol) in forwards {
            let local_symbols = blocks[dependent].symbols;
            decoders[dependent].decode_uncoded(local_symbols + slot, &symbol);
        }
    }

    // Propagation is idempotent: running it again changes nothing.
    for source in 0..blocks.len() {
        let mut forwards: Vec<(usize, usize, Vec<u8>)> = Vec::new();
        table.propagate_from(source, |dependent, slot, entry| {
            let symbol = decoders[source].symbol(entry.symbol as usize).to_vec();
            forwards.push((dependent, slot, symbol));
        });
        let ranks_before: Vec<usize> = decoders.iter().map(|d| d.rank()).collect();
        for (dependent, slot, symbol) in forwards {
            let local_symbols = blocks[dependent].symbols;
            decoders[dependent].decode_uncoded(local_symbols + slot, &symbol);
        }
        for (d, &before) in ranks_before.iter().enumerate() {
            assert_eq!(decoders[d].rank(), before);
        }
    }

    for (b, decoder) in decoders.iter().enumerate() {
        assert!(decoder.is_complete(), "block {b} failed to fully complete after annex forwarding");
    }

    // Reconstruct the object and check it matches byte-for-byte.
    let mut reconstructed = vec![0u8; OBJECT_SIZE];
    for (b, info) in blocks.iter().enumerate() {
        for local_index in 0..info.symbols {
            let start = info.byte_offset + local_index * info.symbol_size;
            if start >= OBJECT_SIZE {
                break;
            }
            let end = (start + info.symbol_size).min(OBJECT_SIZE);
            let sym = decoders[b].symbol(local_index);
            reconstructed[start..end].copy_from_slice(&sym[..end - start]);
        }
    }
    assert_eq!(reconstructed, object);
}
