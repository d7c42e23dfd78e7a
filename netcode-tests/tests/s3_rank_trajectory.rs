//! S3: GF(2^8), K=5, symbol_size=16. A fixed sequence of coefficient
//! patterns (one of them a systematic-tagged index, one a dependent
//! duplicate) drives a forward decoder through a specific rank
//! trajectory: 1, 2, 3, 4, 4, 5 — completion only after the sixth
//! injection.

use netcode_core::decoder::{Decoder, Variant};
use netcode_core::field::{Binary8, Field};

const K: usize = 5;
const SYMBOL_SIZE: usize = 16;

fn pattern_coeffs(bits: &str) -> Vec<u8> {
    assert_eq!(bits.len(), K);
    let mut v = vec![0u8; Binary8::coefficients_size(K)];
    for (i, c) in bits.chars().enumerate() {
        let bit = if c == '1' { 1 } else { 0 };
        Binary8::set_coefficient(&mut v, i, bit);
    }
    v
}

fn symbol(tag: u8) -> Vec<u8> {
    vec![tag; SYMBOL_SIZE]
}

#[test]
fn s3_rank_trajectory() {
    let mut decoder: Decoder<Binary8> = Decoder::new(K, SYMBOL_SIZE, Variant::Forward);
    let expected_ranks = [1usize, 2, 3, 4, 4, 5];

    // Row 1: 01100
    let mut c = pattern_coeffs("01100");
    let mut s = symbol(1);
    decoder.decode_coded(&mut s, &mut c);
    assert_eq!(decoder.rank(), expected_ranks[0]);
    assert!(!decoder.is_complete());

    // Row 2: 11000
    let mut c = pattern_coeffs("11000");
    let mut s = symbol(2);
    decoder.decode_coded(&mut s, &mut c);
    assert_eq!(decoder.rank(), expected_ranks[1]);

    // Row 3: systematic-tagged index=2
    decoder.decode_uncoded(2, &symbol(3));
    assert_eq!(decoder.rank(), expected_ranks[2]);

    // Row 4: 11101
    let mut c = pattern_coeffs("11101");
    let mut s = symbol(4);
    decoder.decode_coded(&mut s, &mut c);
    assert_eq!(decoder.rank(), expected_ranks[3]);

    // Row 5: duplicate 11101 — linearly dependent, rank unchanged.
    let mut c = pattern_coeffs("11101");
    let mut s = symbol(4);
    let pivoted = decoder.decode_coded(&mut s, &mut c);
    assert!(!pivoted);
    assert_eq!(decoder.rank(), expected_ranks[4]);
    assert!(!decoder.is_complete());

    // Row 6: 01110 — the final independent row.
    let mut c = pattern_coeffs("01110");
    let mut s = symbol(5);
    let pivoted = decoder.decode_coded(&mut s, &mut c);
    assert!(pivoted);
    assert_eq!(decoder.rank(), expected_ranks[5]);
    assert!(decoder.is_complete());
}
