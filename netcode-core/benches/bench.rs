use criterion::{criterion_group, criterion_main, Criterion};

use netcode_core::decoder::{Decoder, Variant};
use netcode_core::field::{Binary8, Field};
use netcode_core::generator::{Generator, UniformGenerator};

fn bench_decode(c: &mut Criterion) {
    const K: usize = 32;
    const SYMBOL_SIZE: usize = 1400;

    c.bench_function("forward decode to completion", |b| {
        b.iter(|| {
            let mut decoder: Decoder<Binary8> = Decoder::new(K, SYMBOL_SIZE, Variant::Forward);
            let mut gen: UniformGenerator<Binary8> = UniformGenerator::new(K, 1);
            let mut received = 0;
            while !decoder.is_complete() && received < K * 3 {
                let mut coeffs = vec![0u8; Binary8::coefficients_size(K)];
                gen.generate(&mut coeffs);
                let mut symbol = vec![0xabu8; SYMBOL_SIZE];
                decoder.decode_coded(&mut symbol, &mut coeffs);
                received += 1;
            }
            decoder
        });
    });
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
