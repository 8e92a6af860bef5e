use criterion::{black_box, criterion_group, criterion_main, Criterion};
use qrgrid::{Mask, QrCode, QrCodeEcc, Version};

fn bench_encode_short_text(c: &mut Criterion) {
    c.bench_function("encode_text_short_medium", |b| {
        b.iter(|| QrCode::encode_text(black_box("Hello, World!"), QrCodeEcc::Medium).unwrap())
    });
}

fn bench_encode_v40_fixed_mask(c: &mut Criterion) {
    // Near the byte-mode capacity of version 40 / Low.
    let data = vec![0x5Au8; 2900];
    c.bench_function("encode_binary_v40_low_mask0", |b| {
        b.iter(|| {
            QrCode::encode_binary(
                black_box(&data),
                QrCodeEcc::Low,
                Version::new(40),
                Version::new(40),
                Some(Mask::new(0)),
                false,
            )
            .unwrap()
        })
    });
}

fn bench_encode_v40_auto_mask(c: &mut Criterion) {
    // Same payload with the eight-mask penalty search.
    let data = vec![0x5Au8; 2900];
    c.bench_function("encode_binary_v40_low_automask", |b| {
        b.iter(|| {
            QrCode::encode_binary(
                black_box(&data),
                QrCodeEcc::Low,
                Version::new(40),
                Version::new(40),
                None,
                false,
            )
            .unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_encode_short_text,
    bench_encode_v40_fixed_mask,
    bench_encode_v40_auto_mask
);
criterion_main!(benches);
