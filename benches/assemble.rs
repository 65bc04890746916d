use criterion::{black_box, criterion_group, criterion_main, Criterion};
use zasm::{
    assembler::{self, Config},
    spec::isa::Isa,
};

const SAMPLE: &str = include_str!("../asm/test/control.zasm");

fn assemble_sample(c: &mut Criterion) {
    let src = SAMPLE.repeat(64);
    let isa = Isa::get();

    c.bench_function("assemble", |b| {
        b.iter(|| assembler::assemble_with(isa, black_box(&src), Config::default()).unwrap())
    });

    c.bench_function("assemble_padded", |b| {
        b.iter(|| {
            assembler::assemble_with(isa, black_box(&src), Config::with_binary_size(0x4000))
                .unwrap()
        })
    });
}

fn build_isa(c: &mut Criterion) {
    c.bench_function("isa_build", |b| b.iter(Isa::new));
}

criterion_group!(benches, assemble_sample, build_isa);
criterion_main!(benches);
