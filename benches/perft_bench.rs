use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fortuna::board::Position;
use fortuna::perft::perft;

const KIWIPETE: &str =
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn bench_perft(c: &mut Criterion) {
    c.bench_function("perft_startpos_depth_4", |ben| {
        let base = Position::startpos();
        ben.iter(|| {
            let mut pos = base.clone();
            black_box(perft(black_box(&mut pos), 4))
        })
    });

    c.bench_function("perft_kiwipete_depth_3", |ben| {
        let base = Position::from_fen(KIWIPETE).expect("valid fen");
        ben.iter(|| {
            let mut pos = base.clone();
            black_box(perft(black_box(&mut pos), 3))
        })
    });

    c.bench_function("legal_moves_startpos", |ben| {
        let base = Position::startpos();
        ben.iter(|| {
            let mut pos = base.clone();
            black_box(pos.legal_moves().len())
        })
    });
}

criterion_group!(benches, bench_perft);
criterion_main!(benches);
