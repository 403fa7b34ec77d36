use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fortuna::board::Position;
use fortuna::search::Searcher;

fn bench_search(c: &mut Criterion) {
    c.bench_function("search_depth_4_startpos", |ben| {
        let base = Position::startpos();
        ben.iter(|| {
            let mut pos = base.clone();
            let mut s = Searcher::default();
            let r = s.find_best_move(black_box(&mut pos), 4);
            black_box(r.nodes)
        })
    });

    c.bench_function("search_depth_3_middlegame", |ben| {
        let base = Position::from_fen(
            "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
        )
        .expect("valid fen");
        ben.iter(|| {
            let mut pos = base.clone();
            let mut s = Searcher::default();
            let r = s.find_best_move(black_box(&mut pos), 3);
            black_box(r.nodes)
        })
    });

    c.bench_function("evaluate_startpos", |ben| {
        let base = Position::startpos();
        ben.iter(|| {
            let mut pos = base.clone();
            black_box(fortuna::search::eval::evaluate(&mut pos))
        })
    });
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
