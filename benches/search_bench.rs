use criterion::{criterion_group, criterion_main, Criterion, black_box};
use pieothello::board::{Board, Cell};
use pieothello::search::Searcher;

fn bench_search(c: &mut Criterion) {
    let b = Board::new();
    for depth in [3u32, 4, 5] {
        c.bench_function(&format!("search_depth_{}_opening", depth), |ben| {
            ben.iter(|| {
                let mut s = Searcher::seeded(1);
                let r = s.find_best_move(black_box(&b), Cell::Black, depth);
                black_box((r, s.nodes()))
            })
        });
    }
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
