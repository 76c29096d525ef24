use criterion::{criterion_group, criterion_main, Criterion, black_box};
use pieothello::board::{Board, Cell};
use pieothello::perft::perft;

fn bench_board(c: &mut Criterion) {
    c.bench_function("perft_5_opening", |ben| {
        let mut b = Board::new();
        ben.iter(|| black_box(perft(&mut b, Cell::Black, 5)))
    });
    c.bench_function("legal_moves_opening", |ben| {
        let mut b = Board::new();
        ben.iter(|| black_box(b.legal_moves(black_box(Cell::Black))))
    });
    c.bench_function("apply_undo", |ben| {
        let mut b = Board::new();
        ben.iter(|| {
            let r = b.apply_move(black_box(2), black_box(4), Cell::Black);
            b.undo_move();
            black_box(r)
        })
    });
}

criterion_group!(benches, bench_board);
criterion_main!(benches);
