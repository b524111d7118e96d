use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use daydreamer::board::Board;
use daydreamer::defs::{FEN_KIWIPETE_POSITION, FEN_START_POSITION};
use daydreamer::movegen::defs::{MoveList, MoveType};
use daydreamer::movegen::MoveGenerator;

fn perft(board: &mut Board, mg: &MoveGenerator, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut list = MoveList::new();
    mg.generate_moves(board, &mut list, MoveType::All);
    let mut nodes = 0;
    for i in 0..list.len() {
        let mv = list.get_move(i);
        if board.make(mv) {
            nodes += perft(board, mg, depth - 1);
            board.unmake();
        }
    }
    nodes
}

fn bench_perft(c: &mut Criterion) {
    let mg = MoveGenerator::new();
    let mut group = c.benchmark_group("perft");

    for (fen, name, depth) in [
        (FEN_START_POSITION, "start", 4u8),
        (FEN_KIWIPETE_POSITION, "kiwipete", 3u8),
    ] {
        let mut board = Board::new();
        board.set_from_fen(fen).expect("valid FEN");

        group.bench_with_input(BenchmarkId::new("perft", name), &depth, |b, &depth| {
            b.iter(|| black_box(perft(&mut board, &mg, depth)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_perft);
criterion_main!(benches);
