use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use daydreamer::board::Board;
use daydreamer::defs::FEN_START_POSITION;
use daydreamer::evaluation::Evaluator;
use daydreamer::movegen::defs::{MoveList, MoveType};
use daydreamer::movegen::MoveGenerator;

const TEST_POSITIONS: &[(&str, &str)] = &[
    (FEN_START_POSITION, "Starting Position"),
    (
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
        "After 1.e4",
    ),
    (
        "rnbqkb1r/pppp1ppp/5n2/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 2 3",
        "Petrov Defense",
    ),
    (
        "r2q1rk1/ppp2ppp/2np1n2/2b1p1B1/2B1P3/3P1N2/PPP2PPP/RN1Q1RK1 w - - 0 9",
        "Complex Middlegame",
    ),
    ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", "King and Pawn Endgame"),
    ("8/8/8/8/8/8/8/K7 w - - 0 1", "Lone King"),
];

fn setup_position(fen: &str) -> (Board, MoveGenerator, Evaluator) {
    let mut board = Board::new();
    board.set_from_fen(fen).expect("valid FEN");
    (board, MoveGenerator::new(), Evaluator::new())
}

fn bench_evaluation_positions(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluation_positions");
    for (fen, name) in TEST_POSITIONS {
        let (board, _mg, mut eval) = setup_position(fen);
        group.bench_with_input(BenchmarkId::new("evaluate", name), fen, |b, _| {
            b.iter(|| black_box(eval.evaluate(&board)));
        });
    }
    group.finish();
}

fn bench_evaluation_search_simulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluation_search_simulation");
    let (mut board, mg, mut eval) =
        setup_position("r2q1rk1/ppp2ppp/2np1n2/2b1p1B1/2B1P3/3P1N2/PPP2PPP/RN1Q1RK1 w - - 0 9");

    group.bench_function("search_tree_simulation", |b| {
        b.iter(|| {
            let mut moves = MoveList::new();
            mg.generate_moves(&board, &mut moves, MoveType::All);
            for i in 0..std::cmp::min(5, moves.len()) {
                let mv = moves.get_move(i);
                if board.make(mv) {
                    black_box(eval.evaluate(&board));

                    let mut counter_moves = MoveList::new();
                    mg.generate_moves(&board, &mut counter_moves, MoveType::All);
                    for j in 0..std::cmp::min(3, counter_moves.len()) {
                        let counter_mv = counter_moves.get_move(j);
                        if board.make(counter_mv) {
                            black_box(eval.evaluate(&board));
                            board.unmake();
                        }
                    }
                    board.unmake();
                }
            }
        });
    });
    group.finish();
}

fn bench_evaluation_game_phases(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluation_game_phases");
    let phases = [
        (
            "Opening",
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2",
        ),
        (
            "Middlegame",
            "r2q1rk1/ppp2ppp/2np1n2/2b1p1B1/2B1P3/3P1N2/PPP2PPP/RN1Q1RK1 w - - 0 9",
        ),
        ("Endgame", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"),
        ("Late Endgame", "8/8/8/8/8/3k4/8/3K4 w - - 0 1"),
    ];

    for (phase_name, fen) in &phases {
        let (board, _mg, mut eval) = setup_position(fen);
        group.bench_with_input(BenchmarkId::new("evaluation", phase_name), phase_name, |b, _| {
            b.iter(|| black_box(eval.evaluate(&board)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_evaluation_positions,
    bench_evaluation_search_simulation,
    bench_evaluation_game_phases
);
criterion_main!(benches);
