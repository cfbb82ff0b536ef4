use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chess_rules::game_state::chess_types::GameState;
use chess_rules::search::board_scoring::StandardScorer;
use chess_rules::search::iterative_deepening::{
    iterative_deepening_search, SearchAlgorithm, SearchConfig,
};

#[derive(Clone, Copy)]
struct SearchCase {
    name: &'static str,
    fen: &'static str,
}

const CASES: &[SearchCase] = &[
    SearchCase {
        name: "startpos",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    },
    SearchCase {
        name: "classical_mid",
        fen: "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
    },
    SearchCase {
        name: "tactical",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    },
    SearchCase {
        name: "end_kpk",
        fen: "8/8/8/8/8/4k3/4P3/4K3 w - - 0 1",
    },
];

fn bench_search(c: &mut Criterion) {
    let depth = std::env::var("CHESS_RULES_SEARCH_DEPTH")
        .ok()
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(3)
        .max(1);

    let mut group = c.benchmark_group("search");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(10);

    for (algorithm, label, case_depth) in [
        (SearchAlgorithm::AlphaBeta, "alphabeta", depth),
        (SearchAlgorithm::Minimax, "minimax", depth.min(2)),
    ] {
        let config = SearchConfig {
            max_depth: case_depth,
            move_time: None,
            algorithm,
        };

        for case in CASES {
            let game = GameState::from_fen(case.fen).expect("benchmark FEN should parse");
            group.bench_with_input(
                BenchmarkId::new(format!("{label}_{}", case.name), format!("d{case_depth}")),
                &game,
                |b, game| {
                    b.iter(|| {
                        let mut state = game.clone();
                        let result =
                            iterative_deepening_search(black_box(&mut state), &StandardScorer, config);
                        black_box(result.best_move)
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(search_benches, bench_search);
criterion_main!(search_benches);
