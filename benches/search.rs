//! Search throughput benchmarks.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use uctai::game::connectfour::ConnectFour;
use uctai::game::nim::Nim;
use uctai::game::tictactoe::TicTacToe;
use uctai::game::GameState;
use uctai::strategies::uct::{heuristic, HeuristicKind, SearchParams, UctSearch};

fn bench_iterations(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_iterations");

    for iterations in [100u32, 400, 1600] {
        group.throughput(Throughput::Elements(iterations as u64));
        let params = SearchParams::with_iterations(iterations);

        group.bench_with_input(BenchmarkId::new("tictactoe", iterations), &params, |b, params| {
            let search = UctSearch::new(params.clone(), &heuristic::zero);
            b.iter(|| {
                let mut rng = XorShiftRng::seed_from_u64(42);
                black_box(search.run(&TicTacToe::new(), &mut rng).unwrap().best_move)
            });
        });
        group.bench_with_input(BenchmarkId::new("connectfour", iterations), &params, |b, params| {
            let search = UctSearch::new(params.clone(), &heuristic::zero);
            b.iter(|| {
                let mut rng = XorShiftRng::seed_from_u64(42);
                black_box(search.run(&ConnectFour::new(), &mut rng).unwrap().best_move)
            });
        });
    }
    group.finish();
}

fn bench_heuristics(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_heuristics");
    let game = Nim::subtraction(15, 3);

    for kind in [HeuristicKind::Zero, HeuristicKind::StdDev, HeuristicKind::LastOutcome] {
        let params = SearchParams {
            blend_weight: 0.5,
            ..SearchParams::with_iterations(500)
        };
        group.bench_function(BenchmarkId::new("nim_15", kind), |b| {
            let search = UctSearch::new(params.clone(), &kind);
            b.iter(|| {
                let mut rng = XorShiftRng::seed_from_u64(7);
                black_box(search.run(&game, &mut rng).unwrap().best_move)
            });
        });
    }
    group.finish();
}

fn bench_rollout(c: &mut Criterion) {
    c.bench_function("connectfour rollout", |b| {
        let mut rng = XorShiftRng::seed_from_u64(3);
        b.iter(|| {
            let mut game = ConnectFour::new();
            game.rollout(&mut rng);
            black_box(game.winner())
        });
    });
}

criterion_group!(benches, bench_iterations, bench_heuristics, bench_rollout);
criterion_main!(benches);
