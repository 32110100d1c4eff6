//! MCTS benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p mcts`
//!
//! These benchmarks measure:
//! - Full search with varying sample budgets
//! - Tree operations (expansion, selection, backpropagation)
//! - Search from different game phases (opening, midgame, near-terminal)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use games_tictactoe::TicTacToeState;
use mcts::{MctsConfig, MonteCarloSearchTree, SearchTree};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use search_core::{Player, State};

/// Build a tictactoe state after the given cells have been played in order.
fn play_cells(cells: &[u8]) -> TicTacToeState {
    let mut state = TicTacToeState::new(Player::First);
    for &cell in cells {
        state = state.play(cell).unwrap();
    }
    state
}

fn bench_search_samples(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_samples");

    for samples in [50u32, 100, 200, 400, 800] {
        group.throughput(Throughput::Elements(u64::from(samples)));
        group.bench_with_input(
            BenchmarkId::new("tictactoe", samples),
            &samples,
            |b, &samples| {
                let config = MctsConfig::default()
                    .with_samples(samples)
                    .with_max_tree_depth(8);

                b.iter(|| {
                    let mut search = MonteCarloSearchTree::new(
                        TicTacToeState::new(Player::First),
                        config.clone(),
                    )
                    .unwrap();
                    let mut rng = ChaCha20Rng::seed_from_u64(42);
                    black_box(search.search_for_actions(1, &mut rng))
                });
            },
        );
    }

    group.finish();
}

fn bench_game_phases(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_game_phases");
    let config = MctsConfig::default()
        .with_samples(200)
        .with_max_tree_depth(8);

    let phases = [
        ("opening", vec![]),
        ("midgame", vec![4u8, 0, 2, 6]),
        ("near_terminal", vec![0u8, 3, 1, 4]),
    ];

    for (name, cells) in phases {
        group.bench_function(name, |b| {
            let state = play_cells(&cells);
            b.iter(|| {
                let mut search =
                    MonteCarloSearchTree::new(state.clone(), config.clone()).unwrap();
                let mut rng = ChaCha20Rng::seed_from_u64(42);
                black_box(search.search_for_actions(1, &mut rng))
            });
        });
    }

    group.finish();
}

fn bench_tree_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_ops");

    // Expanding every root action of a fresh position.
    group.bench_function("expand_root_fully", |b| {
        b.iter(|| {
            let mut tree = SearchTree::new(TicTacToeState::new(Player::First));
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            while !tree.get(tree.root()).is_expanded() {
                tree.expand(tree.root(), &mut rng);
            }
            black_box(tree.len())
        });
    });

    // Selection over a fully expanded, visited root.
    group.bench_function("select_child", |b| {
        let mut tree = SearchTree::new(TicTacToeState::new(Player::First));
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        while !tree.get(tree.root()).is_expanded() {
            let child = tree.expand(tree.root(), &mut rng);
            tree.backpropagate(child, 0.5);
        }

        b.iter(|| black_box(tree.select_child(tree.root(), 1.0, &mut rng)));
    });

    // Backpropagation along a played-out line.
    group.bench_function("backpropagate_depth_6", |b| {
        let mut tree = SearchTree::new(TicTacToeState::new(Player::First));
        let mut leaf = tree.root();
        for _ in 0..6 {
            let state = tree.get(leaf).state.clone();
            let action = state.possible_actions()[0].clone();
            leaf = tree.add_child(leaf, action);
        }

        b.iter(|| {
            tree.backpropagate(leaf, 1.0);
            black_box(tree.get(tree.root()).visit_count)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_search_samples,
    bench_game_phases,
    bench_tree_operations,
);

criterion_main!(benches);
