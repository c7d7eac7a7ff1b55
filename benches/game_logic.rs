use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pairfall::core::win_search::search;
use pairfall::core::{solve_hand, solve_pool, Board, Dealer, GameState, Tile, TileFace};
use pairfall::engine::best_placement;
use pairfall::types::{BiasConfig, GameAction, GameConfig, CLUSTER_MIN};

fn tiles(labels: &str, first_id: i32) -> Vec<Tile> {
    labels
        .split_whitespace()
        .enumerate()
        .map(|(i, label)| {
            let face = TileFace::parse(label).unwrap_or_else(|| panic!("bad label {}", label));
            Tile::new(first_id + i as i32, face, false)
        })
        .collect()
}

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345, GameConfig::default());
    state.apply_action(GameAction::Confirm);

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            state.tick(black_box(16), false);
        })
    });
}

fn bench_cluster_clear(c: &mut Criterion) {
    let labels = tiles("1m 2m 3m 4m 5p 6p 7p 8p 1s 2s 3s 4s E S W N P F", 0);
    c.bench_function("clear_clusters_3_rows", |b| {
        b.iter(|| {
            let mut board = Board::default();
            for (i, tile) in labels.iter().enumerate() {
                board.set((i % 6) as i8, 11 - (i / 6) as i8, Some(*tile));
            }
            board.clear_connected_clusters(black_box(CLUSTER_MIN));
            board.settle();
        })
    });
}

fn bench_deal_deck(c: &mut Criterion) {
    c.bench_function("deal_full_deck", |b| {
        b.iter(|| {
            let mut dealer = Dealer::new(black_box(7), BiasConfig::default());
            while dealer.draw().is_some() {}
        })
    });
}

fn bench_solve_hand(c: &mut Criterion) {
    let hand = tiles("1m 1m 1m 2m 2m 2m 3m 3m 3m 4m 4m 4m 5m 5m", 0);
    c.bench_function("solve_hand", |b| b.iter(|| solve_hand(black_box(&hand))));
}

fn bench_pool_search(c: &mut Criterion) {
    let board = tiles("1m 2m 3m 1p 2p 3p 7s 8s 9s 4m 4m 4m E S W N 5p 9p", 0);
    let discard = tiles("1s 5s P P", 100);
    let mut pool = board.clone();
    pool.extend_from_slice(&discard);

    c.bench_function("win_search", |b| {
        b.iter(|| search(black_box(&board), black_box(&discard)))
    });
    c.bench_function("solve_pool", |b| b.iter(|| solve_pool(black_box(&pool))));
}

fn bench_best_placement(c: &mut Criterion) {
    let mut state = GameState::new(12345, GameConfig::default());
    state.apply_action(GameAction::Confirm);

    c.bench_function("best_placement", |b| {
        b.iter(|| best_placement(black_box(&state)))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_cluster_clear,
    bench_deal_deck,
    bench_solve_hand,
    bench_pool_search,
    bench_best_placement
);
criterion_main!(benches);
