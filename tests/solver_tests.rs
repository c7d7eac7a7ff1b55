//! Solver and win search tests - partition correctness and the reference scenarios

use std::collections::HashSet;

use pairfall::core::hand::Outcome;
use pairfall::core::win_search::search;
use pairfall::core::{solve_hand, solve_pool, Kind, NoWinReason, Tile, TileFace, WinHand};
use pairfall::types::{HAND_SIZE, WIN_BASE_SCORE};

fn tiles(labels: &str, first_id: i32) -> Vec<Tile> {
    labels
        .split_whitespace()
        .enumerate()
        .map(|(i, label)| {
            let (label, premium) = match label.strip_suffix('*') {
                Some(base) => (base, true),
                None => (label, false),
            };
            Tile::new(first_id + i as i32, TileFace::parse(label).unwrap(), premium)
        })
        .collect()
}

/// Every tile in exactly one meld or the pair, each meld well formed
fn assert_partition(hand: &WinHand, input: &[Tile]) {
    assert_eq!(hand.melds.len() * 3 + hand.pair.len(), HAND_SIZE);

    let ids: Vec<i32> = hand.tiles().map(|t| t.id).collect();
    let unique: HashSet<i32> = ids.iter().copied().collect();
    assert_eq!(unique.len(), HAND_SIZE, "duplicate tile in {:?}", ids);
    let available: HashSet<i32> = input.iter().map(|t| t.id).collect();
    assert!(unique.is_subset(&available));

    for realized in &hand.melds {
        let mut want: Vec<Kind> = realized.meld.kinds().to_vec();
        let mut got: Vec<Kind> = realized.tiles.iter().map(Kind::of).collect();
        want.sort();
        got.sort();
        assert_eq!(want, got);
    }
    assert_eq!(Kind::of(&hand.pair[0]), Kind::of(&hand.pair[1]));
}

#[test]
fn test_scenario_a_hand_wins() {
    let hand = tiles("1m 2m 3m 4p 5p 6p 7s 8s 9s 4m 4m 4m P P", 0);
    let outcome = solve_hand(&hand);
    let win = outcome.win().expect("hand should win");

    assert_partition(win, &hand);
    assert_eq!(win.melds.len(), 4);
    assert_eq!(win.score, WIN_BASE_SCORE);
    assert_eq!(win.consumed.total(), HAND_SIZE);
}

#[test]
fn test_scenario_b_premium_surfaces() {
    let hand = tiles("1m 2m 3m 4p 5p* 6p 7s 8s 9s 4m 4m 4m P P", 0);
    let outcome = solve_hand(&hand);
    let win = outcome.win().expect("hand should win");

    assert!(win.tiles().any(|t| t.premium));
    assert_eq!(win.premium_count(), 1);
    assert!(win.score > WIN_BASE_SCORE);
}

#[test]
fn test_scenario_c_board_and_discard() {
    let board = tiles("1m 2m 3m 1p 2p 3p 7s 8s 9s 4m 4m 4m", 0);
    let discard = tiles("P P", 100);
    let outcome = search(&board, &discard);
    let win = outcome.win().expect("pool should win");

    let mut pool = board.clone();
    pool.extend_from_slice(&discard);
    assert_partition(win, &pool);
    assert_eq!(win.consumed.total(), HAND_SIZE);
    assert_eq!(win.consumed.board.len(), 12);
    let mut from_discard = win.consumed.discard.clone();
    from_discard.sort_unstable();
    assert_eq!(from_discard, vec![100, 101]);
}

#[test]
fn test_scenario_c_discard_preferred_over_board() {
    // 7s sits on both sides; only one is needed and it must be the discard copy.
    let board = tiles("1m 2m 3m 1p 2p 3p 7s 8s 9s 4m 4m 4m C C", 0);
    let discard = tiles("7s", 100);
    let win = search(&board, &discard).win().cloned().expect("pool should win");
    assert_eq!(win.consumed.discard, vec![100]);
    assert_eq!(win.consumed.board.len(), 13);
    assert!(!win.consumed.board.contains(&6));
}

#[test]
fn test_scenario_d_pool_too_small() {
    let pool = tiles("1m 2m 3m 4m 5m 6m 7m 8m 9m E E E N", 0);
    assert_eq!(pool.len(), 13);

    assert_eq!(solve_pool(&pool), Outcome::NoWin(NoWinReason::PoolTooSmall));
    assert_eq!(
        search(&pool[..7], &pool[7..]),
        Outcome::NoWin(NoWinReason::PoolTooSmall)
    );
    assert_eq!(solve_hand(&pool), Outcome::NoWin(NoWinReason::WrongTileCount));
}

#[test]
fn test_no_partition_is_a_plain_no_win() {
    // Seven pairs is not a 4 + 1 shape.
    let hand = tiles("1m 1m 3m 3m 5p 5p 7p 7p 2s 2s E E C C", 0);
    assert_eq!(solve_hand(&hand), Outcome::NoWin(NoWinReason::NoCombination));
}

#[test]
fn test_honors_never_form_runs() {
    let hand = tiles("E S W 1m 2m 3m 4m 5m 6m 7m 8m 9m N N", 0);
    assert_eq!(solve_hand(&hand), Outcome::NoWin(NoWinReason::NoCombination));
}

#[test]
fn test_runs_do_not_wrap() {
    let hand = tiles("8m 9m 1m 1p 2p 3p 4p 5p 6p 7s 8s 9s E E", 0);
    assert!(!solve_hand(&hand).is_win());
}

#[test]
fn test_ambiguous_hand_needs_backtracking() {
    // 111 222 333 can be three triplets or three runs; either way it wins.
    let hand = tiles("1m 1m 1m 2m 2m 2m 3m 3m 3m 4m 4m 4m 5m 5m", 0);
    let outcome = solve_hand(&hand);
    let win = outcome.win().expect("hand should win");
    assert_partition(win, &hand);
}

#[test]
fn test_pool_search_finds_subset() {
    let pool = tiles("1m 2m 3m 4p 5p 6p 7s 8s 9s 4m 4m 4m P P 9p E N", 0);
    let outcome = solve_pool(&pool);
    let win = outcome.win().expect("subset should win");
    assert_partition(win, &pool);
    assert_eq!(win.consumed.total(), HAND_SIZE);
}

#[test]
fn test_pool_without_win() {
    let pool = tiles("1m 4m 7m 1p 4p 7p 1s 4s 7s E S W N P F", 0);
    assert_eq!(solve_pool(&pool), Outcome::NoWin(NoWinReason::NoCombination));
}

#[test]
fn test_no_win_reasons_render() {
    assert_eq!(NoWinReason::PoolTooSmall.code(), "pool_too_small");
    assert!(NoWinReason::PoolTooSmall.is_skipped());
    assert!(!NoWinReason::NoCombination.is_skipped());
    assert!(!NoWinReason::NoCombination.to_string().is_empty());
}
