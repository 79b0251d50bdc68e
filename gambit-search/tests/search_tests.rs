//! End-to-end search properties over the reference games.
//!
//! The oracle here is a plain minimax without pruning: Alpha-Beta and PVS
//! must reproduce its root score, and on positions with exact tie sets
//! the full best-move set as well.

use std::str::FromStr;
use std::time::{Duration, Instant};

use gambit_core::{keys, Board, EvalConfig, Strategy};
use gambit_search::{AlphaBetaSearch, Evaluator, PvsSearch, UctSearch};
use games_pushgoal::{PushGoal, Step};
use games_tictactoe::{TicTacToe, O, X};

/// Reference minimax with no pruning. Mirrors the searchers' leaf
/// handling, including the `depth` extras key.
fn minimax<B: Board>(
    board: &mut B,
    config: &mut EvalConfig,
    remaining: u32,
    max_to_move: bool,
) -> (f64, Vec<B::Move>) {
    let moves = if remaining == 0 || board.is_terminal() {
        Vec::new()
    } else {
        board.legal_moves(max_to_move)
    };
    if moves.is_empty() {
        let ply = config.depth - remaining;
        config.extras.set(keys::DEPTH, i64::from(ply));
        return (board.evaluate(config), Vec::new());
    }

    let mut best = if max_to_move {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };
    let mut ties = Vec::new();
    for mv in moves {
        board.apply(&mv);
        let (value, _) = minimax(board, config, remaining - 1, !max_to_move);
        board.undo(&mv);

        if (max_to_move && value > best) || (!max_to_move && value < best) {
            best = value;
            ties.clear();
            ties.push(mv);
        } else if value == best {
            ties.push(mv);
        }
    }
    (best, ties)
}

fn sorted_tags<M: std::fmt::Display>(moves: &[M]) -> Vec<String> {
    let mut tags: Vec<String> = moves.iter().map(|mv| mv.to_string()).collect();
    tags.sort();
    tags
}

fn tictactoe_positions() -> Vec<(TicTacToe, bool)> {
    vec![
        (TicTacToe::new(), true),
        (TicTacToe::from_cells([X, 0, 0, 0, O, 0, 0, 0, 0]), true),
        (TicTacToe::from_cells([X, X, 0, O, O, 0, 0, 0, 0]), true),
        (TicTacToe::from_cells([X, X, 0, O, 0, 0, 0, 0, X]), false),
        (TicTacToe::from_cells([X, X, 0, O, O, 0, 0, X, 0]), false),
        (TicTacToe::from_cells([O, X, X, X, O, 0, 0, 0, 0]), false),
    ]
}

// --- Alpha-Beta against the oracle ---

#[test]
fn alphabeta_score_matches_minimax() {
    for depth in 1..=3u32 {
        for (board, max_player) in tictactoe_positions() {
            let config = EvalConfig::default()
                .with_depth(depth)
                .with_max_player(max_player);

            let outcome = AlphaBetaSearch::new(board, config.clone()).run();
            let (oracle, _) = minimax(&mut board.clone(), &mut config.clone(), depth, max_player);

            assert_eq!(
                outcome.score, oracle,
                "depth {depth} position {board:?} (max={max_player})"
            );
        }
    }
}

#[test]
fn alphabeta_depth3_pushgoal_equals_minimax() {
    let config = EvalConfig::default().with_depth(3);
    let outcome = AlphaBetaSearch::new(PushGoal::new(), config.clone()).run();
    let (oracle, oracle_moves) = minimax(&mut PushGoal::new(), &mut config.clone(), 3, true);

    assert_eq!(outcome.score, oracle);
    assert_eq!(sorted_tags(&outcome.best_moves), sorted_tags(&oracle_moves));
}

#[test]
fn alphabeta_best_moves_rescore_to_root_value() {
    // Every returned move must lead to a child whose exact value is the
    // reported root score.
    let cases = [
        (TicTacToe::from_cells([X, X, 0, O, O, 0, 0, 0, 0]), true),
        (TicTacToe::from_cells([X, X, 0, O, 0, 0, 0, 0, X]), false),
    ];
    for (board, max_player) in cases {
        let depth = 2u32;
        let config = EvalConfig::default()
            .with_depth(depth)
            .with_max_player(max_player);
        let outcome = AlphaBetaSearch::new(board, config.clone()).run();
        assert!(!outcome.best_moves.is_empty());

        for mv in &outcome.best_moves {
            let mut child = board;
            child.apply(mv);
            let (value, _) = minimax(&mut child, &mut config.clone(), depth - 1, !max_player);
            assert_eq!(
                value, outcome.score,
                "move {mv} does not re-score to the root value"
            );
        }
    }
}

// --- PVS equivalence ---

#[test]
fn pvs_score_matches_alphabeta() {
    for depth in 1..=4u32 {
        for (board, max_player) in tictactoe_positions() {
            let config = EvalConfig::default()
                .with_depth(depth)
                .with_max_player(max_player);

            let ab = AlphaBetaSearch::new(board, config.clone()).run();
            let pvs = PvsSearch::new(board, config).run();

            assert_eq!(
                pvs.score, ab.score,
                "depth {depth} position {board:?} (max={max_player})"
            );
        }
    }
}

#[test]
fn pvs_best_move_set_matches_alphabeta() {
    // Depth-2 tic-tac-toe: child windows bottom out on leaf evaluations,
    // so both searchers resolve the identical tie set.
    for (board, max_player) in tictactoe_positions() {
        let config = EvalConfig::default()
            .with_depth(2)
            .with_max_player(max_player);

        let ab = AlphaBetaSearch::new(board, config.clone()).run();
        let pvs = PvsSearch::new(board, config).run();

        assert_eq!(
            sorted_tags(&pvs.best_moves),
            sorted_tags(&ab.best_moves),
            "position {board:?} (max={max_player})"
        );
    }
}

#[test]
fn pvs_depth4_pushgoal_equals_alphabeta() {
    let config = EvalConfig::default().with_depth(4);

    let ab = AlphaBetaSearch::new(PushGoal::new(), config.clone()).run();
    let pvs = PvsSearch::new(PushGoal::new(), config).run();

    assert_eq!(pvs.score, ab.score);
    assert_eq!(sorted_tags(&pvs.best_moves), sorted_tags(&ab.best_moves));
}

// --- UCT ---

#[test]
fn uct_first_move_matches_shallow_alphabeta() {
    let ab = AlphaBetaSearch::new(PushGoal::new(), EvalConfig::default().with_depth(2)).run();

    let config = EvalConfig::default()
        .with_iterations(500)
        .with_time_limit_secs(0)
        .with_seed(17)
        .with_extra(keys::AHEAD_STEP, 8i64);
    let mut search = UctSearch::new(PushGoal::new(), config);
    let uct = search.run();

    assert!(!uct.best_moves.is_empty());
    assert_eq!(uct.best_moves.first(), ab.best_moves.first());
}

#[test]
fn uct_progresses_every_iteration() {
    let config = EvalConfig::default()
        .with_iterations(120)
        .with_time_limit_secs(0)
        .with_seed(23)
        .with_extra(keys::AHEAD_STEP, 3i64);
    let mut search = UctSearch::new(TicTacToe::new(), config);
    search.run();

    assert_eq!(search.iterations_run(), 120);
    assert_eq!(search.stats().root_visits, 120);

    let tree = search.tree();
    let root = tree.get(tree.root());
    assert!(!root.children.is_empty());
    for &child in &root.children {
        assert!(tree.get(child).visits >= 1, "materialized child never visited");
    }
}

#[test]
#[ignore = "runs the full default wall-clock budget"]
fn uct_zero_budgets_fall_back_to_ten_seconds() {
    let config = EvalConfig::default()
        .with_iterations(0)
        .with_time_limit_secs(0)
        .with_seed(31);
    let mut search = UctSearch::new(TicTacToe::new(), config);

    let start = Instant::now();
    search.run();
    let elapsed = start.elapsed();

    assert!(elapsed >= Duration::from_secs(10));
    assert!(elapsed < Duration::from_secs(13), "took {elapsed:?}");
    assert!(search.iterations_run() > 0);
}

// --- Façade-level scenarios ---

#[test]
fn depth1_alphabeta_start_position() {
    let mut evaluator = Evaluator::new(
        Strategy::AlphaBeta,
        PushGoal::new(),
        EvalConfig::default().with_depth(1),
    );
    let outcome = evaluator.best_moves();

    assert_eq!(outcome.best_moves, vec![Step { from: 3, to: 4 }]);
    assert_eq!(outcome.score, 1.0);
}

#[test]
fn terminal_root_returns_empty_set_for_all_strategies() {
    let root = PushGoal::with_positions(4, 5);
    for strategy in Strategy::ALL {
        let config = EvalConfig::default()
            .with_depth(4)
            .with_iterations(30)
            .with_time_limit_secs(0)
            .with_seed(19);
        let mut evaluator = Evaluator::new(strategy, root, config);

        let outcome = evaluator.best_moves();
        assert!(outcome.is_empty(), "{strategy}");
        assert_eq!(outcome.score, 1.0, "{strategy}");
    }
}

#[test]
fn strategy_tags_round_trip_through_the_facade() {
    let strategy = Strategy::from_str("PVS").unwrap();
    let mut evaluator = Evaluator::new(
        strategy,
        PushGoal::new(),
        EvalConfig::default().with_depth(2),
    );

    assert_eq!(evaluator.strategy().to_string(), "PVS");
    assert!(!evaluator.best_moves().is_empty());
    assert!(Strategy::from_str("SCOUT").is_err());
}
