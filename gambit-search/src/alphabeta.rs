//! Fixed-depth Alpha-Beta search.
//!
//! Minimax in max/min form with alpha/beta cutoffs. The search mutates a
//! working board in place, undoing every move on the way back up, and
//! collects the full set of root moves tied at the best score: a strict
//! improvement replaces the set, an exact tie appends to it.
//!
//! With `threads > 1` in the configuration, root moves fan out onto a
//! bounded worker pool. Workers run over cloned boards and report through
//! a results channel; the calling thread is the single reducer. The
//! shared alpha/beta window is best-effort under concurrency — a worker
//! may start on a window another completion is about to narrow, so
//! pruning can be weaker than in the sequential search, never wrong about
//! the final score fold.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Mutex;

use gambit_core::{keys, Board, EvalConfig};
use tracing::{debug, warn};

use crate::evaluator::SearchOutcome;

/// Shared search window for the parallel fan-out.
struct Window {
    alpha: f64,
    beta: f64,
}

/// One Alpha-Beta search over a working copy of the root board.
pub struct AlphaBetaSearch<B: Board> {
    board: B,
    config: EvalConfig,
}

impl<B: Board> AlphaBetaSearch<B> {
    pub fn new(board: B, config: EvalConfig) -> Self {
        Self { board, config }
    }

    /// Run the search and return the root score with every tied move.
    pub fn run(mut self) -> SearchOutcome<B::Move> {
        let depth = self.config.depth;
        let max_player = self.config.max_player;

        if self.config.threads > 1 && depth > 0 && !self.board.is_terminal() {
            return self.run_parallel();
        }

        let (score, best_moves) = self.search(depth, f64::NEG_INFINITY, f64::INFINITY, max_player);
        debug!(score, ties = best_moves.len(), depth, "alpha-beta complete");
        SearchOutcome { score, best_moves }
    }

    /// Static evaluation at a leaf, with the absolute ply from the root
    /// published under the `depth` extras key first.
    fn leaf_eval(&mut self, remaining: u32) -> f64 {
        let ply = self.config.depth - remaining;
        self.config.extras.set(keys::DEPTH, i64::from(ply));
        self.board.evaluate(&self.config)
    }

    fn search(
        &mut self,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
        max_to_move: bool,
    ) -> (f64, Vec<B::Move>) {
        if depth == 0 || self.board.is_terminal() {
            return (self.leaf_eval(depth), Vec::new());
        }
        let moves = self.board.legal_moves(max_to_move);
        if moves.is_empty() {
            // Stalemate-like: no moves but not terminal.
            return (self.leaf_eval(depth), Vec::new());
        }

        let mut best_moves = Vec::new();
        if max_to_move {
            let mut best = f64::NEG_INFINITY;
            for mv in moves {
                self.board.apply(&mv);
                let (value, _) = self.search(depth - 1, alpha, beta, false);
                self.board.undo(&mv);

                if value > best {
                    best = value;
                    best_moves.clear();
                    best_moves.push(mv);
                } else if value == best {
                    best_moves.push(mv);
                }
                alpha = alpha.max(value);
                if beta <= alpha {
                    break;
                }
            }
            (best, best_moves)
        } else {
            let mut best = f64::INFINITY;
            for mv in moves {
                self.board.apply(&mv);
                let (value, _) = self.search(depth - 1, alpha, beta, true);
                self.board.undo(&mv);

                if value < best {
                    best = value;
                    best_moves.clear();
                    best_moves.push(mv);
                } else if value == best {
                    best_moves.push(mv);
                }
                beta = beta.min(value);
                if beta <= alpha {
                    break;
                }
            }
            (best, best_moves)
        }
    }

    /// Root-level fan-out: one task per root move on a pool of at most
    /// `threads` workers, folded by the calling thread.
    fn run_parallel(mut self) -> SearchOutcome<B::Move> {
        let depth = self.config.depth;
        let max_player = self.config.max_player;

        let moves = self.board.legal_moves(max_player);
        if moves.is_empty() {
            let score = self.leaf_eval(depth);
            return SearchOutcome {
                score,
                best_moves: Vec::new(),
            };
        }

        let workers = self.config.threads.min(moves.len());
        let pool = match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
            Ok(pool) => pool,
            Err(err) => {
                warn!(%err, "worker pool unavailable, searching sequentially");
                let (score, best_moves) =
                    self.search(depth, f64::NEG_INFINITY, f64::INFINITY, max_player);
                return SearchOutcome { score, best_moves };
            }
        };

        let window = Mutex::new(Window {
            alpha: f64::NEG_INFINITY,
            beta: f64::INFINITY,
        });
        let cutoff = AtomicBool::new(false);
        let (tx, rx) = mpsc::sync_channel::<(f64, B::Move)>(workers);
        let root = &self.board;
        let config = &self.config;

        let mut best = if max_player {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        let mut ties: Vec<B::Move> = Vec::new();

        pool.in_place_scope(|scope| {
            for mv in moves {
                let tx = tx.clone();
                let window = &window;
                let cutoff = &cutoff;
                scope.spawn(move |_| {
                    // Launches observe the cutoff; in-flight workers run
                    // to completion and their results are still folded.
                    if cutoff.load(Ordering::Acquire) {
                        return;
                    }
                    let (alpha, beta) = {
                        let w = window.lock().unwrap_or_else(|e| e.into_inner());
                        (w.alpha, w.beta)
                    };
                    let mut child = root.clone();
                    child.apply(&mv);
                    let mut search = AlphaBetaSearch {
                        board: child,
                        config: config.clone(),
                    };
                    let (score, _) = search.search(depth - 1, alpha, beta, !max_player);
                    let _ = tx.send((score, mv));
                });
            }
            drop(tx);

            // Single reducer: fold completions in arrival order and
            // narrow the shared window for future launches.
            for (score, mv) in rx {
                if (max_player && score > best) || (!max_player && score < best) {
                    best = score;
                    ties.clear();
                    ties.push(mv);
                } else if score == best {
                    ties.push(mv);
                }

                let mut w = window.lock().unwrap_or_else(|e| e.into_inner());
                if max_player {
                    w.alpha = w.alpha.max(score);
                } else {
                    w.beta = w.beta.min(score);
                }
                if w.beta <= w.alpha {
                    cutoff.store(true, Ordering::Release);
                }
            }
        });

        debug!(
            score = best,
            ties = ties.len(),
            workers,
            "parallel alpha-beta complete"
        );
        SearchOutcome {
            score: best,
            best_moves: ties,
        }
    }
}
