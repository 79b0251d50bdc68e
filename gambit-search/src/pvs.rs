//! Principal Variation Search.
//!
//! Same recursion shape as Alpha-Beta with the principal-variation
//! optimization: at every ply the first move is searched with the full
//! window on the assumption that it is principal, and each later move is
//! probed with a null window first. A probe that lands strictly inside
//! the open window disproves the assumption and triggers a full-window
//! re-search of that move. Ties, cutoffs, leaf handling and the `depth`
//! extras key behave exactly as in Alpha-Beta.

use gambit_core::{keys, Board, EvalConfig};
use tracing::debug;

use crate::evaluator::SearchOutcome;

/// Null-window width. Only needs to be narrower than any score
/// difference an evaluator can produce; too narrow merely costs an extra
/// re-search.
const NULL_WINDOW: f64 = 1e-6;

/// One PVS run over a working copy of the root board.
pub struct PvsSearch<B: Board> {
    board: B,
    config: EvalConfig,
}

impl<B: Board> PvsSearch<B> {
    pub fn new(board: B, config: EvalConfig) -> Self {
        Self { board, config }
    }

    /// Run the search and return the root score with every tied move.
    pub fn run(mut self) -> SearchOutcome<B::Move> {
        let depth = self.config.depth;
        let max_player = self.config.max_player;
        let (score, best_moves) = self.search(depth, f64::NEG_INFINITY, f64::INFINITY, max_player);
        debug!(score, ties = best_moves.len(), depth, "pvs complete");
        SearchOutcome { score, best_moves }
    }

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
            return (self.leaf_eval(depth), Vec::new());
        }

        let mut best_moves = Vec::new();
        let mut first = true;
        if max_to_move {
            let mut best = f64::NEG_INFINITY;
            for mv in moves {
                self.board.apply(&mv);
                let value = if first {
                    first = false;
                    self.search(depth - 1, alpha, beta, false).0
                } else {
                    let probe = self.search(depth - 1, alpha, alpha + NULL_WINDOW, false).0;
                    if probe > alpha && probe < beta {
                        self.search(depth - 1, alpha, beta, false).0
                    } else {
                        probe
                    }
                };
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
                let value = if first {
                    first = false;
                    self.search(depth - 1, alpha, beta, true).0
                } else {
                    let probe = self.search(depth - 1, beta - NULL_WINDOW, beta, true).0;
                    if probe < beta && probe > alpha {
                        self.search(depth - 1, alpha, beta, true).0
                    } else {
                        probe
                    }
                };
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
}
