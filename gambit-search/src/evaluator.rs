//! Evaluator façade.
//!
//! Binds a [`Strategy`] to a root board and an [`EvalConfig`], dispatches
//! to the matching searcher, and publishes the outcome. With `detail` set
//! in the configuration a summary table of the inputs, the best score and
//! up to three best moves is emitted through `tracing` after the search
//! returns.

use gambit_core::{Board, EvalConfig, Strategy};
use tracing::{debug, info};

use crate::alphabeta::AlphaBetaSearch;
use crate::pvs::PvsSearch;
use crate::uct::UctSearch;

/// Result of one search: the root score and the best-move set.
///
/// Alpha-Beta and PVS report every root move tied at the score, in
/// enumeration order. UCT reports the most-visited root move followed by
/// the most-visited chain beneath it. The set is empty when the root is
/// terminal or has no moves; the score is then the root's static
/// evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome<M> {
    pub score: f64,
    pub best_moves: Vec<M>,
}

impl<M> SearchOutcome<M> {
    pub fn is_empty(&self) -> bool {
        self.best_moves.is_empty()
    }
}

/// Dispatcher binding a strategy, a root board and a configuration.
#[derive(Debug, Clone)]
pub struct Evaluator<B: Board> {
    strategy: Strategy,
    root: B,
    config: EvalConfig,
    last: Option<SearchOutcome<B::Move>>,
}

impl<B: Board> Evaluator<B> {
    pub fn new(strategy: Strategy, root: B, config: EvalConfig) -> Self {
        Self {
            strategy,
            root,
            config,
            last: None,
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    pub fn root(&self) -> &B {
        &self.root
    }

    /// Outcome of the most recent [`Evaluator::best_moves`] call.
    pub fn last_outcome(&self) -> Option<&SearchOutcome<B::Move>> {
        self.last.as_ref()
    }

    /// Run the configured searcher from the root and return the
    /// best-move set.
    pub fn best_moves(&mut self) -> SearchOutcome<B::Move> {
        let outcome = match self.strategy {
            Strategy::AlphaBeta => {
                AlphaBetaSearch::new(self.root.clone(), self.config.clone()).run()
            }
            Strategy::Pvs => PvsSearch::new(self.root.clone(), self.config.clone()).run(),
            Strategy::Uct => UctSearch::new(self.root.clone(), self.config.clone()).run(),
        };

        if outcome.is_empty() {
            debug!(
                strategy = %self.strategy,
                score = outcome.score,
                "no moves from the root, returning its static evaluation"
            );
        }
        if self.config.detail {
            self.emit_detail(&outcome);
        }

        self.last = Some(outcome.clone());
        outcome
    }

    /// Summary table of the search inputs and result.
    fn emit_detail(&self, outcome: &SearchOutcome<B::Move>) {
        info!(
            strategy = %self.strategy,
            depth = self.config.depth,
            step = self.config.step,
            max_player = self.config.max_player,
            iterations = self.config.iterations,
            time_limit_secs = self.config.time_limit_secs,
            threads = self.config.threads,
            "search inputs"
        );
        info!(score = outcome.score, ties = outcome.best_moves.len(), "best score");
        for (rank, mv) in outcome.best_moves.iter().take(3).enumerate() {
            info!(rank = rank + 1, mv = %mv, "best move");
        }
        for (key, value) in self.config.extras.iter() {
            info!(key, value = %value, "extra");
        }
    }
}
