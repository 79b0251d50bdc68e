//! UCT Monte Carlo tree search with progressive widening.
//!
//! The search loops select → simulate → backpropagate under an iteration
//! and wall-clock budget. Selection descends from the root by UCT score
//! until it reaches a node with no children. Leaves absorb a configured
//! number of simulations and then expand: on the first expansion event
//! the node's legal moves are scored by static evaluation of the
//! resulting child state and sorted best-for-the-side first; events
//! materialize children from that list a step at a time, so a node widens
//! with its visit count instead of branching fully.
//!
//! Rewards are static evaluations (maximizing player's perspective),
//! taken after up to `ahead_step` random plies from the selected leaf.
//! A selected terminal leaf backpropagates its own evaluation directly.

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, trace};

use gambit_core::{Board, EvalConfig, UctConfig};

use crate::evaluator::SearchOutcome;
use crate::node::NodeId;
use crate::tree::{TreeStats, UctTree};

/// One UCT search over a tree rooted at a clone of the root board.
pub struct UctSearch<B: Board> {
    tree: UctTree<B>,
    config: EvalConfig,
    knobs: UctConfig,
    rng: ChaCha20Rng,
    iterations_run: u64,
}

impl<B: Board> UctSearch<B> {
    pub fn new(root: B, config: EvalConfig) -> Self {
        let knobs = config.uct.resolve(&config.extras);
        let rng = match config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };
        let tree = UctTree::new(root, config.max_player);
        Self {
            tree,
            config,
            knobs,
            rng,
            iterations_run: 0,
        }
    }

    /// Run until the budget expires and return the most-visited line.
    pub fn run(&mut self) -> SearchOutcome<B::Move> {
        let budget = self.config.budget();
        let start = Instant::now();

        loop {
            if let Some(limit) = budget.iterations {
                if self.iterations_run >= limit {
                    break;
                }
            }
            if let Some(limit) = budget.time {
                if start.elapsed() >= limit {
                    break;
                }
            }
            self.iterate();
            self.iterations_run += 1;
        }

        let outcome = self.best_line();
        debug!(
            iterations = self.iterations_run,
            nodes = self.tree.len(),
            score = outcome.score,
            "uct complete"
        );
        outcome
    }

    /// The search tree, for inspection.
    pub fn tree(&self) -> &UctTree<B> {
        &self.tree
    }

    pub fn stats(&self) -> TreeStats {
        self.tree.stats()
    }

    pub fn iterations_run(&self) -> u64 {
        self.iterations_run
    }

    fn iterate(&mut self) {
        let leaf = self.select();

        if self.tree.get(leaf).state.is_terminal() {
            let reward = self.tree.get(leaf).state.evaluate(&self.config);
            self.tree.backpropagate(leaf, reward);
            return;
        }

        let reward = self.simulate(leaf);
        trace!(leaf = leaf.0, reward, "simulated leaf");
        self.tree.backpropagate(leaf, reward);

        self.tree.get_mut(leaf).sim_count += 1;
        if self.tree.get(leaf).sim_count >= self.knobs.sim_threshold {
            self.expand(leaf);
            self.tree.get_mut(leaf).sim_count = 0;
        }
    }

    /// Descend from the root by UCT score until a childless node.
    fn select(&self) -> NodeId {
        let mut current = self.tree.root();
        while let Some(child) = self.tree.select_child(current) {
            current = child;
        }
        current
    }

    /// Play up to `ahead_step` random plies from the leaf on a clone,
    /// then evaluate the reached state.
    fn simulate(&mut self, leaf: NodeId) -> f64 {
        let node = self.tree.get(leaf);
        let mut state = node.state.clone();
        let mut max_to_move = node.max_player;

        for _ in 0..self.knobs.ahead_step {
            if state.is_terminal() {
                break;
            }
            let moves = state.legal_moves(max_to_move);
            if moves.is_empty() {
                break;
            }
            let pick = self.rng.gen_range(0..moves.len());
            state.apply(&moves[pick]);
            max_to_move = !max_to_move;
        }

        state.evaluate(&self.config)
    }

    /// Progressive widening: seed the value-sorted move list on the first
    /// event, then materialize children up to the visit-driven target.
    fn expand(&mut self, id: NodeId) {
        if self.tree.get(id).untried_moves.is_empty() {
            let node = self.tree.get(id);
            let moves = node.state.legal_moves(node.max_player);
            let max_player = node.max_player;

            let mut scored: Vec<(f64, B::Move)> = Vec::with_capacity(moves.len());
            for mv in moves {
                let mut child = node.state.clone();
                child.apply(&mv);
                scored.push((child.evaluate(&self.config), mv));
            }
            if max_player {
                scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
            } else {
                scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
            }

            self.tree.get_mut(id).untried_moves = scored.into_iter().map(|(_, mv)| mv).collect();
        }

        // The first event fires as soon as the node qualifies; each later
        // event waits for another `expand_threshold` visits.
        let threshold = self.knobs.expand_threshold.max(1);
        let node = self.tree.get(id);
        let events = u64::from(node.visits / threshold) + 1;
        let target = (events * u64::from(self.knobs.expand_step))
            .min(u64::from(self.knobs.expand_top_n))
            .min(node.untried_moves.len() as u64) as u32;

        while self.tree.get(id).expanded_count < target {
            let node = self.tree.get(id);
            let mv = node.untried_moves[node.expanded_count as usize].clone();
            let mut state = node.state.clone();
            state.apply(&mv);
            self.tree.add_child(id, mv, state);
            self.tree.get_mut(id).expanded_count += 1;
        }
    }

    /// Most-visited root child and the most-visited chain beneath it.
    fn best_line(&self) -> SearchOutcome<B::Move> {
        let root = self.tree.root();
        let Some(best) = self.tree.best_child(root) else {
            // Nothing materialized (terminal or move-less root, or an
            // exhausted budget): report the root's own evaluation.
            return SearchOutcome {
                score: self.tree.get(root).state.evaluate(&self.config),
                best_moves: Vec::new(),
            };
        };

        let score = self.tree.get(best).mean_reward();
        let mut moves = Vec::new();
        let mut current = best;
        loop {
            if let Some(mv) = &self.tree.get(current).mv {
                moves.push(mv.clone());
            }
            match self.tree.best_child(current) {
                Some(next) => current = next,
                None => break,
            }
        }

        SearchOutcome {
            score,
            best_moves: moves,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gambit_core::keys;
    use games_pushgoal::{PushGoal, Step};
    use games_tictactoe::TicTacToe;

    #[test]
    fn test_pushgoal_finds_center() {
        let config = EvalConfig::default()
            .with_iterations(50)
            .with_time_limit_secs(0)
            .with_seed(7);
        let mut search = UctSearch::new(PushGoal::new(), config);
        let outcome = search.run();

        assert_eq!(outcome.best_moves.first(), Some(&Step { from: 3, to: 4 }));
        assert_eq!(outcome.score, 1.0);
        assert_eq!(search.iterations_run(), 50);
    }

    #[test]
    fn test_root_visits_track_iterations() {
        let config = EvalConfig::default()
            .with_iterations(80)
            .with_time_limit_secs(0)
            .with_seed(11)
            .with_extra(keys::AHEAD_STEP, 4i64);
        let mut search = UctSearch::new(TicTacToe::new(), config);
        search.run();

        assert_eq!(search.stats().root_visits, 80);
    }

    #[test]
    fn test_materialized_children_all_visited() {
        let config = EvalConfig::default()
            .with_iterations(200)
            .with_time_limit_secs(0)
            .with_seed(3)
            .with_extra(keys::EXPAND_THRESH, 10i64)
            .with_extra(keys::EXPAND_STEP, 2i64);
        let mut search = UctSearch::new(TicTacToe::new(), config);
        search.run();

        let tree = search.tree();
        let root = tree.get(tree.root());
        assert!(!root.children.is_empty());
        for &child in &root.children {
            assert!(tree.get(child).visits >= 1);
        }
    }

    #[test]
    fn test_widening_bound_holds_everywhere() {
        let threshold = 10u32;
        let step = 2u32;
        let config = EvalConfig::default()
            .with_iterations(300)
            .with_time_limit_secs(0)
            .with_seed(5)
            .with_extra(keys::EXPAND_THRESH, i64::from(threshold))
            .with_extra(keys::EXPAND_STEP, i64::from(step))
            .with_extra(keys::AHEAD_STEP, 2i64);
        let mut search = UctSearch::new(TicTacToe::new(), config);
        search.run();

        let tree = search.tree();
        for index in 0..tree.len() {
            let node = tree.get(NodeId(index as u32));
            let events = node.visits / threshold + 1;
            let cap = (events * step).min(250);
            assert!(
                node.children.len() as u32 <= cap,
                "node with {} visits has {} children, cap {}",
                node.visits,
                node.children.len(),
                cap
            );
        }
    }

    #[test]
    fn test_terminal_root_returns_static_eval() {
        let config = EvalConfig::default()
            .with_iterations(25)
            .with_time_limit_secs(0)
            .with_seed(1);
        let mut search = UctSearch::new(PushGoal::with_positions(4, 5), config);
        let outcome = search.run();

        assert!(outcome.best_moves.is_empty());
        assert_eq!(outcome.score, 1.0);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = EvalConfig::default()
            .with_iterations(150)
            .with_time_limit_secs(0)
            .with_seed(42)
            .with_extra(keys::AHEAD_STEP, 6i64);

        let first = UctSearch::new(TicTacToe::new(), config.clone()).run();
        let second = UctSearch::new(TicTacToe::new(), config).run();

        assert_eq!(first.score, second.score);
        assert_eq!(
            first.best_moves.iter().map(ToString::to_string).collect::<Vec<_>>(),
            second.best_moves.iter().map(ToString::to_string).collect::<Vec<_>>()
        );
    }
}
