//! Adversarial tree search for two-player zero-sum games.
//!
//! This crate provides three searchers over the `gambit-core` [`Board`]
//! capability, plus the evaluator façade that dispatches between them:
//!
//! 1. **Alpha-Beta** ([`AlphaBetaSearch`]): fixed-depth minimax with
//!    alpha/beta cutoffs, collecting every root move tied at the best
//!    score. With a thread budget above one, root moves fan out onto a
//!    worker pool.
//! 2. **PVS** ([`PvsSearch`]): the same recursion with the principal
//!    variation optimization — the first move gets the full window,
//!    later moves a null-window probe with a re-search when the probe
//!    lands inside the window.
//! 3. **UCT** ([`UctSearch`]): time/iteration-bounded Monte Carlo tree
//!    search with value-guided progressive widening over an arena tree.
//!
//! # Usage
//!
//! ```rust,ignore
//! use gambit_core::{EvalConfig, Strategy};
//! use gambit_search::Evaluator;
//!
//! let config = EvalConfig::default().with_depth(4);
//! let mut evaluator = Evaluator::new(Strategy::AlphaBeta, board, config);
//! let outcome = evaluator.best_moves();
//! println!("score {} moves {:?}", outcome.score, outcome.best_moves);
//! ```

pub mod alphabeta;
pub mod evaluator;
pub mod node;
pub mod pvs;
pub mod tree;
pub mod uct;

// Re-export main types
pub use alphabeta::AlphaBetaSearch;
pub use evaluator::{Evaluator, SearchOutcome};
pub use node::{NodeId, UctNode};
pub use pvs::PvsSearch;
pub use tree::{TreeStats, UctTree};
pub use uct::UctSearch;
