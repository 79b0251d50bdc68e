//! Board capability for two-player zero-sum games.
//!
//! A game plugs into the search engines by implementing [`Board`] on its
//! state type. The searchers drive the game exclusively through this
//! surface: they enumerate moves, mutate the state in place (Alpha-Beta and
//! PVS search by apply/undo), branch by cloning (UCT and the parallel
//! root fan-out), and score positions through [`Board::evaluate`].

use std::fmt;

use crate::config::EvalConfig;

/// Capability a game state must provide to be searched.
///
/// `Clone` is part of the contract: a clone must be an independent deep
/// copy whose mutations never affect the original.
///
/// # Invariants the searchers rely on
///
/// - `apply(m)` followed by `undo(m)` restores a state indistinguishable
///   through this trait (same legal moves, terminal status, hash and
///   evaluation).
/// - `evaluate` is a pure function of the state and the configuration; it
///   must not mutate the board.
pub trait Board: Clone + Send + Sync + fmt::Debug {
    /// Move type. The engine treats moves as opaque tokens: it clones
    /// them, hands them back to the board, and prints them in
    /// diagnostics, nothing more.
    type Move: Clone + Send + Sync + fmt::Debug + fmt::Display;

    /// Enumerate the legal moves for the side to move.
    ///
    /// `max_to_move` identifies the side: `true` for the maximizing
    /// player. The returned order is the exploration order of the
    /// sequential searchers and the tie-breaking order at the root.
    fn legal_moves(&self, max_to_move: bool) -> Vec<Self::Move>;

    /// Apply a move in place.
    fn apply(&mut self, mv: &Self::Move);

    /// Reverse a prior [`Board::apply`] of the same move in place.
    fn undo(&mut self, mv: &Self::Move);

    /// Whether the game is over at this state.
    fn is_terminal(&self) -> bool;

    /// 64-bit hash of the state. Distinct reachable states should hash
    /// differently; the restoration invariant is checked through this.
    fn hash(&self) -> u64;

    /// Static evaluation of the state, higher is better for the
    /// maximizing side.
    ///
    /// The configuration carries the root side, the caller's ply counter
    /// and the extras map; Alpha-Beta and PVS write the absolute ply from
    /// the root into `extras["depth"]` before each leaf evaluation.
    fn evaluate(&self, config: &EvalConfig) -> f64;
}
