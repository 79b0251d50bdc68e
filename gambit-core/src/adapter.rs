//! Adapter for legacy positional evaluation callables.
//!
//! The fixed evaluation form takes the full configuration record. Callers
//! that still hold an evaluation function of the older positional shape
//! `fn(&board, is_max_player, step) -> f64` wrap their board in
//! [`PositionalEval`] instead of mixing the two forms: every capability
//! delegates to the inner board, only the evaluation is swapped.

use std::fmt;

use crate::board::Board;
use crate::config::EvalConfig;

/// Wraps a board together with a positional evaluation callable.
#[derive(Clone)]
pub struct PositionalEval<B, F> {
    inner: B,
    eval: F,
}

impl<B, F> PositionalEval<B, F>
where
    B: Board,
    F: Fn(&B, bool, u32) -> f64 + Clone + Send + Sync,
{
    pub fn new(inner: B, eval: F) -> Self {
        Self { inner, eval }
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }

    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B: fmt::Debug, F> fmt::Debug for PositionalEval<B, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionalEval")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl<B, F> Board for PositionalEval<B, F>
where
    B: Board,
    F: Fn(&B, bool, u32) -> f64 + Clone + Send + Sync,
{
    type Move = B::Move;

    fn legal_moves(&self, max_to_move: bool) -> Vec<Self::Move> {
        self.inner.legal_moves(max_to_move)
    }

    fn apply(&mut self, mv: &Self::Move) {
        self.inner.apply(mv);
    }

    fn undo(&mut self, mv: &Self::Move) {
        self.inner.undo(mv);
    }

    fn is_terminal(&self) -> bool {
        self.inner.is_terminal()
    }

    fn hash(&self) -> u64 {
        self.inner.hash()
    }

    fn evaluate(&self, config: &EvalConfig) -> f64 {
        (self.eval)(&self.inner, config.max_player, config.step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two-sided countdown, just enough board to exercise the adapter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Countdown(i8);

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Tick;

    impl fmt::Display for Tick {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("tick")
        }
    }

    impl Board for Countdown {
        type Move = Tick;

        fn legal_moves(&self, _max_to_move: bool) -> Vec<Tick> {
            if self.0 > 0 {
                vec![Tick]
            } else {
                Vec::new()
            }
        }

        fn apply(&mut self, _mv: &Tick) {
            self.0 -= 1;
        }

        fn undo(&mut self, _mv: &Tick) {
            self.0 += 1;
        }

        fn is_terminal(&self) -> bool {
            self.0 == 0
        }

        fn hash(&self) -> u64 {
            self.0 as u64
        }

        fn evaluate(&self, _config: &EvalConfig) -> f64 {
            f64::from(self.0)
        }
    }

    #[test]
    fn test_positional_callable_replaces_evaluate() {
        let board = PositionalEval::new(Countdown(3), |b: &Countdown, max_player, step| {
            if max_player {
                f64::from(b.0) * 2.0
            } else {
                -f64::from(step)
            }
        });

        let config = EvalConfig::default().with_step(5);
        assert_eq!(board.evaluate(&config), 6.0);

        let config = config.with_max_player(false);
        assert_eq!(board.evaluate(&config), -5.0);
    }

    #[test]
    fn test_capabilities_delegate_to_inner() {
        let mut board =
            PositionalEval::new(Countdown(2), |b: &Countdown, _, _| f64::from(b.0));

        assert!(!board.is_terminal());
        let mv = board.legal_moves(true)[0];
        board.apply(&mv);
        assert_eq!(board.hash(), 1);
        board.undo(&mv);
        assert_eq!(board.hash(), 2);
        assert_eq!(board.inner(), &Countdown(2));
    }
}
