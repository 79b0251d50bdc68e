//! Evaluation configuration.
//!
//! [`EvalConfig`] is the single record handed to every searcher and to
//! [`Board::evaluate`](crate::board::Board::evaluate). It is plain data:
//! the root board itself is passed to the evaluator façade separately, so
//! the record can be cloned into a search, serialized, or compared freely.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::extras::{keys, Extras};

/// Wall-clock budget applied when both the iteration and the time limit
/// are left at zero.
pub const DEFAULT_TIME_LIMIT_SECS: u64 = 10;

/// Tuning knobs for the UCT searcher.
///
/// Callers that predate this record may instead supply the equivalent
/// extras keys (`SimThresh`, `ExpandThresh`, `ExpandStep`, `ExpandTopN`,
/// `AheadStep`); when a key is present it overrides the field here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UctConfig {
    /// Simulations a leaf absorbs before an expansion event fires.
    pub sim_threshold: u32,
    /// Visit increments between expansion events at one node. The first
    /// event fires as soon as the node qualifies; each later event waits
    /// for this many further visits.
    pub expand_threshold: u32,
    /// Children materialized per expansion event.
    pub expand_step: u32,
    /// Hard cap on the children of a single node.
    pub expand_top_n: u32,
    /// Random plies played before a simulation is scored. Zero evaluates
    /// the leaf state immediately.
    pub ahead_step: u32,
}

impl Default for UctConfig {
    fn default() -> Self {
        Self {
            sim_threshold: 1,
            expand_threshold: 1000,
            expand_step: 5,
            expand_top_n: 250,
            ahead_step: 0,
        }
    }
}

impl UctConfig {
    /// Apply extras-key overrides on top of this record.
    ///
    /// Absent or mistyped keys leave the corresponding field untouched.
    pub fn resolve(&self, extras: &Extras) -> UctConfig {
        let field = |key: &str, current: u32| -> u32 {
            extras.get_int(key, i64::from(current)).max(0) as u32
        };
        UctConfig {
            sim_threshold: field(keys::SIM_THRESH, self.sim_threshold),
            expand_threshold: field(keys::EXPAND_THRESH, self.expand_threshold),
            expand_step: field(keys::EXPAND_STEP, self.expand_step),
            expand_top_n: field(keys::EXPAND_TOP_N, self.expand_top_n),
            ahead_step: field(keys::AHEAD_STEP, self.ahead_step),
        }
    }
}

/// Resolved search budget for UCT.
///
/// `None` in a dimension means that dimension is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    pub iterations: Option<u64>,
    pub time: Option<Duration>,
}

/// Evaluation configuration record.
///
/// Constructed with [`EvalConfig::default`] plus `with_*` setters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Search horizon for Alpha-Beta and PVS; decreases down the
    /// recursion.
    pub depth: u32,
    /// Caller-supplied game-ply counter, forwarded to evaluators.
    pub step: u32,
    /// Whether the maximizing player moves at the root.
    pub max_player: bool,
    /// UCT iteration limit; zero means unbounded by iterations.
    pub iterations: u64,
    /// UCT wall-clock limit in seconds; zero means unbounded by time.
    /// When both this and `iterations` are zero a default of
    /// [`DEFAULT_TIME_LIMIT_SECS`] applies.
    pub time_limit_secs: u64,
    /// Maximum worker fan-out for parallel Alpha-Beta; values below two
    /// select the sequential search.
    pub threads: usize,
    /// Emit a diagnostic summary after the search returns.
    pub detail: bool,
    /// UCT tuning knobs.
    pub uct: UctConfig,
    /// Auxiliary values for evaluators and forward-compatible callers.
    pub extras: Extras,
    /// Seed for the per-search RNG; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            depth: 1,
            step: 1,
            max_player: true,
            iterations: 0,
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            threads: 1,
            detail: false,
            uct: UctConfig::default(),
            extras: Extras::new(),
            seed: None,
        }
    }
}

impl EvalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: set the search depth.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Builder pattern: set the caller's ply counter.
    pub fn with_step(mut self, step: u32) -> Self {
        self.step = step;
        self
    }

    /// Builder pattern: set the side to move at the root.
    pub fn with_max_player(mut self, max_player: bool) -> Self {
        self.max_player = max_player;
        self
    }

    /// Builder pattern: set the UCT iteration limit (zero = unbounded).
    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }

    /// Builder pattern: set the UCT time limit in seconds (zero =
    /// unbounded).
    pub fn with_time_limit_secs(mut self, secs: u64) -> Self {
        self.time_limit_secs = secs;
        self
    }

    /// Builder pattern: set the parallel Alpha-Beta fan-out.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Builder pattern: request the diagnostic summary.
    pub fn with_detail(mut self, detail: bool) -> Self {
        self.detail = detail;
        self
    }

    /// Builder pattern: replace the UCT tuning knobs.
    pub fn with_uct(mut self, uct: UctConfig) -> Self {
        self.uct = uct;
        self
    }

    /// Builder pattern: add one extras entry.
    pub fn with_extra(
        mut self,
        key: impl Into<String>,
        value: impl Into<crate::extras::ExtraValue>,
    ) -> Self {
        self.extras.set(key, value);
        self
    }

    /// Builder pattern: fix the per-search RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Resolve the UCT budget.
    ///
    /// Zero means unbounded per dimension; with both dimensions at zero
    /// the [`DEFAULT_TIME_LIMIT_SECS`] wall-clock bound applies.
    pub fn budget(&self) -> Budget {
        match (self.iterations, self.time_limit_secs) {
            (0, 0) => Budget {
                iterations: None,
                time: Some(Duration::from_secs(DEFAULT_TIME_LIMIT_SECS)),
            },
            (0, t) => Budget {
                iterations: None,
                time: Some(Duration::from_secs(t)),
            },
            (i, 0) => Budget {
                iterations: Some(i),
                time: None,
            },
            (i, t) => Budget {
                iterations: Some(i),
                time: Some(Duration::from_secs(t)),
            },
        }
    }
}
