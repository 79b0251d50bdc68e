//! Search-strategy tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The search strategies the evaluator façade can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Fixed-depth minimax with alpha-beta pruning.
    AlphaBeta,
    /// Principal Variation Search.
    Pvs,
    /// UCT Monte Carlo tree search.
    Uct,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::AlphaBeta, Strategy::Pvs, Strategy::Uct];

    /// Canonical tag string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::AlphaBeta => "ALPHA_BETA",
            Strategy::Pvs => "PVS",
            Strategy::Uct => "UCT",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a textual strategy tag is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported strategy tag `{0}`, expected one of ALPHA_BETA, PVS, UCT")]
pub struct StrategyParseError(pub String);

impl FromStr for Strategy {
    type Err = StrategyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALPHA_BETA" => Ok(Strategy::AlphaBeta),
            "PVS" => Ok(Strategy::Pvs),
            "UCT" => Ok(Strategy::Uct),
            other => Err(StrategyParseError(other.to_string())),
        }
    }
}
