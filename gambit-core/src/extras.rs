//! String-keyed auxiliary configuration values.
//!
//! Extras travel inside [`EvalConfig`](crate::config::EvalConfig) and are
//! visible to evaluators and to the UCT tuning knobs. Lookups are typed
//! and fall back to a caller-supplied default when the key is absent or
//! holds a value of another type.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Well-known extras keys.
pub mod keys {
    /// Absolute ply from the root, written by Alpha-Beta/PVS before each
    /// leaf evaluation.
    pub const DEPTH: &str = "depth";

    /// Simulations a UCT node absorbs before an expansion event.
    pub const SIM_THRESH: &str = "SimThresh";
    /// Root-visit increments between UCT expansion events.
    pub const EXPAND_THRESH: &str = "ExpandThresh";
    /// Children materialized per UCT expansion event.
    pub const EXPAND_STEP: &str = "ExpandStep";
    /// Hard cap on the children of a single UCT node.
    pub const EXPAND_TOP_N: &str = "ExpandTopN";
    /// Random plies played out before a UCT simulation is scored.
    pub const AHEAD_STEP: &str = "AheadStep";
}

/// A single auxiliary value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtraValue {
    Int(i64),
    Flag(bool),
    Text(String),
}

impl fmt::Display for ExtraValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtraValue::Int(v) => write!(f, "{v}"),
            ExtraValue::Flag(v) => write!(f, "{v}"),
            ExtraValue::Text(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for ExtraValue {
    fn from(v: i64) -> Self {
        ExtraValue::Int(v)
    }
}

impl From<bool> for ExtraValue {
    fn from(v: bool) -> Self {
        ExtraValue::Flag(v)
    }
}

impl From<&str> for ExtraValue {
    fn from(v: &str) -> Self {
        ExtraValue::Text(v.to_string())
    }
}

impl From<String> for ExtraValue {
    fn from(v: String) -> Self {
        ExtraValue::Text(v)
    }
}

/// String-keyed map of auxiliary values.
///
/// Iteration order is the key order, so diagnostic output is stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extras(BTreeMap<String, ExtraValue>);

impl Extras {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ExtraValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Raw lookup.
    pub fn get(&self, key: &str) -> Option<&ExtraValue> {
        self.0.get(key)
    }

    /// Integer lookup; `default` when the key is absent or not an integer.
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.0.get(key) {
            Some(ExtraValue::Int(v)) => *v,
            _ => default,
        }
    }

    /// Flag lookup; `default` when the key is absent or not a flag.
    pub fn get_flag(&self, key: &str, default: bool) -> bool {
        match self.0.get(key) {
            Some(ExtraValue::Flag(v)) => *v,
            _ => default,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExtraValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}
