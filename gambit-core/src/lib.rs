//! Core traits and types for the Gambit game-search engine
//!
//! This crate provides the fundamental abstractions shared by every searcher:
//! - `Board`: the capability a two-player zero-sum game must implement
//! - `EvalConfig`: the evaluation configuration record with builder setters
//! - `Extras`: string-keyed auxiliary values forwarded to evaluators
//! - `Strategy`: the search-strategy tag dispatched by the evaluator façade
//! - `PositionalEval`: adapter for legacy positional evaluation callables

pub mod adapter;
pub mod board;
pub mod config;
pub mod extras;
pub mod strategy;

// Re-export main types for convenience
pub use adapter::PositionalEval;
pub use board::Board;
pub use config::{Budget, EvalConfig, UctConfig, DEFAULT_TIME_LIMIT_SECS};
pub use extras::{keys, ExtraValue, Extras};
pub use strategy::{Strategy, StrategyParseError};
