//! Word-level Markov chain and its generation logic.
//!
//! This module provides:
//! - Weighted token collections (`TokenCollection`)
//! - The blended order-1 / order-2 successor table (`SuccessorTable`)
//! - The chain itself, built from a corpus (`ChainGenerator`)
//! - Generation parameters (`GeneratorOptions`)

/// Markov chain built from a corpus, with retryable generation.
///
/// Owns start tokens, finish tokens and the successor table.
pub mod chain_generator;

/// Generation parameters with validated bounds.
pub mod generator_options;

/// Context keys and the successor table they index.
///
/// Also hosts the choice between order-2 and order-1 successors.
pub mod successor_table;

/// Multiset of tokens with lazily computed probability intervals.
pub mod token_collection;
