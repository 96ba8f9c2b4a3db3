//! Word-level Markov text generation library.
//!
//! This crate learns which words follow each word and each pair of words in a
//! corpus, then generates new word sequences that statistically resemble it:
//! - Weighted token collections with lazy probability intervals
//! - Order-1 / order-2 blended successor lookup
//! - Bounded, retryable random walks with valid-ending constraints
//! - Corpus tokenization and sentence formatting
//!
//! ```no_run
//! use phrase_gen_core::model::chain_generator::ChainGenerator;
//! use phrase_gen_core::model::generator_options::GeneratorOptions;
//! use phrase_gen_core::text::format_sentence;
//!
//! let mut chain = ChainGenerator::new("./data/corpus.txt")?;
//! if let Some(words) = chain.generate(&GeneratorOptions::default()) {
//!     println!("{}", format_sentence(&words));
//! }
//! # Ok::<(), phrase_gen_core::error::GenError>(())
//! ```

/// Markov chain model and generation logic.
pub mod model;

/// Corpus tokenization and output formatting.
pub mod text;

/// Error types.
pub mod error;

/// Corpus file helpers.
pub mod io;
