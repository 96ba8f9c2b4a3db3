use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, GenError>;

/// Errors raised while loading a corpus or configuring generation.
///
/// A generation that produces nothing is not an error: it is reported as
/// `None` by [`ChainGenerator::generate`](crate::model::chain_generator::ChainGenerator::generate).
#[derive(Error, Debug)]
pub enum GenError {
	/// The corpus file could not be read.
	#[error("Failed to read corpus: {0}")]
	Io(#[from] std::io::Error),

	/// A tokenizer pattern is not a valid regular expression.
	#[error("Invalid tokenizer pattern: {0}")]
	Pattern(#[from] regex::Error),

	#[error("Context usage degree must be between 0.0 and 1.0, got {0}")]
	InvalidContextUsageDegree(f64),

	/// `max` must be at least 1 and not lower than `min`.
	#[error("Invalid word bounds: min={min}, max={max}")]
	InvalidWordBounds { min: usize, max: usize },
}

/// Reason a single generation attempt was abandoned.
///
/// Attempt failures are expected with small corpora and are recovered by
/// retrying; they never reach the caller directly.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptFailure {
	/// No start word was forced and the corpus has no start tokens.
	#[error("no start token available")]
	NoStartToken,

	/// The chain ran dry before reaching the minimum length.
	#[error("chain ran dry after {len} words (min {min})")]
	InsufficientCorpus { len: usize, min: usize },

	/// The maximum length was reached without a valid ending.
	#[error("reached {max} words without a finish token")]
	LengthExceeded { max: usize },

	/// A successor collection produced no token.
	#[error("weighted draw produced no token")]
	EmptyDraw,
}
