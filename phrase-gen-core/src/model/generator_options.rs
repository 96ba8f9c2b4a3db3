use crate::error::{GenError, Result};

pub const DEFAULT_MIN_WORD_COUNT: usize = 7;
pub const DEFAULT_MAX_WORD_COUNT: usize = 20;
pub const DEFAULT_CONTEXT_USAGE_DEGREE: f64 = 0.5;
pub const DEFAULT_RETRY_COUNT: usize = 100;

/// Parameters of a generation run.
///
/// # Responsibilities
/// - Track the optional forced start word and the retry budget
/// - Keep the word bounds and the context usage degree within valid ranges
///
/// # Invariants
/// - `1 <= max_word_count` and `min_word_count <= max_word_count`
/// - `context_usage_degree` lies in `[0.0, 1.0]`
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorOptions {
	/// Forces the first word instead of drawing a start token.
	/// Lower-cased before use.
	pub start_word: Option<String>,

	/// Number of independent attempts before giving up.
	pub retry_count: usize,

	min_word_count: usize,
	max_word_count: usize,

	/// Probability of preferring the order-2 chain when both orders apply.
	/// The higher it is, the closer the output sticks to the corpus.
	context_usage_degree: f64,
}

impl Default for GeneratorOptions {
	fn default() -> Self {
		Self {
			start_word: None,
			retry_count: DEFAULT_RETRY_COUNT,
			min_word_count: DEFAULT_MIN_WORD_COUNT,
			max_word_count: DEFAULT_MAX_WORD_COUNT,
			context_usage_degree: DEFAULT_CONTEXT_USAGE_DEGREE,
		}
	}
}

impl GeneratorOptions {
	pub fn min_word_count(&self) -> usize {
		self.min_word_count
	}

	pub fn max_word_count(&self) -> usize {
		self.max_word_count
	}

	pub fn context_usage_degree(&self) -> f64 {
		self.context_usage_degree
	}

	/// Sets both length bounds at once.
	///
	/// # Errors
	/// Returns an error if `max` is zero or lower than `min`.
	pub fn set_word_bounds(&mut self, min: usize, max: usize) -> Result<()> {
		if max == 0 || min > max {
			return Err(GenError::InvalidWordBounds { min, max });
		}
		self.min_word_count = min;
		self.max_word_count = max;
		Ok(())
	}

	/// Sets the context usage degree (0.0..=1.0).
	///
	/// # Errors
	/// Returns an error if the value is outside the valid range (NaN included).
	pub fn set_context_usage_degree(&mut self, degree: f64) -> Result<()> {
		if !(0.0..=1.0).contains(&degree) {
			return Err(GenError::InvalidContextUsageDegree(degree));
		}
		self.context_usage_degree = degree;
		Ok(())
	}

	/// Returns the forced start word, lower-cased.
	pub(crate) fn normalized_start_word(&self) -> Option<String> {
		self.start_word.as_deref().map(str::to_lowercase)
	}
}
