use std::collections::HashSet;
use std::path::Path;

use log::{debug, info, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::generator_options::GeneratorOptions;
use super::successor_table::{ContextKey, SuccessorTable, blend};
use super::token_collection::TokenCollection;
use crate::error::{AttemptFailure, Result};
use crate::io::read_lines;
use crate::text::Tokenizer;

/// Last words shorter than this (in characters) are not used as sentence endings.
pub const DEFAULT_MIN_FINISH_LEN: usize = 3;

/// Size summary of a [`ChainGenerator`].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChainStats {
	pub start_tokens: usize,
	pub finish_tokens: usize,
	pub single_contexts: usize,
	pub pair_contexts: usize,
}

/// Word-level Markov chain blending one and two words of context.
///
/// This struct manages:
/// - `start_tokens`: first words of the corpus sentences, weighted by frequency.
/// - `finish_tokens`: last words of the corpus sentences that are long enough
///   to end a generated sequence.
/// - `successors`: words observed after each single word and each word pair.
///
/// The chain is built once from a corpus and has no public mutation afterwards.
/// Generation still needs `&mut self`: drawing refreshes the lazily computed
/// probability intervals of the collections it reads.
#[derive(Clone, Debug)]
pub struct ChainGenerator {
	start_tokens: TokenCollection,
	finish_tokens: HashSet<String>,
	successors: SuccessorTable,
	min_finish_len: usize,
}

impl Default for ChainGenerator {
	fn default() -> Self {
		Self {
			start_tokens: TokenCollection::new(),
			finish_tokens: HashSet::new(),
			successors: SuccessorTable::new(),
			min_finish_len: DEFAULT_MIN_FINISH_LEN,
		}
	}
}

impl ChainGenerator {
	/// Builds a chain from a newline-delimited corpus file.
	///
	/// Lines are split with the default [`Tokenizer`] and sentence endings use
	/// [`DEFAULT_MIN_FINISH_LEN`].
	///
	/// # Errors
	/// Returns an error if the file cannot be read.
	pub fn new<P: AsRef<Path>>(filepath: P) -> Result<Self> {
		let lines = read_lines(&filepath)?;
		let chain = Self::from_lines(lines);

		let stats = chain.stats();
		info!(
			"Loaded corpus {}: {} start tokens, {} finish tokens, {} single / {} pair contexts",
			filepath.as_ref().display(),
			stats.start_tokens,
			stats.finish_tokens,
			stats.single_contexts,
			stats.pair_contexts
		);

		Ok(chain)
	}

	/// Builds a chain from in-memory corpus lines with the default tokenizer.
	pub fn from_lines<I, S>(lines: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		Self::from_lines_with(lines, &Tokenizer::default(), DEFAULT_MIN_FINISH_LEN)
	}

	/// Builds a chain from corpus lines with a custom tokenizer and ending threshold.
	pub fn from_lines_with<I, S>(lines: I, tokenizer: &Tokenizer, min_finish_len: usize) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		Self::from_sentences(tokenizer.sentences_of(lines), min_finish_len)
	}

	/// Builds a chain from already tokenized sentences, in a single pass.
	///
	/// # Behavior
	/// - The first word of every non-empty sentence becomes a start token.
	/// - The last word becomes a finish token if it has at least
	///   `min_finish_len` characters.
	/// - Adjacent words and word triples feed the successor table.
	pub fn from_sentences<I, W, S>(sentences: I, min_finish_len: usize) -> Self
	where
		I: IntoIterator<Item = W>,
		W: AsRef<[S]>,
		S: AsRef<str>,
	{
		let mut chain = Self {
			min_finish_len,
			..Self::default()
		};
		for sentence in sentences {
			chain.add_sentence(sentence.as_ref());
		}
		chain
	}

	fn add_sentence<S: AsRef<str>>(&mut self, words: &[S]) {
		let (Some(first), Some(last)) = (words.first(), words.last()) else {
			return;
		};

		self.start_tokens.add(first.as_ref());

		let last = last.as_ref();
		if last.chars().count() >= self.min_finish_len {
			self.finish_tokens.insert(last.to_owned());
		}

		self.successors.add_sentence(words);
	}

	pub fn start_tokens(&self) -> &TokenCollection {
		&self.start_tokens
	}

	pub fn finish_tokens(&self) -> &HashSet<String> {
		&self.finish_tokens
	}

	pub fn successors(&self) -> &SuccessorTable {
		&self.successors
	}

	pub fn stats(&self) -> ChainStats {
		ChainStats {
			start_tokens: self.start_tokens.len(),
			finish_tokens: self.finish_tokens.len(),
			single_contexts: self.successors.single_len(),
			pair_contexts: self.successors.pair_len(),
		}
	}

	/// Generates a word sequence using the thread-local random source.
	///
	/// See [`generate_with`](Self::generate_with).
	pub fn generate(&mut self, options: &GeneratorOptions) -> Option<Vec<String>> {
		self.generate_with(options, &mut rand::rng())
	}

	/// Generates a word sequence, retrying failed attempts.
	///
	/// # Returns
	/// - `Some(words)`: the first successful attempt, with
	///   `min_word_count <= words.len() <= max_word_count`.
	/// - `None`: all `retry_count` attempts failed (or the chain has no start
	///   token and no start word was forced).
	///
	/// # Notes
	/// - Each attempt draws a new start token unless `start_word` is set.
	/// - Never returns a partial sequence.
	pub fn generate_with<R: Rng + ?Sized>(&mut self, options: &GeneratorOptions, rng: &mut R) -> Option<Vec<String>> {
		let forced_start = options.normalized_start_word();

		for attempt in 1..=options.retry_count {
			let start = match &forced_start {
				Some(word) => Some(word.clone()),
				None => self.start_tokens.get_random(rng).map(str::to_owned),
			};

			let outcome = match start {
				Some(start) => self.walk(start, options, rng),
				None => Err(AttemptFailure::NoStartToken),
			};

			match outcome {
				Ok(words) => {
					debug!("Generated {} words on attempt {}/{}", words.len(), attempt, options.retry_count);
					return Some(words);
				}
				Err(AttemptFailure::NoStartToken) => {
					// Retrying cannot produce a start token
					debug!("Attempt {}/{} failed: {}", attempt, options.retry_count, AttemptFailure::NoStartToken);
					break;
				}
				Err(failure) => debug!("Attempt {}/{} failed: {}", attempt, options.retry_count, failure),
			}
		}

		debug!("No sequence generated within {} attempts", options.retry_count);
		None
	}

	/// Runs a single walk along the chain starting from `start`.
	///
	/// Each step looks up the `(previous, current)` pair (when a previous word
	/// exists) and the `current` word, blends them according to the context
	/// usage degree, and draws the next word.
	///
	/// # Stopping rules, checked in order
	/// 1. No successors: success if at least `min_word_count` words, else failure.
	/// 2. Already `max_word_count` words while successors remain: failure.
	/// 3. The drawn word is a finish token and there are strictly more than
	///    `min_word_count` words: success.
	/// 4. `max_word_count` words reached: failure.
	fn walk<R: Rng + ?Sized>(
		&mut self,
		start: String,
		options: &GeneratorOptions,
		rng: &mut R,
	) -> std::result::Result<Vec<String>, AttemptFailure> {
		let min = options.min_word_count();
		let max = options.max_word_count();

		let mut previous: Option<String> = None;
		let mut current = start.clone();
		let mut words = vec![start];

		loop {
			let context = previous
				.as_deref()
				.map(|previous| ContextKey::pair(previous, &current))
				.filter(|key| self.successors.contains(key));
			let plain = Some(ContextKey::single(&current)).filter(|key| self.successors.contains(key));

			let Some(key) = blend(context, plain, options.context_usage_degree(), rng) else {
				return if words.len() >= min {
					Ok(words)
				} else {
					Err(AttemptFailure::InsufficientCorpus { len: words.len(), min })
				};
			};

			// One more word would not fit
			if words.len() >= max {
				return Err(AttemptFailure::LengthExceeded { max });
			}

			let next = self
				.successors
				.get_mut(&key)
				.and_then(|successors| successors.get_random(rng))
				.map(str::to_owned)
				.ok_or(AttemptFailure::EmptyDraw)?;
			trace!("{} -> {}", key, next);

			words.push(next.clone());

			if words.len() > min && self.finish_tokens.contains(&next) {
				return Ok(words);
			}

			if words.len() >= max {
				return Err(AttemptFailure::LengthExceeded { max });
			}

			previous = Some(std::mem::replace(&mut current, next));
		}
	}
}
