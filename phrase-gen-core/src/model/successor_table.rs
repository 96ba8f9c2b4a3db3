use std::collections::HashMap;
use std::fmt;

use rand::Rng;

use super::token_collection::TokenCollection;

/// Lookup key of the successor table.
///
/// `Single` keys form the order-1 chain (one word of context), `Pair` keys the
/// order-2 chain (previous word, current word).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ContextKey {
	Single(String),
	Pair(String, String),
}

impl ContextKey {
	pub fn single(current: &str) -> Self {
		ContextKey::Single(current.to_owned())
	}

	pub fn pair(previous: &str, current: &str) -> Self {
		ContextKey::Pair(previous.to_owned(), current.to_owned())
	}
}

impl fmt::Display for ContextKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ContextKey::Single(current) => write!(f, "{current}"),
			ContextKey::Pair(previous, current) => write!(f, "{previous}|{current}"),
		}
	}
}

/// Blended order-1 / order-2 successor table.
///
/// Maps every context observed in the corpus to the collection of words that
/// followed it.
///
/// # Invariants
/// - Every stored collection holds at least one token
/// - A `Pair(a, b)` key only exists if `Single(b)` exists too
#[derive(Clone, Debug, Default)]
pub struct SuccessorTable {
	entries: HashMap<ContextKey, TokenCollection>,
}

impl SuccessorTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers every adjacent pair and triple of a sentence.
	///
	/// For each position `i`, `words[i + 1]` is recorded after `Single(words[i])`
	/// and, when `i >= 1`, after `Pair(words[i - 1], words[i])`.
	/// Sentences shorter than two words are ignored.
	pub fn add_sentence<S: AsRef<str>>(&mut self, words: &[S]) {
		for (i, window) in words.windows(2).enumerate() {
			let current = window[0].as_ref();
			let next = window[1].as_ref();

			self.record(ContextKey::single(current), next);

			if i > 0 {
				let previous = words[i - 1].as_ref();
				self.record(ContextKey::pair(previous, current), next);
			}
		}
	}

	fn record(&mut self, key: ContextKey, next: &str) {
		match self.entries.get_mut(&key) {
			Some(collection) => collection.add(next),
			None => {
				self.entries.insert(key, TokenCollection::with_token(next));
			}
		}
	}

	pub fn get(&self, key: &ContextKey) -> Option<&TokenCollection> {
		self.entries.get(key)
	}

	pub fn get_mut(&mut self, key: &ContextKey) -> Option<&mut TokenCollection> {
		self.entries.get_mut(key)
	}

	pub fn contains(&self, key: &ContextKey) -> bool {
		self.entries.contains_key(key)
	}

	/// Total number of keys (both orders).
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Number of order-1 keys.
	pub fn single_len(&self) -> usize {
		self.entries
			.keys()
			.filter(|key| matches!(key, ContextKey::Single(_)))
			.count()
	}

	/// Number of order-2 keys.
	pub fn pair_len(&self) -> usize {
		self.len() - self.single_len()
	}
}

/// Chooses between an order-2 candidate and its order-1 fallback.
///
/// - Both present: `context` with probability `degree`, `fallback` otherwise.
/// - Only one present: that one, without consuming randomness.
/// - None present: `None`.
///
/// `degree` is expected in `[0, 1]`; a degree of `1.0` always keeps the context
/// since the draw lies in `[0, 1)`.
pub fn blend<T, R: Rng + ?Sized>(context: Option<T>, fallback: Option<T>, degree: f64, rng: &mut R) -> Option<T> {
	match (context, fallback) {
		(Some(context), Some(fallback)) => {
			if rng.random::<f64>() < degree {
				Some(context)
			} else {
				Some(fallback)
			}
		}
		(context, fallback) => context.or(fallback),
	}
}
