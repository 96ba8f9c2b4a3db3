use std::collections::HashMap;

use rand::Rng;

/// Multiset of tokens supporting weighted random draws.
///
/// Each token is stored once with the number of times it was added.
/// Drawing a token uses a cumulative partition of `[0, 1)` where every token
/// owns a half-open interval whose width is `count / total`.
///
/// ## Responsibilities:
/// - Accumulate token occurrences during learning
/// - Draw a token with probability proportional to its occurrence count
///
/// ## Invariants
/// - Tokens keep the order of their first insertion
/// - Each occurrence count is strictly positive
/// - When not dirty, `bounds` holds one upper bound per token, increasing,
///   and the last one is exactly `1.0`
#[derive(Clone, Debug, Default)]
pub struct TokenCollection {
	/// Tokens with their occurrence count, in first-insertion order.
	entries: Vec<(String, usize)>,
	/// Position of each token inside `entries`.
	index: HashMap<String, usize>,
	/// Sum of all occurrence counts.
	total: usize,
	/// Upper bound of each token interval, aligned with `entries`.
	bounds: Vec<f64>,
	/// Set by `add`, cleared once `bounds` is rebuilt.
	dirty: bool,
}

impl TokenCollection {
	/// Creates an empty collection.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a collection holding a single occurrence of `token`.
	pub fn with_token(token: &str) -> Self {
		let mut collection = Self::new();
		collection.add(token);
		collection
	}

	/// Records one occurrence of `token`.
	///
	/// - If the token already exists, its occurrence count is increased.
	/// - Otherwise, it is appended with an initial count of 1.
	///
	/// Intervals are not recomputed here, only flagged as stale.
	pub fn add(&mut self, token: &str) {
		match self.index.get(token) {
			Some(&position) => self.entries[position].1 += 1,
			None => {
				self.index.insert(token.to_owned(), self.entries.len());
				self.entries.push((token.to_owned(), 1));
			}
		}
		self.total += 1;
		self.dirty = true;
	}

	/// Number of distinct tokens.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Sum of all occurrence counts.
	pub fn total(&self) -> usize {
		self.total
	}

	/// Occurrence count of `token`, if present.
	pub fn count(&self, token: &str) -> Option<usize> {
		self.index.get(token).map(|&position| self.entries[position].1)
	}

	pub fn contains(&self, token: &str) -> bool {
		self.index.contains_key(token)
	}

	/// Tokens in first-insertion order.
	pub fn tokens(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|(token, _)| token.as_str())
	}

	/// Returns `(token, from, to)` for each token, rebuilding the partition first
	/// if needed.
	pub fn intervals(&mut self) -> impl Iterator<Item = (&str, f64, f64)> {
		self.ensure_intervals();
		let froms = std::iter::once(0.0).chain(self.bounds.iter().copied());
		self.entries
			.iter()
			.zip(froms.zip(self.bounds.iter().copied()))
			.map(|((token, _), (from, to))| (token.as_str(), from, to))
	}

	/// Draws a token with probability proportional to its occurrence count.
	///
	/// Returns `None` if the collection is empty.
	pub fn get_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&str> {
		if self.entries.len() == 1 {
			return Some(self.entries[0].0.as_str());
		}
		let r: f64 = rng.random();
		self.pick(r)
	}

	/// Returns the token whose interval `[from, to)` contains `r`.
	///
	/// A value lying exactly on a boundary belongs to the interval starting there.
	/// Returns `None` if the collection is empty or `r` is outside `[0, 1)`.
	pub fn pick(&mut self, r: f64) -> Option<&str> {
		if !(0.0..1.0).contains(&r) {
			return None;
		}
		self.ensure_intervals();

		// First interval whose upper bound is strictly above `r`
		let position = self.bounds.partition_point(|&to| to <= r);
		self.entries.get(position).map(|(token, _)| token.as_str())
	}

	fn ensure_intervals(&mut self) {
		if !self.dirty {
			return;
		}
		self.bounds = Self::compute_bounds(&self.entries, self.total);
		self.dirty = false;
	}

	/// Computes the upper bound of every interval from cumulative counts.
	///
	/// Bounds are derived from integer prefix sums rather than accumulated
	/// floats, so they never drift and the last one is exactly `1.0`.
	fn compute_bounds(entries: &[(String, usize)], total: usize) -> Vec<f64> {
		let mut cumulative = 0;
		entries
			.iter()
			.map(|(_, occurrence)| {
				cumulative += occurrence;
				if cumulative == total {
					1.0
				} else {
					cumulative as f64 / total as f64
				}
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn collection(tokens: &[&str]) -> TokenCollection {
		let mut collection = TokenCollection::new();
		for token in tokens {
			collection.add(token);
		}
		collection
	}

	#[test]
	fn add_accumulates_counts_in_insertion_order() {
		let c = collection(&["b", "a", "b", "c", "b"]);
		assert_eq!(c.len(), 3);
		assert_eq!(c.total(), 5);
		assert_eq!(c.count("b"), Some(3));
		assert_eq!(c.count("a"), Some(1));
		assert_eq!(c.count("z"), None);
		assert_eq!(c.tokens().collect::<Vec<_>>(), vec!["b", "a", "c"]);
	}

	#[test]
	fn intervals_partition_unit_range() {
		let mut c = collection(&["a", "b", "b", "b"]);
		let intervals: Vec<_> = c.intervals().map(|(t, f, to)| (t.to_owned(), f, to)).collect();
		assert_eq!(intervals, vec![("a".to_owned(), 0.0, 0.25), ("b".to_owned(), 0.25, 1.0)]);
	}

	#[test]
	fn pick_uses_half_open_intervals() {
		let mut c = collection(&["a", "b", "b", "b"]);
		assert_eq!(c.pick(0.0), Some("a"));
		assert_eq!(c.pick(0.2499), Some("a"));
		assert_eq!(c.pick(0.25), Some("b"));
		assert_eq!(c.pick(0.999_999), Some("b"));
		assert_eq!(c.pick(1.0), None);
		assert_eq!(c.pick(-0.1), None);
	}

	#[test]
	fn intervals_are_rebuilt_after_add() {
		let mut c = collection(&["a", "b"]);
		assert_eq!(c.pick(0.6), Some("b"));
		c.add("a");
		c.add("a");
		// a now covers [0, 0.75)
		assert_eq!(c.pick(0.6), Some("a"));
	}

	#[test]
	fn empty_collection_draws_nothing() {
		let mut c = TokenCollection::new();
		let mut rng = StdRng::seed_from_u64(1);
		assert!(c.is_empty());
		assert_eq!(c.get_random(&mut rng), None);
		assert_eq!(c.pick(0.5), None);
	}

	#[test]
	fn single_token_is_always_drawn() {
		let mut c = TokenCollection::with_token("alone");
		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..100 {
			assert_eq!(c.get_random(&mut rng), Some("alone"));
		}
	}

	#[test]
	fn draws_follow_occurrence_counts() {
		let mut c = collection(&["a", "b", "b", "b"]);
		let mut rng = StdRng::seed_from_u64(42);
		let draws = 10_000;
		let a_count = (0..draws)
			.filter(|_| c.get_random(&mut rng) == Some("a"))
			.count();
		let ratio = a_count as f64 / draws as f64;
		assert!((ratio - 0.25).abs() < 0.02, "unexpected ratio {ratio}");
	}
}
