//! Property-based tests for `TokenCollection`.
//!
//! Verifies the probability partition after arbitrary insertions:
//! - Intervals are contiguous, ordered and cover `[0, 1)` exactly
//! - Each interval width matches `count / total`
//! - Every value of `[0, 1)` maps to the token owning its interval

use proptest::collection::vec as arb_vec;
use proptest::prelude::*;

use phrase_gen_core::model::token_collection::TokenCollection;

const TOLERANCE: f64 = 1e-9;

fn arb_tokens() -> impl Strategy<Value = Vec<String>> {
	arb_vec("[a-e]{1,2}", 1..200)
}

fn build(tokens: &[String]) -> TokenCollection {
	let mut collection = TokenCollection::new();
	for token in tokens {
		collection.add(token);
	}
	collection
}

proptest! {
	#[test]
	fn intervals_partition_unit_range(tokens in arb_tokens()) {
		let mut collection = build(&tokens);
		let total = collection.total() as f64;
		prop_assert_eq!(collection.total(), tokens.len());

		let counts: Vec<usize> = collection
			.tokens()
			.map(|token| collection.count(token).unwrap())
			.collect();
		let intervals: Vec<(String, f64, f64)> = collection
			.intervals()
			.map(|(token, from, to)| (token.to_owned(), from, to))
			.collect();

		prop_assert_eq!(intervals.len(), counts.len());
		prop_assert_eq!(intervals[0].1, 0.0);
		prop_assert_eq!(intervals[intervals.len() - 1].2, 1.0);

		for window in intervals.windows(2) {
			prop_assert_eq!(window[0].2, window[1].1);
		}
		for ((_, from, to), count) in intervals.iter().zip(&counts) {
			prop_assert!(from < to);
			prop_assert!((to - from - *count as f64 / total).abs() < TOLERANCE);
		}
	}

	#[test]
	fn pick_returns_interval_owner(tokens in arb_tokens(), r in 0.0f64..1.0) {
		let mut collection = build(&tokens);
		let owner = collection
			.intervals()
			.find(|(_, from, to)| *from <= r && r < *to)
			.map(|(token, _, _)| token.to_owned());
		prop_assert!(owner.is_some());
		prop_assert_eq!(collection.pick(r).map(str::to_owned), owner);
	}

	#[test]
	fn insertion_after_draw_refreshes_intervals(tokens in arb_tokens(), extra in "[f-g]") {
		let mut collection = build(&tokens);
		let _ = collection.pick(0.5);
		collection.add(&extra);

		let last = collection.intervals().last().map(|(token, _, to)| (token.to_owned(), to));
		prop_assert_eq!(last, Some((extra.clone(), 1.0)));
	}
}
