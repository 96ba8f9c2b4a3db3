use regex::Regex;

use crate::error::Result;

/// Punctuation ending a sentence fragment: colon, question and exclamation
/// marks, period, semicolon, comma, parentheses and spaced dashes.
pub const DEFAULT_SEPARATOR: &str = r":|\?|!|\.|;|,|\(|\)| - | — ";

/// A fragment is kept only if made of letters, digits, hyphens and spaces.
pub const DEFAULT_ALLOWED: &str = r"^[\p{L}\p{N}\- ]+$";

/// Splits raw corpus lines into sentences of lower-cased words.
///
/// Fragments containing anything outside the allow-list are dropped whole,
/// so no word is silently removed from the middle of a sentence.
#[derive(Clone, Debug)]
pub struct Tokenizer {
	separator: Regex,
	allowed: Regex,
}

impl Default for Tokenizer {
	fn default() -> Self {
		// Both patterns are constants known to compile
		Self::new(DEFAULT_SEPARATOR, DEFAULT_ALLOWED).expect("default tokenizer patterns are valid")
	}
}

impl Tokenizer {
	/// Builds a tokenizer from a sentence separator and an allow-list pattern.
	///
	/// # Errors
	/// Returns an error if either pattern is not a valid regular expression.
	pub fn new(separator: &str, allowed: &str) -> Result<Self> {
		Ok(Self {
			separator: Regex::new(separator)?,
			allowed: Regex::new(allowed)?,
		})
	}

	/// Splits a single line into sentences of words.
	pub fn sentences(&self, line: &str) -> Vec<Vec<String>> {
		let line = line.trim().to_lowercase();
		self.separator
			.split(&line)
			.map(str::trim)
			.filter(|fragment| self.allowed.is_match(fragment))
			.map(|fragment| fragment.split_whitespace().map(str::to_owned).collect::<Vec<_>>())
			.filter(|words| !words.is_empty())
			.collect()
	}

	/// Splits every line and concatenates the sentences, keeping line order.
	pub fn sentences_of<I, S>(&self, lines: I) -> Vec<Vec<String>>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		lines
			.into_iter()
			.flat_map(|line| self.sentences(line.as_ref()))
			.collect()
	}
}

/// Joins words into a sentence with a capital first letter and a final period.
///
/// Returns an empty string for an empty slice.
pub fn format_sentence<S: AsRef<str>>(words: &[S]) -> String {
	let joined = words.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ");
	let mut chars = joined.chars();
	match chars.next() {
		Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
		None => String::new(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn splits_on_punctuation_and_lowercases() {
		let tokenizer = Tokenizer::default();
		let sentences = tokenizer.sentences("  Кот сидит на окне. Кот ест рыбу!  ");
		assert_eq!(
			sentences,
			vec![vec!["кот", "сидит", "на", "окне"], vec!["кот", "ест", "рыбу"]]
		);
	}

	#[test]
	fn drops_fragments_outside_allow_list() {
		let tokenizer = Tokenizer::default();
		let sentences = tokenizer.sentences("good words here, bad \"quoted\" words; fine - again");
		assert_eq!(
			sentences,
			vec![vec!["good", "words", "here"], vec!["fine"], vec!["again"]]
		);
	}

	#[test]
	fn keeps_digits_and_hyphens() {
		let tokenizer = Tokenizer::default();
		assert_eq!(
			tokenizer.sentences("в 1812 году что-то было"),
			vec![vec!["в", "1812", "году", "что-то", "было"]]
		);
	}

	#[test]
	fn collapses_repeated_spaces() {
		let tokenizer = Tokenizer::default();
		assert_eq!(tokenizer.sentences("a  b"), vec![vec!["a", "b"]]);
		assert!(tokenizer.sentences("   ").is_empty());
	}

	#[test]
	fn custom_patterns() {
		let tokenizer = Tokenizer::new(r"\|", r"^[a-z ]+$").unwrap();
		assert_eq!(
			tokenizer.sentences_of(["one two|Three", "four 4"]),
			vec![vec!["one", "two"], vec!["three"]]
		);
		assert!(Tokenizer::new("(", DEFAULT_ALLOWED).is_err());
	}

	#[test]
	fn formats_sentence() {
		assert_eq!(format_sentence(&["кот", "ест", "рыбу"]), "Кот ест рыбу.");
		assert_eq!(format_sentence::<&str>(&[]), "");
	}
}
