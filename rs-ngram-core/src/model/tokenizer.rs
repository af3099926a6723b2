use super::vocabulary::Vocabulary;

/// Start-of-sequence sentinel.
pub const START_TOKEN: &str = "<START>";
/// End-of-sequence sentinel.
pub const END_TOKEN: &str = "<END>";
/// Replacement for every out-of-vocabulary token.
pub const UNKNOWN_TOKEN: &str = "<UNK>";

/// Converts raw lines into bounded token sequences.
///
/// A tokenized line is `[START] * w + words + [END] * w` with
/// `w = max(1, order - 1)`, where words not in the vocabulary are replaced
/// by `UNKNOWN_TOKEN`.
///
/// # Invariants
/// - `order >= 1` (checked by the owning model)
/// - Boundary sentinels inserted by the tokenizer are exempt from
///   unknown-token substitution, so boundary and unknown statistics never
///   collapse together
/// - Words are only checked against the vocabulary: a literal `<START>` or
///   `<END>` in a line becomes `UNKNOWN_TOKEN` unless the vocabulary lists it
#[derive(Clone, Debug)]
pub struct Tokenizer {
	order: usize,
	vocabulary: Vocabulary,
}

impl Tokenizer {
	pub fn new(order: usize, vocabulary: Vocabulary) -> Self {
		Self { order, vocabulary }
	}

	/// Number of sentinels added at each end of a line.
	pub fn boundary_width(&self) -> usize {
		self.order.saturating_sub(1).max(1)
	}

	pub fn vocabulary(&self) -> &Vocabulary {
		&self.vocabulary
	}

	/// Returns `true` if a word of a line survives tokenization unchanged.
	pub fn is_known(&self, word: &str) -> bool {
		word == UNKNOWN_TOKEN || self.vocabulary.contains(word)
	}

	/// Tokenizes one line.
	///
	/// Pure function of the line, the vocabulary and the order.
	pub fn tokenize(&self, line: &str) -> Vec<String> {
		let width = self.boundary_width();
		let words = line.split_whitespace();

		let mut tokens = Vec::with_capacity(2 * width + words.clone().count());
		tokens.extend(std::iter::repeat_n(START_TOKEN.to_owned(), width));
		for word in words {
			if self.is_known(word) {
				tokens.push(word.to_owned());
			} else {
				tokens.push(UNKNOWN_TOKEN.to_owned());
			}
		}
		tokens.extend(std::iter::repeat_n(END_TOKEN.to_owned(), width));
		tokens
	}

	/// Size of the set of symbols that can end an n-gram.
	///
	/// This is the vocabulary plus `END_TOKEN` and `UNKNOWN_TOKEN`, counted
	/// once even if the vocabulary already lists one of them. `START_TOKEN`
	/// only ends an n-gram for unigram models, where it is counted too.
	pub fn effective_vocabulary_size(&self) -> usize {
		let mut sentinels = vec![END_TOKEN, UNKNOWN_TOKEN];
		if self.order == 1 {
			sentinels.push(START_TOKEN);
		}
		let missing = sentinels.iter().filter(|token| !self.vocabulary.contains(token)).count();
		self.vocabulary.len() + missing
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tokenizer(order: usize) -> Tokenizer {
		Tokenizer::new(order, Vocabulary::from_tokens(["a", "b"]))
	}

	#[test]
	fn bigram_wraps_line_with_single_sentinels() {
		assert_eq!(tokenizer(2).tokenize("a b"), vec!["<START>", "a", "b", "<END>"]);
	}

	#[test]
	fn unigram_still_uses_one_sentinel_per_side() {
		assert_eq!(tokenizer(1).boundary_width(), 1);
		assert_eq!(tokenizer(1).tokenize("a"), vec!["<START>", "a", "<END>"]);
	}

	#[test]
	fn trigram_uses_two_sentinels_per_side() {
		assert_eq!(
			tokenizer(3).tokenize("b"),
			vec!["<START>", "<START>", "b", "<END>", "<END>"]
		);
	}

	#[test]
	fn unknown_words_are_replaced() {
		assert_eq!(tokenizer(2).tokenize("a c b"), vec!["<START>", "a", "<UNK>", "b", "<END>"]);
	}

	#[test]
	fn inserted_sentinels_are_exempt_from_substitution() {
		let tokenizer = Tokenizer::new(2, Vocabulary::default());
		assert_eq!(tokenizer.tokenize("x"), vec!["<START>", "<UNK>", "<END>"]);
		assert!(tokenizer.is_known(UNKNOWN_TOKEN));
	}

	#[test]
	fn literal_sentinels_in_text_are_unknown() {
		assert!(!tokenizer(2).is_known(START_TOKEN));
		assert!(!tokenizer(2).is_known(END_TOKEN));
		assert_eq!(
			tokenizer(2).tokenize("<START> a <END> <UNK>"),
			vec!["<START>", "<UNK>", "a", "<UNK>", "<UNK>", "<END>"]
		);

		let listed = Tokenizer::new(2, Vocabulary::from_tokens(["a", END_TOKEN]));
		assert_eq!(listed.tokenize("a <END>"), vec!["<START>", "a", "<END>", "<END>"]);
	}

	#[test]
	fn irregular_whitespace_is_ignored() {
		assert_eq!(tokenizer(2).tokenize("  a\t\tb \n"), tokenizer(2).tokenize("a b"));
		assert_eq!(tokenizer(2).tokenize(""), vec!["<START>", "<END>"]);
	}

	#[test]
	fn effective_size_counts_sentinels_once() {
		assert_eq!(tokenizer(2).effective_vocabulary_size(), 4);
		assert_eq!(tokenizer(3).effective_vocabulary_size(), 4);
		let with_unk = Tokenizer::new(2, Vocabulary::from_tokens(["a", UNKNOWN_TOKEN]));
		assert_eq!(with_unk.effective_vocabulary_size(), 3);
	}

	#[test]
	fn unigram_size_includes_start() {
		// <START> is a unigram window of its own
		assert_eq!(tokenizer(1).effective_vocabulary_size(), 5);
	}
}
