use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Fixed set of known tokens.
///
/// A `Vocabulary` is built once (usually with `Vocabulary::build`) and never
/// mutated afterwards. Tokens outside of it are mapped to the unknown token
/// at tokenization time.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Vocabulary {
	tokens: HashSet<String>,
}

impl Vocabulary {
	/// Builds a vocabulary from raw corpus lines.
	///
	/// Lines are split on whitespace and every token occurring at least
	/// `threshold` times over the whole corpus is kept. Rarer tokens are
	/// dropped silently. A threshold of 0 keeps everything, like 1.
	pub fn build<I, S>(lines: I, threshold: usize) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut counts: HashMap<String, usize> = HashMap::new();
		for line in lines {
			for token in line.as_ref().split_whitespace() {
				*counts.entry(token.to_owned()).or_insert(0) += 1;
			}
		}

		let tokens: HashSet<String> = counts
			.into_iter()
			.filter(|(_, count)| *count >= threshold)
			.map(|(token, _)| token)
			.collect();

		log::debug!("built vocabulary of {} tokens (threshold {})", tokens.len(), threshold);
		Self { tokens }
	}

	/// Creates a vocabulary from an explicit token list.
	pub fn from_tokens<I, S>(tokens: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self { tokens: tokens.into_iter().map(Into::into).collect() }
	}

	/// Returns `true` if the token belongs to the vocabulary.
	pub fn contains(&self, token: &str) -> bool {
		self.tokens.contains(token)
	}

	/// Number of distinct tokens.
	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	/// Iterates over the tokens in arbitrary order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.tokens.iter().map(String::as_str)
	}
}

impl<S: Into<String>> FromIterator<S> for Vocabulary {
	fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
		Self::from_tokens(iter)
	}
}
