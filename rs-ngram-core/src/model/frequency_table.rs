use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Occurrence counts of n-gram keys.
///
/// Keys are token sequences compared by value. A single table can hold keys
/// of several lengths at once: full n-grams next to their prefixes, or every
/// order from unigrams up for interpolation.
///
/// # Responsibilities
/// - Count windows slid over tokenized lines
/// - Answer count lookups (absent keys count as 0)
/// - Merge with another table built over a different shard of the corpus
///
/// # Invariants
/// - Stored counts are strictly positive
/// - For every full-length key counted by `add_windows`, its prefix is
///   present with a count greater or equal
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyTable {
	/// N-gram (or prefix) to number of occurrences.
	counts: HashMap<Vec<String>, usize>,

	/// Total number of tokens seen by `add_all_orders`.
	word_count: usize,
}

impl FrequencyTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Counts every width-`n` window of `tokens` along with its
	/// `(n - 1)`-prefix.
	///
	/// Windows start at positions `0..=len - n`; nothing is counted when the
	/// sequence is shorter than `n`. For `n == 1` the prefix is the empty key,
	/// whose count ends up being the number of windows.
	pub fn add_windows(&mut self, tokens: &[String], n: usize) {
		if n == 0 {
			return;
		}
		for window in tokens.windows(n) {
			self.increment(window);
			self.increment(&window[..n - 1]);
		}
	}

	/// Counts every width-`max_n` window of `tokens` together with each of
	/// its leading sub-keys (lengths `1..max_n`), and adds the length of
	/// `tokens` to the total word count.
	///
	/// This is the layout read by the interpolated estimator: for trigram
	/// windows, the trigram, its 2-token prefix and its first token are
	/// counted, next to a corpus-wide token total. Tokens that only ever
	/// close a window (such as the trailing sentinels) get no unigram count.
	pub fn add_all_orders(&mut self, tokens: &[String], max_n: usize) {
		if max_n == 0 {
			return;
		}
		for window in tokens.windows(max_n) {
			for width in 1..=max_n {
				self.increment(&window[..width]);
			}
		}
		self.word_count += tokens.len();
	}

	fn increment(&mut self, key: &[String]) {
		match self.counts.get_mut(key) {
			Some(count) => *count += 1,
			None => {
				self.counts.insert(key.to_vec(), 1);
			}
		}
	}

	/// Returns the count of `key`, or `None` if it was never observed.
	pub fn get<S: AsRef<str>>(&self, key: &[S]) -> Option<usize> {
		let key: Vec<String> = key.iter().map(|token| token.as_ref().to_owned()).collect();
		self.lookup(&key)
	}

	/// Same as `get` for owned tokens, without copying the key.
	pub fn lookup(&self, key: &[String]) -> Option<usize> {
		self.counts.get(key).copied()
	}

	/// Returns the count of `key`, 0 if it was never observed.
	pub fn count<S: AsRef<str>>(&self, key: &[S]) -> usize {
		self.get(key).unwrap_or(0)
	}

	pub fn contains<S: AsRef<str>>(&self, key: &[S]) -> bool {
		self.get(key).is_some()
	}

	/// Total number of tokens counted by `add_all_orders`.
	pub fn word_count(&self) -> usize {
		self.word_count
	}

	/// Number of distinct keys, all lengths included.
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Iterates over `(key, count)` pairs in arbitrary order.
	pub fn iter(&self) -> impl Iterator<Item = (&[String], usize)> {
		self.counts.iter().map(|(key, count)| (key.as_slice(), *count))
	}

	/// Merges another table into this one.
	///
	/// Counts of matching keys are summed, missing keys are inserted and the
	/// word counts are added. The operation is associative and commutative,
	/// so tables counted over disjoint shards of a corpus merge into the
	/// table of the whole corpus.
	pub fn merge(&mut self, other: &Self) {
		for (key, count) in &other.counts {
			if let Some(existing) = self.counts.get_mut(key) {
				*existing += *count;
			} else {
				self.counts.insert(key.clone(), *count);
			}
		}
		self.word_count += other.word_count;
	}
}
