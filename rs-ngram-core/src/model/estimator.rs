use serde::{Deserialize, Serialize};

use super::frequency_table::FrequencyTable;
use crate::error::{ModelError, Result};

/// Allowed distance between the weight sum and 1.0.
///
/// Absorbs binary rounding of decimal weights such as `0.1 + 0.2 + 0.7`.
pub const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Mixture weights of the interpolated trigram estimator.
///
/// # Invariants
/// - Each weight lies in `[0.0, 1.0]`
/// - The weights sum to 1.0 (within `WEIGHT_TOLERANCE`)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Weights {
	/// Weight of the unigram estimate (l1).
	pub unigram: f64,
	/// Weight of the bigram estimate (l2).
	pub bigram: f64,
	/// Weight of the trigram estimate (l3).
	pub trigram: f64,
}

impl Weights {
	/// Creates a validated set of weights.
	///
	/// # Errors
	/// Returns `ModelError::InvalidWeights` if a weight is outside `[0, 1]`
	/// or if they do not sum to 1.0.
	pub fn new(unigram: f64, bigram: f64, trigram: f64) -> Result<Self> {
		let weights = Self { unigram, bigram, trigram };
		weights.validate()?;
		Ok(weights)
	}

	pub fn validate(&self) -> Result<()> {
		for (name, weight) in [("unigram", self.unigram), ("bigram", self.bigram), ("trigram", self.trigram)] {
			if !(0.0..=1.0).contains(&weight) {
				return Err(ModelError::InvalidWeights(format!(
					"{} weight must be between 0.0 and 1.0, got {}",
					name, weight
				)));
			}
		}

		let sum = self.unigram + self.bigram + self.trigram;
		if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
			return Err(ModelError::InvalidWeights(format!(
				"weights must sum to 1.0 (tolerance {:e}), got {}",
				WEIGHT_TOLERANCE, sum
			)));
		}
		Ok(())
	}
}

/// Probability estimation policy.
///
/// All policies read the same counting core; they only differ in how counts
/// become probabilities.
///
/// # Variants
/// - `Mle`: raw relative frequency `count(ngram) / count(prefix)`.
/// - `Additive { k }`: Laplace (k = 1) or Lidstone smoothing,
///   `(count(ngram) + k) / (count(prefix) + k * V)`.
/// - `Interpolated(weights)`: linear mixture of trigram, bigram and unigram
///   MLE estimates. Requires the all-orders table layout.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
	#[default]
	Mle,
	Additive { k: f64 },
	Interpolated(Weights),
}

impl Estimator {
	/// Short name used in error messages and logs.
	pub fn name(&self) -> &'static str {
		match self {
			Estimator::Mle => "mle",
			Estimator::Additive { .. } => "additive",
			Estimator::Interpolated(_) => "interpolated",
		}
	}

	/// Checks the policy parameters.
	///
	/// # Errors
	/// - `ModelError::InvalidSmoothing` for a negative or non-finite `k`
	/// - `ModelError::InvalidWeights` for invalid interpolation weights
	pub fn validate(&self) -> Result<()> {
		match self {
			Estimator::Mle => Ok(()),
			Estimator::Additive { k } => {
				if !k.is_finite() || *k < 0.0 {
					return Err(ModelError::InvalidSmoothing(*k));
				}
				Ok(())
			}
			Estimator::Interpolated(weights) => weights.validate(),
		}
	}

	/// Returns `true` if the policy assigns mass to unseen n-grams.
	///
	/// Additive smoothing with `k == 0` is plain MLE.
	pub fn is_smoothed(&self) -> bool {
		match self {
			Estimator::Mle => false,
			Estimator::Additive { k } => *k > 0.0,
			Estimator::Interpolated(_) => true,
		}
	}

	/// Computes `log2(P(w_n | w_1..w_{n-1}))` for `ngram = [w_1, .., w_n]`.
	///
	/// `vocabulary_size` is the `V` of additive smoothing and is ignored by
	/// the other policies. Parameters are validated before any lookup.
	///
	/// # Errors
	/// - `ModelError::UnseenNGram` when an unsmoothed policy is asked about
	///   an n-gram absent from the table
	/// - `ModelError::OrderMismatch` for an empty n-gram, or for a
	///   non-trigram under interpolation
	/// - Validation errors from `Estimator::validate`
	///
	/// # Notes
	/// The interpolated mixture is computed in probability space and only
	/// then converted to log2; it is `-inf` when all three estimates are 0.
	pub fn log_prob<S: AsRef<str>>(&self, table: &FrequencyTable, ngram: &[S], vocabulary_size: usize) -> Result<f64> {
		self.validate()?;
		let ngram: Vec<String> = ngram.iter().map(|token| token.as_ref().to_owned()).collect();
		self.log_prob_unchecked(table, &ngram, vocabulary_size)
	}

	/// Same as `log_prob`, without validating the parameters.
	///
	/// For callers scoring many n-grams after a single `validate`.
	pub(crate) fn log_prob_unchecked(&self, table: &FrequencyTable, ngram: &[String], vocabulary_size: usize) -> Result<f64> {
		if ngram.is_empty() {
			return Err(ModelError::OrderMismatch { expected: 1, actual: 0 });
		}

		match self {
			Estimator::Mle => mle_log_prob(table, ngram),
			Estimator::Additive { k } if *k == 0.0 => mle_log_prob(table, ngram),
			Estimator::Additive { k } => {
				let prefix = &ngram[..ngram.len() - 1];
				let numerator = count(table, ngram) as f64 + k;
				let denominator = count(table, prefix) as f64 + k * vocabulary_size as f64;
				Ok((numerator / denominator).log2())
			}
			Estimator::Interpolated(weights) => {
				if ngram.len() != 3 {
					return Err(ModelError::OrderMismatch { expected: 3, actual: ngram.len() });
				}
				let trigram = ratio(count(table, ngram), count(table, &ngram[..2]));
				let bigram = ratio(count(table, &ngram[1..]), count(table, &ngram[1..2]));
				let unigram = ratio(count(table, &ngram[2..]), table.word_count());

				let p = weights.trigram * trigram + weights.bigram * bigram + weights.unigram * unigram;
				Ok(p.log2())
			}
		}
	}
}

fn count(table: &FrequencyTable, key: &[String]) -> usize {
	table.lookup(key).unwrap_or(0)
}

fn mle_log_prob(table: &FrequencyTable, ngram: &[String]) -> Result<f64> {
	let count = table.lookup(ngram).ok_or_else(|| unseen(ngram))?;
	let prefix = &ngram[..ngram.len() - 1];
	let prefix_count = table.lookup(prefix).ok_or_else(|| unseen(prefix))?;
	Ok((count as f64 / prefix_count as f64).log2())
}

/// MLE component term: 0 when either count is missing.
fn ratio(count: usize, total: usize) -> f64 {
	if count == 0 || total == 0 {
		return 0.0;
	}
	count as f64 / total as f64
}

fn unseen(ngram: &[String]) -> ModelError {
	ModelError::UnseenNGram(ngram.join(", "))
}
