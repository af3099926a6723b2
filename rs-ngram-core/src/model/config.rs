use serde::{Deserialize, Serialize};

use super::estimator::Estimator;
use super::ngram_model::{INTERPOLATED_ORDER, NGramModel};
use super::vocabulary::Vocabulary;
use crate::error::{ModelError, Result};

/// Training configuration of a language model.
///
/// Every field has a default, so a partial document such as
/// `{"order": 3}` deserializes into a complete configuration.
///
/// # Invariants (checked by `validate`)
/// - `order >= 1`
/// - `estimator` parameters are valid
/// - An interpolated estimator requires `order == 3`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
	/// Number of tokens per n-gram.
	pub order: usize,

	/// Minimum corpus frequency for a token to enter the vocabulary.
	pub min_count: usize,

	/// Policy used when scoring.
	pub estimator: Estimator,
}

impl Default for ModelConfig {
	fn default() -> Self {
		Self { order: 2, min_count: 1, estimator: Estimator::Mle }
	}
}

impl ModelConfig {
	pub fn validate(&self) -> Result<()> {
		if self.order == 0 {
			return Err(ModelError::InvalidOrder(self.order));
		}
		self.estimator.validate()?;
		if matches!(self.estimator, Estimator::Interpolated(_)) && self.order != INTERPOLATED_ORDER {
			return Err(ModelError::OrderMismatch { expected: INTERPOLATED_ORDER, actual: self.order });
		}
		Ok(())
	}

	/// Builds the vocabulary, creates the model matching the estimator and
	/// fits it on `lines`.
	///
	/// # Errors
	/// Returns the first `validate` error.
	pub fn train<S: AsRef<str> + Sync>(&self, lines: &[S]) -> Result<NGramModel> {
		self.validate()?;
		let vocabulary = Vocabulary::build(lines, self.min_count);
		let mut model = match self.estimator {
			Estimator::Interpolated(_) => NGramModel::interpolated(vocabulary),
			Estimator::Mle | Estimator::Additive { .. } => NGramModel::new(self.order, vocabulary)?,
		};
		model.fit_parallel(lines);
		Ok(model)
	}

	/// Scores `lines` with a model trained by this configuration.
	pub fn perplexity<S: AsRef<str>>(&self, model: &NGramModel, lines: &[S]) -> Result<f64> {
		model.perplexity(lines, &self.estimator)
	}
}
