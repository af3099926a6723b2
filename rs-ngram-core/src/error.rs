use thiserror::Error;

/// Errors raised by model construction and queries.
///
/// Every variant is a caller contract violation surfaced immediately.
/// Zero-probability events met while scoring a test set are not errors:
/// the perplexity is reported as `f64::INFINITY` instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
	/// The model order must be at least 1.
	#[error("model order must be >= 1, got {0}")]
	InvalidOrder(usize),

	/// A probability or perplexity was requested before `fit`.
	#[error("model has not been fitted")]
	Untrained,

	/// Interpolation weights outside [0, 1] or not summing to 1.0.
	#[error("invalid interpolation weights: {0}")]
	InvalidWeights(String),

	/// Negative or non-finite additive pseudo-count.
	#[error("smoothing pseudo-count must be a finite value >= 0, got {0}")]
	InvalidSmoothing(f64),

	/// The queried n-gram length does not match the model order.
	#[error("expected an n-gram of length {expected}, got {actual}")]
	OrderMismatch { expected: usize, actual: usize },

	/// Unsmoothed lookup of an n-gram (or prefix) absent from the table.
	#[error("n-gram ({0}) was never observed during fit")]
	UnseenNGram(String),

	/// The estimator cannot read the counts this model keeps.
	#[error("estimator {estimator} is not supported by {layout} models")]
	UnsupportedEstimator { estimator: &'static str, layout: &'static str },

	/// Perplexity over a test set that produced no tokens.
	#[error("cannot compute perplexity over an empty test set")]
	EmptyEvaluation,
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
