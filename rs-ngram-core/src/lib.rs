//! Statistical n-gram language modelling library.
//!
//! This crate provides a word-level n-gram language modelling system including:
//! - Vocabulary construction with a minimum-count threshold
//! - Boundary-aware tokenization with out-of-vocabulary substitution
//! - N-gram frequency counting (sequential or sharded across threads)
//! - Maximum-likelihood, additive-smoothed and interpolated estimators
//! - Perplexity scoring of held-out text
//!
//! The counting core and the estimators are exposed through `NGramModel`;
//! text is consumed as in-memory lines, nothing is read from or written to disk.

/// Language model components (vocabulary, tokenizer, counts, estimators).
pub mod model;

/// Error type shared by every fallible operation of the crate.
pub mod error;

pub use error::{ModelError, Result};
