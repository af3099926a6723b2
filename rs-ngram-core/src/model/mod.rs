//! Top-level module for the n-gram language model.
//!
//! Data flows one way through the submodules:
//! - Corpus lines are scanned into a `Vocabulary`
//! - The `Tokenizer` wraps lines with boundary tokens and maps unknown words
//! - A `FrequencyTable` accumulates n-gram counts during `fit`
//! - An `Estimator` turns counts into log-probabilities
//! - `NGramModel` ties them together and scores test sets by perplexity

/// Frequency-threshold vocabulary built from raw corpus lines.
pub mod vocabulary;

/// Line tokenizer adding boundary sentinels and unknown-token substitution.
pub mod tokenizer;

/// N-gram occurrence counts built by sliding a window over token sequences.
///
/// Supports merging, which makes sharded parallel counting possible.
pub mod frequency_table;

/// Probability estimation policies over a frequency table.
pub mod estimator;

/// Model lifecycle: construction, fitting, log-probabilities and perplexity.
pub mod ngram_model;

/// Deserializable training configuration.
pub mod config;
