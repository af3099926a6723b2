use std::sync::mpsc;
use std::thread;

use super::estimator::Estimator;
use super::frequency_table::FrequencyTable;
use super::tokenizer::Tokenizer;
use super::vocabulary::Vocabulary;
use crate::error::{ModelError, Result};

/// Order of the interpolated model.
pub const INTERPOLATED_ORDER: usize = 3;

/// Shape of the counts kept by a model.
///
/// # Variants
/// - `Prefix`: full n-grams and their `(n - 1)`-prefixes. Read by the
///   `Mle` and `Additive` estimators.
/// - `AllOrders`: unigrams, bigrams and trigrams plus a token total. Read by
///   the `Interpolated` estimator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableLayout {
	Prefix,
	AllOrders,
}

impl TableLayout {
	fn name(&self) -> &'static str {
		match self {
			TableLayout::Prefix => "prefix",
			TableLayout::AllOrders => "all-orders",
		}
	}

	fn supports(&self, estimator: &Estimator) -> bool {
		matches!(
			(self, estimator),
			(TableLayout::Prefix, Estimator::Mle | Estimator::Additive { .. })
				| (TableLayout::AllOrders, Estimator::Interpolated(_))
		)
	}
}

/// Word-level n-gram language model.
///
/// A model is built with an order and a fixed vocabulary, holds no counts
/// until `fit` is called, and then answers log-probability and perplexity
/// queries through an `Estimator`.
///
/// # Responsibilities
/// - Tokenize lines with boundary sentinels and unknown-token substitution
/// - Count n-grams over a training corpus (sequentially or in parallel)
/// - Score single n-grams and whole test sets
///
/// # Invariants
/// - `order >= 1`
/// - Every query before `fit` fails with `ModelError::Untrained`
/// - The frequency table is owned by the model and never shared
#[derive(Clone, Debug)]
pub struct NGramModel {
	/// Number of tokens per n-gram.
	order: usize,

	/// Which counts `fit` collects.
	layout: TableLayout,

	tokenizer: Tokenizer,

	/// `None` until the model is fitted.
	table: Option<FrequencyTable>,
}

impl NGramModel {
	/// Creates an unfitted model of order `order` for the MLE and additive
	/// estimators.
	///
	/// # Errors
	/// Returns `ModelError::InvalidOrder` if `order == 0`.
	pub fn new(order: usize, vocabulary: Vocabulary) -> Result<Self> {
		if order == 0 {
			return Err(ModelError::InvalidOrder(order));
		}
		Ok(Self::with_layout(order, TableLayout::Prefix, vocabulary))
	}

	/// Creates an unfitted trigram model for the interpolated estimator.
	pub fn interpolated(vocabulary: Vocabulary) -> Self {
		Self::with_layout(INTERPOLATED_ORDER, TableLayout::AllOrders, vocabulary)
	}

	fn with_layout(order: usize, layout: TableLayout, vocabulary: Vocabulary) -> Self {
		Self { order, layout, tokenizer: Tokenizer::new(order, vocabulary), table: None }
	}

	pub fn order(&self) -> usize {
		self.order
	}

	pub fn layout(&self) -> TableLayout {
		self.layout
	}

	pub fn vocabulary(&self) -> &Vocabulary {
		self.tokenizer.vocabulary()
	}

	/// The `V` used by additive smoothing.
	pub fn vocabulary_size(&self) -> usize {
		self.tokenizer.effective_vocabulary_size()
	}

	pub fn is_fitted(&self) -> bool {
		self.table.is_some()
	}

	/// Counts collected by the last `fit`, if any.
	pub fn table(&self) -> Option<&FrequencyTable> {
		self.table.as_ref()
	}

	/// Tokenizes a line the way `fit` and `perplexity` do.
	pub fn tokenize(&self, line: &str) -> Vec<String> {
		self.tokenizer.tokenize(line)
	}

	/// Counts the n-grams of the training lines.
	///
	/// Replaces any previous table wholesale; no probability is computed
	/// here.
	pub fn fit<I, S>(&mut self, lines: I)
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut table = FrequencyTable::new();
		let mut nb_lines = 0;
		for line in lines {
			self.count_line(&mut table, line.as_ref());
			nb_lines += 1;
		}
		log::debug!(
			"fitted order-{} {} table: {} keys from {} lines",
			self.order,
			self.layout.name(),
			table.len(),
			nb_lines
		);
		self.table = Some(table);
	}

	/// Same result as `fit`, with the lines split into chunks counted on
	/// separate threads and merged afterwards.
	///
	/// # Notes
	/// - Uses `CPU cores * 8` chunks.
	/// - Partial tables are collected through an MPSC channel and merged
	///   sequentially; merging is order-independent.
	pub fn fit_parallel<S>(&mut self, lines: &[S])
	where
		S: AsRef<str> + Sync,
	{
		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = lines.len().div_ceil(chunks).max(1);

		let (tx, rx) = mpsc::channel();
		let model = &*self;
		thread::scope(|scope| {
			for chunk in lines.chunks(chunk_size) {
				let tx = tx.clone();
				scope.spawn(move || {
					let mut partial = FrequencyTable::new();
					for line in chunk {
						model.count_line(&mut partial, line.as_ref());
					}
					// The receiver outlives the scope, sending cannot fail
					let _ = tx.send(partial);
				});
			}
		});
		drop(tx);

		let mut table = FrequencyTable::new();
		let mut nb_partials = 0;
		for partial in rx.iter() {
			table.merge(&partial);
			nb_partials += 1;
		}
		log::debug!(
			"fitted order-{} {} table: {} keys from {} lines in {} chunks",
			self.order,
			self.layout.name(),
			table.len(),
			lines.len(),
			nb_partials
		);
		self.table = Some(table);
	}

	fn count_line(&self, table: &mut FrequencyTable, line: &str) {
		let tokens = self.tokenizer.tokenize(line);
		match self.layout {
			TableLayout::Prefix => table.add_windows(&tokens, self.order),
			TableLayout::AllOrders => table.add_all_orders(&tokens, self.order),
		}
	}

	/// Returns the table, or `ModelError::Untrained`.
	fn fitted_table(&self) -> Result<&FrequencyTable> {
		self.table.as_ref().ok_or(ModelError::Untrained)
	}

	/// Checks the estimator parameters and that it reads this model's layout.
	fn check_estimator(&self, estimator: &Estimator) -> Result<()> {
		if !self.layout.supports(estimator) {
			return Err(ModelError::UnsupportedEstimator {
				estimator: estimator.name(),
				layout: self.layout.name(),
			});
		}
		estimator.validate()
	}

	/// Computes `log2(P(w_n | w_1..w_{n-1}))` for an n-gram of the model order.
	///
	/// # Errors
	/// - `ModelError::Untrained` before `fit`
	/// - `ModelError::UnsupportedEstimator` if the estimator does not match
	///   the model layout
	/// - `ModelError::OrderMismatch` if `ngram.len() != order`
	/// - `ModelError::UnseenNGram` for an unsmoothed query on an n-gram
	///   never observed during fit
	pub fn log_prob<S: AsRef<str>>(&self, ngram: &[S], estimator: &Estimator) -> Result<f64> {
		let table = self.fitted_table()?;
		self.check_estimator(estimator)?;
		if ngram.len() != self.order {
			return Err(ModelError::OrderMismatch { expected: self.order, actual: ngram.len() });
		}
		let ngram: Vec<String> = ngram.iter().map(|token| token.as_ref().to_owned()).collect();
		estimator.log_prob_unchecked(table, &ngram, self.vocabulary_size())
	}

	/// Computes the perplexity of a test set:
	/// `2 ^ (-(1 / N) * sum(log2 P))`, with `N` the number of tokens of the
	/// tokenized lines, sentinels included.
	///
	/// # Returns
	/// - `Ok(f64::INFINITY)` as soon as an unsmoothed estimator meets an
	///   n-gram never observed during fit
	/// - `Ok(perplexity)` otherwise
	///
	/// # Errors
	/// - `ModelError::Untrained` before `fit`
	/// - Estimator validation or layout errors, raised before scoring
	/// - `ModelError::EmptyEvaluation` if `lines` is empty
	pub fn perplexity<I, S>(&self, lines: I, estimator: &Estimator) -> Result<f64>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let table = self.fitted_table()?;
		self.check_estimator(estimator)?;
		let vocabulary_size = self.vocabulary_size();
		let smoothed = estimator.is_smoothed();

		let mut log_sum = 0.0;
		let mut nb_tokens: usize = 0;
		for line in lines {
			let tokens = self.tokenizer.tokenize(line.as_ref());
			nb_tokens += tokens.len();

			for ngram in tokens.windows(self.order) {
				if !smoothed && table.lookup(ngram).is_none() {
					log::warn!(
						"n-gram ({}) never observed, {} perplexity is infinite",
						ngram.join(" "),
						estimator.name()
					);
					return Ok(f64::INFINITY);
				}
				log_sum += estimator.log_prob_unchecked(table, ngram, vocabulary_size)?;
			}
		}

		if nb_tokens == 0 {
			return Err(ModelError::EmptyEvaluation);
		}
		Ok(2f64.powf(-log_sum / nb_tokens as f64))
	}
}
