use rs_ngram_core::model::estimator::{Estimator, Weights};
use rs_ngram_core::model::ngram_model::NGramModel;
use rs_ngram_core::model::tokenizer::{END_TOKEN, START_TOKEN, UNKNOWN_TOKEN};
use rs_ngram_core::model::vocabulary::Vocabulary;
use rs_ngram_core::ModelError;

const TRAIN: [&str; 6] = [
	"the cat sat on the mat",
	"the dog sat on the log",
	"a cat saw a dog",
	"the dog saw the cat",
	"a bird sat on a cat",
	"the mat was on the floor",
];

fn assert_close(actual: f64, expected: f64) {
	assert!((actual - expected).abs() < 1e-9, "expected {}, got {}", expected, actual);
}

#[test]
fn bigram_walkthrough() {
	let lines = ["a b", "a a"];
	let vocabulary = Vocabulary::build(lines, 1);
	assert_eq!(vocabulary, Vocabulary::from_tokens(["a", "b"]));

	let mut model = NGramModel::new(2, vocabulary).unwrap();
	model.fit(lines);
	assert_eq!(model.tokenize("a b"), vec![START_TOKEN, "a", "b", END_TOKEN]);

	let table = model.table().unwrap();
	assert_eq!(table.count(&[START_TOKEN, "a"]), 2);
	assert_eq!(table.count(&["a", "b"]), 1);
	assert_eq!(table.count(&["a", "a"]), 1);
	assert_eq!(table.count(&["a", END_TOKEN]), 1);
	assert_eq!(table.count(&["b", END_TOKEN]), 1);
	assert_eq!(table.count(&[START_TOKEN]), 2);
	assert_eq!(table.count(&["a"]), 3);
	assert_eq!(table.count(&["b"]), 1);
	assert_eq!(table.len(), 8);

	// "c" is unknown and (a, <UNK>) never occurred
	assert_eq!(model.tokenize("a c"), vec![START_TOKEN, "a", UNKNOWN_TOKEN, END_TOKEN]);
	assert_eq!(model.perplexity(["a c"], &Estimator::Mle), Ok(f64::INFINITY));

	// 2 ^ (-(1/4) * log2(1/3))
	assert_close(model.perplexity(["a b"], &Estimator::Mle).unwrap(), 3f64.powf(0.25));
}

#[test]
fn unigram_model_uses_token_frequencies() {
	let mut model = NGramModel::new(1, Vocabulary::build(TRAIN, 1)).unwrap();
	model.fit(TRAIN);

	// 6 lines of 34 words plus one sentinel per side
	let total: f64 = 34.0 + 12.0;
	assert_close(model.log_prob(&["the"], &Estimator::Mle).unwrap(), (8.0 / total).log2());
	assert_close(model.log_prob(&[START_TOKEN], &Estimator::Mle).unwrap(), (6.0 / total).log2());
}

#[test]
fn trigram_mle_and_smoothing() {
	let vocabulary = Vocabulary::build(TRAIN, 1);
	// Vocabulary plus <END> and <UNK>
	let vocabulary_size = vocabulary.len() + 2;
	let mut model = NGramModel::new(3, vocabulary).unwrap();
	model.fit(TRAIN);
	assert_eq!(model.vocabulary_size(), vocabulary_size);

	// (sat on) is always followed by "the" twice and "a" once
	assert_close(model.log_prob(&["sat", "on", "the"], &Estimator::Mle).unwrap(), (2.0f64 / 3.0).log2());
	assert!(matches!(
		model.log_prob(&["sat", "on", "cat"], &Estimator::Mle),
		Err(ModelError::UnseenNGram(_))
	));

	let k = 0.5;
	let smoothed = model.log_prob(&["sat", "on", "cat"], &Estimator::Additive { k }).unwrap();
	assert_close(smoothed, (k / (3.0 + k * vocabulary_size as f64)).log2());

	let held_out = ["the bird sat on the log", "a dog sat on the cat"];
	assert_eq!(model.perplexity(held_out, &Estimator::Mle), Ok(f64::INFINITY));
	let laplace = model.perplexity(held_out, &Estimator::Additive { k: 1.0 }).unwrap();
	let lidstone = model.perplexity(held_out, &Estimator::Additive { k: 0.01 }).unwrap();
	assert!(laplace.is_finite() && lidstone.is_finite());
	assert!(lidstone < laplace);
}

#[test]
fn interpolated_trigram_scores_held_out_text() {
	let mut model = NGramModel::interpolated(Vocabulary::build(TRAIN, 1));
	model.fit(TRAIN);

	let weights = Estimator::Interpolated(Weights::new(0.1, 0.3, 0.6).unwrap());
	let held_out = ["the bird sat on the log", "a dog sat on the cat"];
	let pp = model.perplexity(held_out, &weights).unwrap();
	assert!(pp.is_finite());
	assert!(pp > 1.0);

	// All mass on the trigram term behaves like MLE on seen trigrams
	let trigram_only = Estimator::Interpolated(Weights::new(0.0, 0.0, 1.0).unwrap());
	assert_close(
		model.log_prob(&["sat", "on", "the"], &trigram_only).unwrap(),
		(2.0f64 / 3.0).log2(),
	);
}

#[test]
fn rejected_weights() {
	let mut model = NGramModel::interpolated(Vocabulary::build(TRAIN, 1));
	model.fit(TRAIN);

	for (l1, l2, l3) in [(0.5, 0.3, 0.3), (0.2, 0.2, 0.2), (-0.1, 0.5, 0.6), (1.2, -0.1, -0.1)] {
		assert!(matches!(Weights::new(l1, l2, l3), Err(ModelError::InvalidWeights(_))));
		let estimator = Estimator::Interpolated(Weights { unigram: l1, bigram: l2, trigram: l3 });
		assert!(matches!(model.perplexity(TRAIN, &estimator), Err(ModelError::InvalidWeights(_))));
	}
}

#[test]
fn rare_words_share_the_unknown_token() {
	let vocabulary = Vocabulary::build(TRAIN, 2);
	assert!(!vocabulary.contains("bird"));
	assert!(!vocabulary.contains("floor"));

	let mut model = NGramModel::new(2, vocabulary).unwrap();
	model.fit(TRAIN);
	let table = model.table().unwrap();
	assert_eq!(table.count(&["a", UNKNOWN_TOKEN]), 1);
	// "the log" and "the floor"
	assert_eq!(table.count(&["the", UNKNOWN_TOKEN]), 2);

	// Another rare word maps to the same statistics
	assert_eq!(model.tokenize("a zebra"), model.tokenize("a bird"));
	assert!(model.perplexity(["a zebra"], &Estimator::Mle).unwrap().is_finite());
}
