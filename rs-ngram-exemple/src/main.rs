use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use rs_ngram_core::model::config::ModelConfig;
use rs_ngram_core::model::estimator::{Estimator, Weights};
use rs_ngram_core::model::ngram_model::NGramModel;
use rs_ngram_core::model::vocabulary::Vocabulary;

const CORPUS: &str = "\
the cat sat on the mat
the dog sat on the log
a cat saw a dog
the dog saw the cat
a bird sat on a cat
the mat was on the floor
the cat chased the bird
a dog chased a cat
the bird sat on the dog
the log was on the floor
a cat sat on a log
the dog was on the mat";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=debug shows counting details
    env_logger::init();

    // Shuffle with a fixed seed so the split is reproducible
    let mut lines: Vec<&str> = CORPUS.lines().collect();
    lines.shuffle(&mut StdRng::seed_from_u64(42));
    let (held_out, train) = lines.split_at(3);
    log::info!("{} training lines, {} held-out lines", train.len(), held_out.len());

    // Words seen only once become <UNK>
    let vocabulary = Vocabulary::build(train, 2);
    println!("Vocabulary: {} tokens", vocabulary.len());

    // Bigram model: unsmoothed and additive estimates share the same counts
    let mut bigram = NGramModel::new(2, vocabulary.clone())?;
    bigram.fit(train);
    println!("Tokenized: {:?}", bigram.tokenize(held_out[0]));
    println!("Bigram MLE perplexity (train):    {:.4}", bigram.perplexity(train, &Estimator::Mle)?);
    println!("Bigram MLE perplexity (held-out): {:.4}", bigram.perplexity(held_out, &Estimator::Mle)?);
    for k in [1.0, 0.1, 0.01] {
        let estimator = Estimator::Additive { k };
        println!("Bigram add-{} perplexity (held-out): {:.4}", k, bigram.perplexity(held_out, &estimator)?);
    }

    // Interpolated trigram, counted in parallel
    let mut trigram = NGramModel::interpolated(vocabulary);
    trigram.fit_parallel(train);
    let weights = Weights::new(0.1, 0.3, 0.6)?;
    println!(
        "Interpolated trigram perplexity (held-out): {:.4}",
        trigram.perplexity(held_out, &Estimator::Interpolated(weights))?
    );

    // Weights that do not sum to 1.0 are refused
    match Weights::new(0.5, 0.5, 0.5) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Rejected weights: {}", e),
    }

    // The same pipeline, driven by a configuration document
    let config: ModelConfig = serde_json::from_str(
        r#"{ "order": 3, "min_count": 1, "estimator": { "kind": "additive", "k": 0.5 } }"#,
    )?;
    let model = config.train(train)?;
    println!("Configured model perplexity (held-out): {:.4}", config.perplexity(&model, held_out)?);

    Ok(())
}
