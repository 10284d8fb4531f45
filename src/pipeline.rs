

// imports
use crate::config::files_handling::{self, Corpus};
use crate::config::Config;
use crate::error::Result;
use crate::tfidf::{featurize, Features, TfidfBow};

use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Used when the configuration names no corpus file.
pub const SAMPLE_DATASET: [&str; 5] = [
    "Well done! You really made a great job. Really well done!!",
    "Good work.I appreciate your effort",
    "Great effort. You should continue this way",
    "nice work man, that was great",
    "Excellent job! vEry well.",
];

pub struct Pipeline {}

impl Pipeline {

    // runs the main procedure of 3 steps -
    // -> loading the corpus
    // -> tokenizing and vectorizing
    // -> saving the outputs, when an output folder is configured

    pub fn run(config: &Config) -> Result<Features> {

        let params = config.get_params();
        info!("{}", params);

        let corpus = match &params.corpus_file {
            Some(corpus_file) => files_handling::read_input::<Corpus>(corpus_file)?.0,
            None => SAMPLE_DATASET.iter().map(|doc| doc.to_string()).collect()
        };
        info!(num_documents = corpus.len(), "loaded corpus");

        let timer = Instant::now();
        let tokenizer = config.tokenizer();
        let vectorizer = TfidfBow::new(config.vectorizer_params()?);
        let features = featurize(&corpus, &tokenizer, &vectorizer)?;
        info!(
            num_documents = features.num_documents(),
            vocab_size = features.dim(),
            zero_norm = %vectorizer.params().zero_norm(),
            num_threads = vectorizer.params().num_threads(),
            elapsed_ms = timer.elapsed().as_millis() as u64,
            "finished tf-idf vectors"
        );

        if let Some(output_dir) = &params.output_dir {
            let saved = Pipeline::save(output_dir, &features, params.save_features)?;
            info!(output_dir = %output_dir, files = saved.len(), "saved outputs");
        }

        Ok(features)
    }

    fn save(output_dir: &str, features: &Features, save_features: bool) -> Result<Vec<PathBuf>> {

        let mut saved = vec![
            files_handling::save_output(output_dir, "vectors", features.vectors())?,
            files_handling::save_output(output_dir, "metadata", &features.metadata())?,
            files_handling::save_output(output_dir, "tokens", &features.vocabulary().tokens())?,
        ];
        if save_features {
            saved.push(files_handling::save_output(output_dir, "features", features)?);
        }
        Ok(saved)
    }
}
