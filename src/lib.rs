
mod config;
mod error;
mod pipeline;
mod tfidf;
mod tokenizer;
mod vocabulary;

pub use config::{files_handling, Config, JsonTypes};
pub use error::{BowError, Result};
pub use pipeline::{Pipeline, SAMPLE_DATASET};
pub use tfidf::{featurize, tfidf, Features, TfidfBow, VectorizerParams, ZeroNormPolicy};
pub use tokenizer::{DelimiterTokenizer, Tokenizer, DEFAULT_DELIMITERS};
pub use vocabulary::{VocabEntry, Vocabulary};
