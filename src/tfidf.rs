
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;
use ndarray::{Array2, ArrayView1, ArrayViewMut1, Axis};
use ndarray::parallel::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::{Serialize, Deserialize};
use tracing::{debug, warn};

use crate::error::{BowError, Result};
use crate::tokenizer::Tokenizer;
use crate::vocabulary::Vocabulary;

/// Weight of a token in one document.
///
/// `idf = ln(n_docs / (1 + doc_freq))` and the weight is `doc_freq * idf`,
/// where `doc_freq` is the number of occurrences of the token in the
/// document being weighted (not the number of documents holding it).
/// `dataset_freq` does not enter the weight. The ratio is taken in `f32`,
/// the logarithm in `f64` and then narrowed back.
pub fn tfidf(n_docs: f32, _dataset_freq: f32, doc_freq: f32) -> f32 {
    let idf = ((n_docs / (1.0 + doc_freq)) as f64).ln() as f32;
    doc_freq * idf
}

/// What to do with a document whose weights are all zero, where the L2
/// norm is 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZeroNormPolicy {
    /// leave the zero vector as it is
    #[default]
    Skip,
    /// divide anyway, every component becomes NaN
    Propagate,
}

impl FromStr for ZeroNormPolicy {
    type Err = BowError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "skip" => Ok(ZeroNormPolicy::Skip),
            "propagate" => Ok(ZeroNormPolicy::Propagate),
            other => Err(BowError::Config(format!("unknown zero_norm policy '{}', expected 'skip' or 'propagate'", other)))
        }
    }
}

impl Display for ZeroNormPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZeroNormPolicy::Skip => write!(f, "skip"),
            ZeroNormPolicy::Propagate => write!(f, "propagate"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VectorizerParams {
    zero_norm: ZeroNormPolicy,
    num_threads: usize,
}

impl VectorizerParams {

    pub fn new(zero_norm: ZeroNormPolicy, num_threads: usize) -> Result<Self> {
        if num_threads == 0 {
            return Err(BowError::Config("num_threads must be at least 1".to_string()));
        }
        Ok(Self { zero_norm, num_threads })
    }

    pub fn zero_norm(&self) -> ZeroNormPolicy {
        self.zero_norm
    }

    pub fn num_threads(&self) -> usize {
        self.num_threads
    }
}

impl Default for VectorizerParams {
    fn default() -> Self {
        Self {
            zero_norm: ZeroNormPolicy::Skip,
            num_threads: 1,
        }
    }
}

/// Result of one transform: a (documents, vocabulary) weight matrix and the
/// vocabulary that fixes its columns.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Features {
    vectors: Array2<f32>,
    vocabulary: Vocabulary,
}

impl Features {

    pub fn vectors(&self) -> &Array2<f32> {
        &self.vectors
    }

    pub fn vector(&self, doc_id: usize) -> Option<ArrayView1<'_, f32>> {
        (doc_id < self.vectors.nrows()).then(|| self.vectors.row(doc_id))
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// token -> occurrences in the corpus this value was built from.
    pub fn metadata(&self) -> HashMap<String, usize> {
        self.vocabulary.frequencies()
    }

    pub fn num_documents(&self) -> usize {
        self.vectors.nrows()
    }

    pub fn dim(&self) -> usize {
        self.vectors.ncols()
    }

    pub fn into_parts(self) -> (Array2<f32>, Vocabulary) {
        (self.vectors, self.vocabulary)
    }
}

/// TF-IDF bag of words vectorizer. Holds parameters only, every call to
/// `transform` starts from an empty vocabulary.
#[derive(Clone, Debug, Default)]
pub struct TfidfBow {
    params: VectorizerParams,
}

impl TfidfBow {

    pub fn new(params: VectorizerParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &VectorizerParams {
        &self.params
    }

    // weights of one document against the whole vocabulary, zero where the token is absent
    fn fill_row(mut row: ArrayViewMut1<f32>, doc_id: usize, vocab: &Vocabulary, n_docs: f32) {
        for (slot, entry) in row.iter_mut().zip(vocab.entries()) {
            let doc_freq = entry.doc_freq(doc_id);
            if doc_freq > 0 {
                *slot = tfidf(n_docs, entry.dataset_freq as f32, doc_freq as f32);
            }
        }
    }

    // returns true when the row had a zero norm.
    // squares are summed left to right in f32, the root is taken in f64
    fn normalize_row(mut row: ArrayViewMut1<f32>, zero_norm: ZeroNormPolicy) -> bool {
        let sum_squared = row.iter().fold(0.0f32, |sum, w| sum + w * w);
        let norm = (sum_squared as f64).sqrt() as f32;
        let is_zero = norm == 0.0;
        if !is_zero || zero_norm == ZeroNormPolicy::Propagate {
            row.mapv_inplace(|w| w / norm);
        }
        is_zero
    }

    fn weigh(&self, vectors: &mut Array2<f32>, vocab: &Vocabulary, n_docs: f32) -> usize {
        let zero_norm = self.params.zero_norm;
        let mut zero_rows = 0;
        for (doc_id, mut row) in vectors.axis_iter_mut(Axis(0)).enumerate() {
            TfidfBow::fill_row(row.view_mut(), doc_id, vocab, n_docs);
            if TfidfBow::normalize_row(row, zero_norm) {
                zero_rows += 1;
            }
        }
        zero_rows
    }

    fn par_weigh(&self, vectors: &mut Array2<f32>, vocab: &Vocabulary, n_docs: f32) -> usize {
        let zero_norm = self.params.zero_norm;
        vectors
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .map(|(doc_id, mut row)| {
            TfidfBow::fill_row(row.view_mut(), doc_id, vocab, n_docs);
            TfidfBow::normalize_row(row, zero_norm) as usize
        })
        .sum()
    }

    /// Builds the vocabulary of `corpus` and one L2 normalized weight vector
    /// per document, rows in corpus order and columns in vocabulary order.
    pub fn transform<D, S>(&self, corpus: &[D]) -> Result<Features>
    where
        D: AsRef<[S]>,
        S: AsRef<str> {

        let vocabulary = Vocabulary::build(corpus);
        let n_docs = corpus.len();
        let mut vectors: Array2<f32> = Array2::zeros((n_docs, vocabulary.len()));

        let zero_rows = if self.params.num_threads > 1 {
            // local pool, a global one can only be built once per process
            let pool = ThreadPoolBuilder::new().num_threads(self.params.num_threads).build()?;
            pool.install(|| self.par_weigh(&mut vectors, &vocabulary, n_docs as f32))
        } else {
            self.weigh(&mut vectors, &vocabulary, n_docs as f32)
        };

        if zero_rows > 0 {
            warn!(zero_rows, policy = %self.params.zero_norm, "documents with an all zero weight vector");
        }
        debug!(num_documents = n_docs, vocab_size = vocabulary.len(), "computed tf-idf vectors");

        Ok(Features { vectors, vocabulary })
    }
}

/// Tokenizes raw documents and vectorizes them in one go.
pub fn featurize<T, S>(corpus: &[S], tokenizer: &T, vectorizer: &TfidfBow) -> Result<Features>
where
    T: Tokenizer,
    S: AsRef<str> {

    let tokenized = tokenizer.transform(corpus);
    vectorizer.transform(&tokenized)
}
