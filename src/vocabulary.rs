
use std::collections::{BTreeMap, HashMap};
use serde::{Serialize, Deserialize};
use tracing::debug;

/// Frequencies gathered for one distinct token of the corpus.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    pub token: String,
    pub dataset_freq: usize,         // occurrences over the whole corpus
    pub per_doc: BTreeMap<usize, usize>, // doc index -> occurrences in that doc
}

impl VocabEntry {

    fn new(token: &str, doc_id: usize) -> Self {
        Self {
            token: token.to_owned(),
            dataset_freq: 1,
            per_doc: BTreeMap::from([(doc_id, 1)])
        }
    }

    /// Number of times the token occurs in document `doc_id`, 0 when absent.
    pub fn doc_freq(&self, doc_id: usize) -> usize {
        self.per_doc.get(&doc_id).copied().unwrap_or(0)
    }
}

/// Insertion ordered vocabulary of a tokenized corpus.
///
/// The position of an entry is the dimension it occupies in every feature
/// vector. Entries appear in order of first occurrence, scanning documents
/// by index and tokens in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    entries: Vec<VocabEntry>,
    t2i: HashMap<String, usize>,
}

impl Vocabulary {

    /// Counts dataset and per-document frequencies of every token.
    pub fn build<D, S>(corpus: &[D]) -> Vocabulary
    where
        D: AsRef<[S]>,
        S: AsRef<str> {

        let mut vocab = Vocabulary::default();
        for (doc_id, document) in corpus.iter().enumerate() {
            for token in document.as_ref() {
                vocab.accumulate(token.as_ref(), doc_id);
            }
        }

        debug!(num_documents = corpus.len(), vocab_size = vocab.len(), "built vocabulary");
        vocab
    }

    fn accumulate(&mut self, token: &str, doc_id: usize) {

        match self.t2i.get(token) {
            Some(&i) => {
                let entry = &mut self.entries[i];
                entry.dataset_freq += 1;
                // first sighting in this document starts its count at 1, repeats increment
                *entry.per_doc.entry(doc_id).or_insert(0) += 1;
            },
            None => {
                self.t2i.insert(token.to_owned(), self.entries.len());
                self.entries.push(VocabEntry::new(token, doc_id));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[VocabEntry] {
        &self.entries
    }

    pub fn get(&self, token: &str) -> Option<&VocabEntry> {
        self.t2i.get(token).map(|&i| &self.entries[i])
    }

    /// Dimension of `token` in the feature vectors.
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.t2i.get(token).copied()
    }

    /// Tokens in dimension order.
    pub fn tokens(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.token.to_owned()).collect()
    }

    /// token -> number of occurrences in the whole corpus.
    pub fn frequencies(&self) -> HashMap<String, usize> {
        self.entries
        .iter()
        .map(|entry| (entry.token.to_owned(), entry.dataset_freq))
        .collect()
    }
}


#[cfg(test)]
mod tests {

    use std::collections::{BTreeMap, HashMap};
    use super::Vocabulary;

    #[test]
    fn counts_dataset_and_document_frequencies() {

        let corpus = vec![vec!["cat", "dog"], vec!["dog", "dog", "bird"]];
        let vocab = Vocabulary::build(&corpus);

        assert_eq!(vocab.tokens(), vec!["cat", "dog", "bird"]);

        let cat = vocab.get("cat").unwrap();
        let dog = vocab.get("dog").unwrap();
        let bird = vocab.get("bird").unwrap();
        assert_eq!((cat.dataset_freq, dog.dataset_freq, bird.dataset_freq), (1, 3, 1));
        assert_eq!(cat.per_doc, BTreeMap::from([(0, 1)]));
        assert_eq!(dog.per_doc, BTreeMap::from([(0, 1), (1, 2)]));
        assert_eq!(bird.per_doc, BTreeMap::from([(1, 1)]));

        assert_eq!(dog.doc_freq(1), 2);
        assert_eq!(cat.doc_freq(1), 0);
    }

    #[test]
    fn repeats_in_a_later_document_do_not_reset() {

        // "a" is seen in doc 0, then three times in doc 2, skipping doc 1
        let corpus = vec![vec!["a", "b"], vec!["b"], vec!["a", "c", "a", "a"]];
        let vocab = Vocabulary::build(&corpus);

        let a = vocab.get("a").unwrap();
        assert_eq!(a.dataset_freq, 4);
        assert_eq!(a.per_doc, BTreeMap::from([(0, 1), (2, 3)]));
        assert_eq!(vocab.index_of("c"), Some(2));
    }

    #[test]
    fn dataset_frequency_is_sum_of_document_counts() {

        let corpus = vec![
            vec!["well", "done", "you", "really", "well", "done"],
            vec!["good", "work", "you"],
            vec!["nice", "work", "man", "that", "was", "great"],
        ];
        let vocab = Vocabulary::build(&corpus);
        for entry in vocab.entries() {
            assert_eq!(entry.dataset_freq, entry.per_doc.values().sum::<usize>(), "token {}", entry.token);
        }
    }

    #[test]
    fn frequencies_map() {

        let corpus = vec![vec!["a", "a", "a"]];
        let vocab = Vocabulary::build(&corpus);
        assert_eq!(vocab.frequencies(), HashMap::from([("a".to_string(), 3)]));
    }

    #[test]
    fn empty_vocabulary() {

        let vocab = Vocabulary::default();
        assert!(vocab.is_empty());
        assert!(vocab.frequencies().is_empty());

        let corpus: Vec<Vec<String>> = vec![vec![], vec![]];
        assert!(Vocabulary::build(&corpus).is_empty());
    }
}
