
use tracing::debug;

/// Characters a document is split on when no other set is configured.
pub const DEFAULT_DELIMITERS: [char; 5] = [' ', ',', '.', '?', '!'];

// defines the behavior needed for tokenizing a corpus.
// the vectorizer only depends on the shape of the output, any producer of
// ordered token sequences can stand in for the default splitter.
pub trait Tokenizer {
    fn tokenize(&self, document: &str) -> Vec<String>;

    /// Tokenizes every document of the corpus, keeping corpus order.
    fn transform<S: AsRef<str>>(&self, corpus: &[S]) -> Vec<Vec<String>> {
        debug!(num_documents = corpus.len(), "tokenizing corpus");
        corpus.iter().map(|document| self.tokenize(document.as_ref())).collect()
    }
}

/// Lowercases a document and splits it on a fixed set of delimiters,
/// dropping the empty pieces. Duplicates and source order are kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DelimiterTokenizer {
    delimiters: Vec<char>,
}

impl DelimiterTokenizer {

    pub fn new(delimiters: impl IntoIterator<Item = char>) -> Self {
        Self {
            delimiters: delimiters.into_iter().collect()
        }
    }

    pub fn delimiters(&self) -> &[char] {
        &self.delimiters
    }
}

impl Default for DelimiterTokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITERS)
    }
}

impl Tokenizer for DelimiterTokenizer {
    fn tokenize(&self, document: &str) -> Vec<String> {
        document
        .to_lowercase()
        .split(|c: char| self.delimiters.contains(&c))
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
        .collect()
    }
}


#[cfg(test)]
mod tests {

    use super::{DelimiterTokenizer, Tokenizer};

    #[test]
    fn splits_on_punctuation_and_lowercases() {

        let tokenizer = DelimiterTokenizer::default();
        let tokens = tokenizer.tokenize("Well done! You really made a great job. Really well done!!");
        assert_eq!(tokens, vec![
            "well", "done", "you", "really", "made", "a", "great", "job", "really", "well", "done"
        ]);
    }

    #[test]
    fn glued_sentences_split_on_period() {

        // no space after the period in the sample dataset
        let tokenizer = DelimiterTokenizer::default();
        assert_eq!(tokenizer.tokenize("Good work.I appreciate"), vec!["good", "work", "i", "appreciate"]);
    }

    #[test]
    fn empty_and_delimiter_only_documents() {

        let tokenizer = DelimiterTokenizer::default();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize(" ,.?! ").is_empty());
    }

    #[test]
    fn other_characters_are_kept_in_tokens() {

        // tabs, newlines, dashes and apostrophes are not delimiters
        let tokenizer = DelimiterTokenizer::default();
        assert_eq!(tokenizer.tokenize("it's a\tlong-term plan"), vec!["it's", "a\tlong-term", "plan"]);
    }

    #[test]
    fn transform_keeps_corpus_order_and_length() {

        let tokenizer = DelimiterTokenizer::default();
        let corpus = ["cat dog", "", "Dog dog BIRD"];
        let tokenized = tokenizer.transform(&corpus);
        assert_eq!(tokenized.len(), corpus.len());
        assert_eq!(tokenized[0], vec!["cat", "dog"]);
        assert!(tokenized[1].is_empty());
        assert_eq!(tokenized[2], vec!["dog", "dog", "bird"]);
    }

    #[test]
    fn custom_delimiters() {

        let tokenizer = DelimiterTokenizer::new([';']);
        assert_eq!(tokenizer.delimiters(), &[';']);
        assert_eq!(tokenizer.tokenize("A b;;C"), vec!["a b", "c"]);
    }
}
