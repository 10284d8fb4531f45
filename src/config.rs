
pub mod files_handling;

use serde_json::Value;
use std::fmt::Display;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{BowError, Result};
use crate::tfidf::{VectorizerParams, ZeroNormPolicy};
use crate::tokenizer::{DelimiterTokenizer, DEFAULT_DELIMITERS};

#[derive(Clone, Debug, PartialEq)]
pub struct JsonTypes {
    pub corpus_file: Option<String>,
    pub output_dir: Option<String>,
    pub delimiters: String,
    pub zero_norm: ZeroNormPolicy,
    pub num_threads: usize,
    pub save_features: bool,
}

impl Default for JsonTypes {
    fn default() -> Self {
        Self {
            corpus_file: None,
            output_dir: None,
            delimiters: DEFAULT_DELIMITERS.iter().collect(),
            zero_norm: ZeroNormPolicy::Skip,
            num_threads: 1,
            save_features: true,
        }
    }
}

impl Display for JsonTypes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "using parameters:
        corpus_file: {:?}
        output_dir: {:?}
        delimiters: {:?}
        zero_norm: {}
        num_threads: {}
        save_features: {}",
        self.corpus_file, self.output_dir, self.delimiters, self.zero_norm, self.num_threads, self.save_features)
    }
}

pub struct Config {
    params: JsonTypes
}

impl Config {

    pub fn get_params(&self) -> &JsonTypes {
        &self.params
    }

    pub fn tokenizer(&self) -> DelimiterTokenizer {
        DelimiterTokenizer::new(self.params.delimiters.chars())
    }

    pub fn vectorizer_params(&self) -> Result<VectorizerParams> {
        VectorizerParams::new(self.params.zero_norm, self.params.num_threads)
    }

    /// Reads the json file at `path`, missing keys take their default value.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Config> {
        let f = BufReader::new(File::open(path)?);
        let json: Value = serde_json::from_reader(f)?;
        Config::from_json(&json)
    }

    pub fn from_json(json: &Value) -> Result<Config> {

        if !json.is_object() {
            return Err(BowError::Config("configuration must be a json object".to_string()));
        }
        let defaults = JsonTypes::default();

        let corpus_file = optional_str(json, "corpus_file")?;
        let output_dir = optional_str(json, "output_dir")?;

        // handle default vs input parameters
        let delimiters = match json.get("delimiters") {
            Some(delimiters) => delimiters.as_str().ok_or_else(|| invalid("delimiters", "a string"))?.to_owned(),
            None => defaults.delimiters
        };
        let zero_norm = match json.get("zero_norm") {
            Some(zero_norm) => zero_norm.as_str().ok_or_else(|| invalid("zero_norm", "a string"))?.parse::<ZeroNormPolicy>()?,
            None => defaults.zero_norm
        };
        let num_threads = match json.get("num_threads") {
            Some(num_threads) => num_threads.as_u64().ok_or_else(|| invalid("num_threads", "a non negative integer"))? as usize,
            None => defaults.num_threads
        };
        let save_features = match json.get("save_features") {
            Some(save_features) => save_features.as_bool().ok_or_else(|| invalid("save_features", "a boolean"))?,
            None => defaults.save_features
        };

        if num_threads == 0 {
            return Err(BowError::Config("num_threads must be at least 1".to_string()));
        }

        Ok(Config {
            params: JsonTypes {
                corpus_file,
                output_dir,
                delimiters,
                zero_norm,
                num_threads,
                save_features,
            }
        })
    }

    /// Builds the configuration from command line arguments: either no
    /// argument (defaults) or the path to a json file.
    pub fn new(args: &[String]) -> Result<Config> {
        match args.len() {
            1 => Ok(Config::default()),
            2 => Config::from_file(&args[1]),
            _ => Err(BowError::Config("input should be a path to json file only".to_string()))
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { params: JsonTypes::default() }
    }
}

fn invalid(key: &str, expected: &str) -> BowError {
    BowError::Config(format!("{} should be {}", key, expected))
}

fn optional_str(json: &Value, key: &str) -> Result<Option<String>> {
    match json.get(key) {
        Some(Value::Null) | None => Ok(None),
        Some(value) => Ok(Some(value.as_str().ok_or_else(|| invalid(key, "a string"))?.to_owned()))
    }
}
