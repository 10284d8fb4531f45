use std::env;
use std::sync::Once;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use tfidf_bow::{Config, Pipeline};

static INIT: Once = Once::new();

// `TFIDF_BOW_LOG` takes the usual filter syntax, e.g. `tfidf_bow=debug`
fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("TFIDF_BOW_LOG")
            .unwrap_or_else(|_| EnvFilter::new("tfidf_bow=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    });
}

fn main() -> Result<()> {

    init_tracing();
    let args: Vec<String> = env::args().collect();
    let config = Config::new(&args).context("building parameters")?;

    let features = Pipeline::run(&config).context("running the tf-idf pipeline")?;

    println!("tokens: {:?}", features.vocabulary().tokens());
    for (doc_id, vector) in features.vectors().rows().into_iter().enumerate() {
        println!("{} : {}", doc_id, vector);
    }

    for entry in features.vocabulary().entries() {
        println!("{} = {}", entry.token, entry.dataset_freq);
    }

    Ok(())
}
