use std::env;

use log::LevelFilter;
use phrase_gen_core::model::chain_generator::ChainGenerator;
use phrase_gen_core::model::generator_options::GeneratorOptions;
use phrase_gen_core::text::format_sentence;

const USAGE: &str = "Usage: phrase-gen-cli <corpus-path> [count] [debug]";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args: Vec<String> = env::args().skip(1).collect();

    // 'debug' may appear anywhere and turns on per-attempt logging
    let debug = args.iter().any(|arg| arg == "debug");
    args.retain(|arg| arg != "debug");

    let mut logger = env_logger::Builder::from_default_env();
    if debug {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let corpus_path = args.first().ok_or(USAGE)?;
    let count: usize = match args.get(1) {
        Some(value) => value.parse().map_err(|_| format!("Invalid count '{value}'\n{USAGE}"))?,
        None => 10,
    };

    // Build the chain once, all generations reuse it
    let mut chain = ChainGenerator::new(corpus_path)?;

    // Defaults: 7..=20 words, 100 attempts, order-2 context preferred half of the time
    let mut options = GeneratorOptions::default();

    // Higher values stick closer to the corpus
    options.set_context_usage_degree(0.7)?;

    for i in 0..count {
        match chain.generate(&options) {
            Some(words) => println!("{}: {}", i + 1, format_sentence(&words)),
            None => println!("{}: no sentence could be generated from this corpus", i + 1),
        }
    }

    Ok(())
}
