use std::env;
use std::sync::Mutex;

use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};

use log::{error, info};
use phrase_gen_core::io::list_files;
use phrase_gen_core::model::chain_generator::ChainGenerator;
use phrase_gen_core::model::generator_options::GeneratorOptions;
use phrase_gen_core::text::format_sentence;
use serde::Deserialize;

const DATA_DIR: &str = "./data";
const CORPUS_EXTENSION: &str = "txt";

/// Upper bound on `retry_count`, generation holds the shared lock while retrying.
const MAX_RETRY_COUNT: usize = 1_000;

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize, Default)]
struct GenerateParams {
	start: Option<String>,
	min_word_count: Option<usize>,
	max_word_count: Option<usize>,
	retry_count: Option<usize>,
	context_usage_degree: Option<f64>,
	format: Option<String> // "sentence" (default) or "words"
}

#[derive(Deserialize)]
struct CorpusQuery {
	name: Option<String>
}

struct SharedData {
	chain: ChainGenerator
}

impl GenerateParams {
	/// Builds generation options, applying defaults for missing parameters.
	///
	/// A missing `max_word_count` is raised to `min_word_count` when the latter
	/// exceeds the default maximum.
	fn options(&self) -> Result<GeneratorOptions, String> {
		let mut options = GeneratorOptions::default();
		options.start_word = self.start.clone().filter(|s| !s.trim().is_empty());
		if let Some(retry_count) = self.retry_count {
			if retry_count > MAX_RETRY_COUNT {
				return Err(format!("retry_count must not exceed {}, got {}", MAX_RETRY_COUNT, retry_count));
			}
			options.retry_count = retry_count;
		}

		let min = self.min_word_count.unwrap_or(options.min_word_count());
		let max = self.max_word_count.unwrap_or(options.max_word_count().max(min));
		options.set_word_bounds(min, max).map_err(|e| e.to_string())?;

		if let Some(degree) = self.context_usage_degree {
			options.set_context_usage_degree(degree).map_err(|e| e.to_string())?;
		}
		Ok(options)
	}

	fn as_words(&self) -> bool {
		matches!(&self.format, Some(f) if f.eq_ignore_ascii_case("words"))
	}
}

fn corpus_path(name: &str) -> String {
	format!("{}/{}.{}", DATA_DIR, name, CORPUS_EXTENSION)
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates a sentence from the shared chain based on query parameters.
/// Responds 404 when no sequence could be produced within the retry budget.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let options = match query.options() {
		Ok(o) => o,
		Err(e) => return HttpResponse::BadRequest().body(e)
	};

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};

	match shared_data.chain.generate(&options) {
		Some(words) if query.as_words() => HttpResponse::Ok().body(words.join(" ")),
		Some(words) => HttpResponse::Ok().body(format_sentence(&words)),
		None => HttpResponse::NotFound().body("No sequence could be generated"),
	}
}

/// HTTP GET endpoint `/v1/stats`, table sizes of the loaded chain as JSON.
#[get("/v1/stats")]
async fn get_stats(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};
	HttpResponse::Ok().json(shared_data.chain.stats())
}

#[get("/v1/corpora")]
async fn get_corpora() -> impl Responder {
	match list_files(DATA_DIR, CORPUS_EXTENSION) {
		Ok(files) => HttpResponse::Ok().body(files.join("\n")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list corpora")
	}
}

/// HTTP PUT endpoint `/v1/load_corpus?name=...`
///
/// Replaces the shared chain with one built from `./data/<name>.txt`.
#[put("/v1/load_corpus")]
async fn put_corpus(data: web::Data<Mutex<SharedData>>, query: web::Query<CorpusQuery>) -> impl Responder {
	let name = match &query.name {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty corpus name"),
	};
	if name.contains(['/', '\\']) || name.contains("..") {
		return HttpResponse::BadRequest().body("Invalid corpus name");
	}

	// Build outside the lock, generation keeps working meanwhile
	let chain = match ChainGenerator::new(corpus_path(name)) {
		Ok(c) => c,
		Err(e) => return HttpResponse::InternalServerError().body(format!("Failed to load corpus: {e}"))
	};

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};
	shared_data.chain = chain;

	HttpResponse::Ok().body("Corpus loaded successfully")
}

/// Main entry point for the server.
///
/// Optionally loads the corpus named by the first argument, wraps the chain in
/// a `Mutex` (drawing refreshes cached probabilities) and starts an Actix-web
/// HTTP server on 127.0.0.1:5000.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let chain = match env::args().nth(1) {
		Some(name) => match ChainGenerator::new(corpus_path(&name)) {
			Ok(chain) => chain,
			Err(e) => {
				error!("Failed to load corpus '{}': {}", name, e);
				ChainGenerator::default()
			}
		},
		None => ChainGenerator::default(),
	};
	let shared_chain = web::Data::new(Mutex::new(SharedData { chain }));

	info!("Listening on 127.0.0.1:5000");
	HttpServer::new(move || {
		App::new()
			.app_data(shared_chain.clone())
			.service(get_generated)
			.service(get_stats)
			.service(get_corpora)
			.service(put_corpus)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_when_no_parameters() {
		let options = GenerateParams::default().options().unwrap();
		assert_eq!(options, GeneratorOptions::default());
	}

	#[test]
	fn retry_count_is_capped() {
		let params = GenerateParams { retry_count: Some(MAX_RETRY_COUNT), ..Default::default() };
		assert_eq!(params.options().unwrap().retry_count, MAX_RETRY_COUNT);

		let params = GenerateParams { retry_count: Some(usize::MAX), ..Default::default() };
		assert!(params.options().unwrap_err().contains("retry_count"));
	}

	#[test]
	fn missing_max_follows_large_min() {
		let params = GenerateParams { min_word_count: Some(25), ..Default::default() };
		let options = params.options().unwrap();
		assert_eq!((options.min_word_count(), options.max_word_count()), (25, 25));

		let params = GenerateParams { min_word_count: Some(3), ..Default::default() };
		let options = params.options().unwrap();
		assert_eq!((options.min_word_count(), options.max_word_count()), (3, 20));
	}

	#[test]
	fn explicit_bounds_are_still_validated() {
		let params = GenerateParams { min_word_count: Some(25), max_word_count: Some(20), ..Default::default() };
		assert!(params.options().is_err());

		let params = GenerateParams { context_usage_degree: Some(2.0), ..Default::default() };
		assert!(params.options().is_err());
	}

	#[test]
	fn words_format_is_case_insensitive() {
		let params = GenerateParams { format: Some("WORDS".to_owned()), ..Default::default() };
		assert!(params.as_words());
		assert!(!GenerateParams::default().as_words());
	}
}
