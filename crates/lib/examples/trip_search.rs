//! Runs one trip search from the command line.
//!
//! With `GEMINI_API_KEY` set the packages are generated; without it the
//! built-in sample packages are printed.
//!
//! `RUST_LOG=info cargo run -p nisa --example trip_search -- Dubai 2026-12-01 2`

use dotenvy::dotenv;
use nisa::{
    constants::{gemini_api_url, DEFAULT_GEMINI_MODEL},
    providers::ai::gemini::GeminiProvider,
    search::refine_results,
    SearchParams, TripSearch,
};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging and load .env file
    tracing_subscriber::fmt::init();
    dotenv().ok();

    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        eprintln!("Usage: {} <destination> <date> <travelers> [filter] [sort]", args[0]);
        eprintln!();
        eprintln!("Example: {} Dubai 2026-12-01 2 medium rating", args[0]);
        return Ok(());
    }

    let params = SearchParams {
        destination: args[1].clone(),
        date: args[2].clone(),
        travelers: args[3].parse()?,
    };
    let filter = match args.get(4) {
        Some(value) => serde_json::from_value(serde_json::Value::String(value.clone()))?,
        None => Default::default(),
    };
    let sort = match args.get(5) {
        Some(value) => serde_json::from_value(serde_json::Value::String(value.clone()))?,
        None => Default::default(),
    };

    let search = match env::var("GEMINI_API_KEY") {
        Ok(api_key) if !api_key.trim().is_empty() => {
            let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());
            TripSearch::new(Box::new(GeminiProvider::new(gemini_api_url(&model), api_key)?))
        }
        _ => TripSearch::offline(),
    };

    let results = refine_results(search.search(&params).await, filter, sort);
    println!("--- {} package(s) ---", results.len());
    for result in results {
        println!(
            "{:<32} {:>10.2}  {:<10} rating {:.1}, {} seats",
            result.title, result.price, result.duration, result.rating, result.available_seats
        );
    }

    Ok(())
}
