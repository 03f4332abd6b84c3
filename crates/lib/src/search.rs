//! # Trip Search
//!
//! Asks a generative text provider for package suggestions and parses its JSON
//! answer. Any failure along the way (provider error, unparseable text) yields
//! the fixed sample packages instead, priced for the requested party size.

use crate::{
    constants::SEARCH_RESULT_COUNT,
    prompts::{trip_search_user_prompt, TRIP_SEARCH_SYSTEM_PROMPT},
    providers::ai::AiProvider,
    samples::sample_search_results,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::{info, warn};

static JSON_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[\s\S]*\]").expect("static regex is valid"));

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub destination: String,
    pub date: String,
    pub travelers: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub duration: String,
    pub highlights: Vec<String>,
    pub image: String,
    pub rating: f64,
    pub available_seats: u32,
}

/// Trip length buckets offered on the results view.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchFilter {
    #[default]
    All,
    /// Up to 3 days.
    Short,
    /// 4 to 7 days.
    Medium,
    /// More than 7 days.
    Long,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchSort {
    /// Keep the provider's order.
    #[default]
    Recommended,
    Rating,
    Duration,
    Seats,
}

/// Reads the leading day count out of strings like `"5 Days"`.
pub fn duration_days(duration: &str) -> Option<u32> {
    let first = duration.split_whitespace().next()?;
    let digits: String = first.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Applies the results-view filter and sort. Results whose duration cannot be
/// read are dropped by every filter except `All`.
pub fn refine_results(
    results: Vec<SearchResult>,
    filter: SearchFilter,
    sort: SearchSort,
) -> Vec<SearchResult> {
    let mut refined: Vec<SearchResult> = results
        .into_iter()
        .filter(|r| {
            let days = duration_days(&r.duration);
            match filter {
                SearchFilter::All => true,
                SearchFilter::Short => days.is_some_and(|d| d <= 3),
                SearchFilter::Medium => days.is_some_and(|d| d > 3 && d <= 7),
                SearchFilter::Long => days.is_some_and(|d| d > 7),
            }
        })
        .collect();

    match sort {
        SearchSort::Recommended => {}
        SearchSort::Rating => refined.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SearchSort::Duration => {
            refined.sort_by_key(|r| duration_days(&r.duration).unwrap_or(u32::MAX))
        }
        SearchSort::Seats => refined.sort_by(|a, b| b.available_seats.cmp(&a.available_seats)),
    }
    refined
}

/// Parses a provider answer: the whole text as a JSON array, or else the first
/// bracketed span inside it.
pub fn parse_search_response(text: &str) -> Option<Vec<SearchResult>> {
    if let Ok(results) = serde_json::from_str::<Vec<SearchResult>>(text.trim()) {
        return Some(results);
    }
    let candidate = JSON_ARRAY.find(text)?;
    serde_json::from_str(candidate.as_str()).ok()
}

/// The sample packages with each price multiplied by the number of travelers.
pub fn fallback_results(travelers: u32) -> Vec<SearchResult> {
    sample_search_results()
        .into_iter()
        .map(|mut result| {
            result.price *= f64::from(travelers);
            result
        })
        .collect()
}

#[derive(Clone, Debug)]
pub struct TripSearch {
    provider: Option<Box<dyn AiProvider>>,
}

impl TripSearch {
    pub fn new(provider: Box<dyn AiProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// A search that always answers with the sample packages.
    pub fn offline() -> Self {
        Self { provider: None }
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Runs a search. Never fails: every error path ends in the fallback results.
    pub async fn search(&self, params: &SearchParams) -> Vec<SearchResult> {
        info!(destination = %params.destination, date = %params.date, travelers = params.travelers, "Searching trips");
        let user_prompt = trip_search_user_prompt(
            &params.destination,
            &params.date,
            params.travelers,
            SEARCH_RESULT_COUNT,
        );

        let Some(provider) = &self.provider else {
            info!("No trip search provider configured, using fallback packages");
            return fallback_results(params.travelers);
        };

        let text = match provider
            .generate(TRIP_SEARCH_SYSTEM_PROMPT, &user_prompt)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                warn!("Trip search provider failed, using fallback packages: {e}");
                return fallback_results(params.travelers);
            }
        };

        match parse_search_response(&text) {
            Some(results) if !results.is_empty() => {
                info!(count = results.len(), "Parsed trip search results");
                results
            }
            _ => {
                warn!("No usable JSON in trip search response, using fallback packages");
                fallback_results(params.travelers)
            }
        }
    }
}
