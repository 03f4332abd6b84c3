//! # Trip Search Prompt Templates
//!
//! Placeholders: `{destination}`, `{date}`, `{travelers}`, `{count}`.

/// The system prompt for trip search. Sets the persona and the output contract.
pub const TRIP_SEARCH_SYSTEM_PROMPT: &str = "You are the travel package search API for Nisa Travels UAE. \
    You answer with a JSON array only: no prose, no markdown fences, no commentary.";

/// The user prompt for trip search.
pub const TRIP_SEARCH_USER_PROMPT: &str = "Generate {count} detailed, realistic travel packages for:\n\
    Destination: {destination}\n\
    Travel Date: {date}\n\
    Number of Travelers: {travelers}\n\n\
    Requirements:\n\
    1. Focus on UAE destinations and attractions.\n\
    2. Consider seasonal weather and events around the travel date.\n\
    3. Adjust for the group size.\n\
    4. Include local cultural experiences.\n\
    5. Provide realistic pricing in USD per booking.\n\n\
    Every element of the array must have exactly these fields:\n\
    {\n\
      \"id\": \"unique-string-id\",\n\
      \"title\": \"Package Name\",\n\
      \"description\": \"2-3 sentence description\",\n\
      \"price\": 1234,\n\
      \"duration\": \"X Days\",\n\
      \"highlights\": [\"4 main attractions\"],\n\
      \"image\": \"https://images.unsplash.com/relevant-image\",\n\
      \"rating\": 4.8,\n\
      \"availableSeats\": 10\n\
    }";

/// Fills the trip search user prompt.
pub fn trip_search_user_prompt(destination: &str, date: &str, travelers: u32, count: usize) -> String {
    TRIP_SEARCH_USER_PROMPT
        .replace("{destination}", destination)
        .replace("{date}", date)
        .replace("{travelers}", &travelers.to_string())
        .replace("{count}", &count.to_string())
}
