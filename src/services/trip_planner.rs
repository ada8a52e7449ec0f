use async_trait::async_trait;
use thiserror::Error;

/// Why the generator produced no itinerary.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("generation timed out")]
    Timeout,
    #[error("{0}")]
    Failed(String),
}

/// Inputs of one itinerary generation, already shaped for the prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct TripPlanParams {
    pub destination: String,
    pub duration_days: i64,
    pub activities: String,
    pub companions: String,
    pub start_date: String,
    pub origin_location: String,
    pub transportation_mode: String,
}

#[async_trait]
pub trait TripPlanGenerator: Send + Sync {
    async fn generate(&self, params: &TripPlanParams) -> Result<String, GeneratorError>;
}

pub fn build_prompt(params: &TripPlanParams) -> String {
    let day_word = if params.duration_days == 1 { "day" } else { "days" };

    let mut prompt = format!(
        "Create a detailed {duration}-{day_word} travel itinerary for a {companions} \
         visiting {destination}, starting on {start}.\n\
         Preferred activities: {activities}.\n",
        duration = params.duration_days,
        companions = params.companions,
        destination = params.destination,
        start = params.start_date,
        activities = params.activities,
    );

    if !params.origin_location.is_empty() {
        prompt.push_str(&format!("Travelling from: {}.\n", params.origin_location));
    }
    if !params.transportation_mode.is_empty() {
        prompt.push_str(&format!(
            "Preferred transportation: {}.\n",
            params.transportation_mode
        ));
    }
    if !params.origin_location.is_empty() || !params.transportation_mode.is_empty() {
        prompt.push_str("Include how to get there and rough travel times.\n");
    }

    prompt.push_str(
        "\nFormat the answer as HTML using <h2> for each day, <h3> for morning, \
         afternoon and evening, and <ul> lists for activities. Include food \
         recommendations, estimated costs and practical tips. Return only the HTML, \
         without markdown fences.",
    );
    prompt
}
