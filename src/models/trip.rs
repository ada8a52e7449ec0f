use bson::{oid::ObjectId, DateTime};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use std::fmt;

/// Body of `POST /api/trips/generate`. Every field is optional at the wire
/// level so that a missing field is reported by the handler, not by serde.
#[serde_as]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TripRequest {
    pub destination: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub place_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub companions: Option<String>,
    pub activities: Option<Vec<String>>,
    pub origin_location: Option<String>,
    pub transportation_mode: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Companions {
    Solo,
    Partner,
    Friends,
    Family,
    Other(String),
}

impl Companions {
    pub fn from_code(code: &str) -> Self {
        match code {
            "solo" => Companions::Solo,
            "partner" => Companions::Partner,
            "friends" => Companions::Friends,
            "family" => Companions::Family,
            other => Companions::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Companions::Solo => "solo",
            Companions::Partner => "partner",
            Companions::Friends => "friends",
            Companions::Family => "family",
            Companions::Other(code) => code,
        }
    }

    /// Phrase handed to the generator. Unknown codes pass through as-is.
    pub fn phrase(&self) -> &str {
        match self {
            Companions::Solo => "solo traveler",
            Companions::Partner => "couple",
            Companions::Friends => "group of friends",
            Companions::Family => "family with children",
            Companions::Other(code) => code,
        }
    }
}

/// A generated itinerary kept for an authenticated user.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SavedTrip {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub destination: String,
    pub place_id: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub companions: String,
    pub activities: String, // comma-joined
    pub trip_html: String,
    pub origin_location: String,
    pub transportation_mode: String,
    pub created_at: Option<DateTime>,
}

#[derive(Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct TripResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TripResponse {
    pub fn failed(error: impl fmt::Display) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            ..Default::default()
        }
    }
}
