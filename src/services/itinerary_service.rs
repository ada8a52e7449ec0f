use bson::{oid::ObjectId, DateTime};
use chrono::NaiveDate;
use log::{error, info, warn};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use thiserror::Error;

use crate::db::repository::TripStore;
use crate::middleware::auth_context::AuthenticatedUser;
use crate::models::trip::{Companions, SavedTrip, TripRequest, TripResponse};
use crate::services::trip_planner::{GeneratorError, TripPlanGenerator, TripPlanParams};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Shorter output is treated as a failed generation.
pub const MIN_CONTENT_CHARS: usize = 100;

/// Every way an itinerary request can fail. `Display` is the message shown
/// to the caller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TripFailure {
    #[error("Missing required fields")]
    MissingFields,
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("End date must not be before start date")]
    EndBeforeStart,
    #[error("Trip duration of {days} days exceeds the maximum of {max} days")]
    TooLong { days: i64, max: i64 },
    #[error("The AI service took too long to respond. Please try again.")]
    Timeout,
    #[error("Error generating trip content: {0}")]
    Generator(String),
    #[error("Error generating trip content: Generated content is too short or empty")]
    ContentTooShort,
    #[error("Invalid request method")]
    InvalidMethod,
    #[error("{0}")]
    Request(String),
}

/// A request that passed validation, with the values the generator and the
/// saved trip need.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTrip {
    pub destination: String,
    pub place_id: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_date_raw: String,
    pub duration_days: i64,
    pub companions: Companions,
    pub activities: Vec<String>,
    pub origin_location: String,
    pub transportation_mode: String,
}

impl ValidatedTrip {
    pub fn plan_params(&self) -> TripPlanParams {
        TripPlanParams {
            destination: self.destination.clone(),
            duration_days: self.duration_days,
            activities: self.activities.join(", "),
            companions: self.companions.phrase().to_string(),
            start_date: self.start_date_raw.clone(),
            origin_location: self.origin_location.clone(),
            transportation_mode: self.transportation_mode.clone(),
        }
    }

    fn to_saved_trip(&self, id: ObjectId, user_id: ObjectId, content: &str) -> SavedTrip {
        SavedTrip {
            id: Some(id),
            user_id,
            destination: self.destination.clone(),
            place_id: self.place_id.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            companions: self.companions.code().to_string(),
            activities: self.activities.join(","),
            trip_html: content.to_string(),
            origin_location: self.origin_location.clone(),
            transportation_mode: self.transportation_mode.clone(),
            created_at: Some(DateTime::now()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedTrip {
    pub content: String,
    /// Seconds spent in the generator, rounded to two decimals.
    pub generation_time: f64,
    pub trip_id: Option<ObjectId>,
    pub save_error: Option<String>,
}

impl From<GeneratedTrip> for TripResponse {
    fn from(trip: GeneratedTrip) -> Self {
        TripResponse {
            success: true,
            content: Some(trip.content),
            generation_time: Some(trip.generation_time),
            trip_id: trip.trip_id.map(|id| id.to_hex()),
            save_error: trip.save_error,
            error: None,
        }
    }
}

/// Exactly `YYYY-MM-DD`: chrono's `%Y` alone also takes short or signed years.
fn is_iso_date_shape(value: &str) -> bool {
    value.len() == 10
        && value.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}

pub fn parse_trip_date(value: &str) -> Result<NaiveDate, TripFailure> {
    if !is_iso_date_shape(value) {
        return Err(TripFailure::InvalidDate(value.to_string()));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| TripFailure::InvalidDate(value.to_string()))
}

/// Inclusive day count: a trip starting and ending on the same date lasts one day.
pub fn trip_duration_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

pub fn round_seconds(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 100.0).round() / 100.0
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

pub fn validate(request: TripRequest, max_trip_days: i64) -> Result<ValidatedTrip, TripFailure> {
    let (Some(destination), Some(start_raw), Some(end_raw), Some(companions), Some(activities)) = (
        present(request.destination),
        present(request.start_date),
        present(request.end_date),
        present(request.companions),
        request.activities.filter(|a| !a.is_empty()),
    ) else {
        return Err(TripFailure::MissingFields);
    };

    let start_date = parse_trip_date(&start_raw)?;
    let end_date = parse_trip_date(&end_raw)?;
    if end_date < start_date {
        return Err(TripFailure::EndBeforeStart);
    }

    let duration_days = trip_duration_days(start_date, end_date);
    if duration_days > max_trip_days {
        return Err(TripFailure::TooLong {
            days: duration_days,
            max: max_trip_days,
        });
    }

    Ok(ValidatedTrip {
        destination,
        place_id: request.place_id,
        start_date,
        end_date,
        start_date_raw: start_raw,
        duration_days,
        companions: Companions::from_code(&companions),
        activities,
        origin_location: request.origin_location.unwrap_or_default(),
        transportation_mode: request.transportation_mode.unwrap_or_default(),
    })
}

/// Turns a trip request into a generated itinerary and, for signed-in
/// callers, a saved trip.
pub struct ItineraryService {
    planner: Arc<dyn TripPlanGenerator>,
    trips: Arc<dyn TripStore>,
    timeout: Duration,
    max_trip_days: i64,
}

impl ItineraryService {
    pub fn new(
        planner: Arc<dyn TripPlanGenerator>,
        trips: Arc<dyn TripStore>,
        timeout: Duration,
        max_trip_days: i64,
    ) -> Self {
        Self {
            planner,
            trips,
            timeout,
            max_trip_days,
        }
    }

    pub async fn generate(
        &self,
        request: TripRequest,
        user: Option<&AuthenticatedUser>,
    ) -> Result<GeneratedTrip, TripFailure> {
        let trip = validate(request, self.max_trip_days)?;
        let params = trip.plan_params();

        info!(
            "Generating {}-day itinerary for {} ({})",
            params.duration_days, params.destination, params.companions
        );

        let started = Instant::now();
        let outcome = tokio::time::timeout(self.timeout, self.planner.generate(&params))
            .await
            .unwrap_or(Err(GeneratorError::Timeout));
        let generation_time = round_seconds(started.elapsed());

        let content = match outcome {
            Ok(content) => content,
            Err(GeneratorError::Timeout) => {
                warn!("AI generation timed out after {:?}", self.timeout);
                return Err(TripFailure::Timeout);
            }
            Err(GeneratorError::Failed(message)) => {
                error!("AI generation error: {}", message);
                return Err(TripFailure::Generator(message));
            }
        };

        if content.chars().count() < MIN_CONTENT_CHARS {
            warn!("AI generation returned {} characters", content.len());
            return Err(TripFailure::ContentTooShort);
        }

        let mut generated = GeneratedTrip {
            content,
            generation_time,
            trip_id: None,
            save_error: None,
        };

        if let Some(user) = user {
            match self.save(&trip, user, &generated.content).await {
                Ok(id) => generated.trip_id = Some(id),
                Err(message) => {
                    error!("Trip generated but not saved: {}", message);
                    generated.save_error = Some(format!("Trip generated but not saved: {message}"));
                }
            }
        }

        Ok(generated)
    }

    async fn save(
        &self,
        trip: &ValidatedTrip,
        user: &AuthenticatedUser,
        content: &str,
    ) -> Result<ObjectId, String> {
        let user_id = user.object_id().map_err(|e| e.to_string())?;
        let id = ObjectId::new();
        let saved = trip.to_saved_trip(id, user_id, content);
        self.trips.save_trip(&saved).await.map_err(|e| e.to_string())?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, DATE_FORMAT).unwrap()
    }

    fn request() -> TripRequest {
        TripRequest {
            destination: Some("Manali".to_string()),
            place_id: Some("65f0c0ffee0000000000beef".to_string()),
            start_date: Some("2025-06-01".to_string()),
            end_date: Some("2025-06-05".to_string()),
            companions: Some("partner".to_string()),
            activities: Some(vec!["hiking".to_string(), "food".to_string()]),
            origin_location: None,
            transportation_mode: Some("car".to_string()),
        }
    }

    #[test]
    fn duration_is_inclusive() {
        assert_eq!(trip_duration_days(date("2025-06-01"), date("2025-06-05")), 5);
        assert_eq!(trip_duration_days(date("2025-06-01"), date("2025-06-01")), 1);
        assert_eq!(trip_duration_days(date("2024-02-28"), date("2024-03-01")), 3);
    }

    #[test]
    fn rejects_dates_in_other_formats() {
        assert_eq!(
            parse_trip_date("01/06/2025"),
            Err(TripFailure::InvalidDate("01/06/2025".to_string()))
        );
        assert!(parse_trip_date("2025-13-01").is_err());
        for loose in ["25-06-01", "+2025-06-01", " 2025-06-01 ", "2025-6-1"] {
            assert_eq!(
                parse_trip_date(loose),
                Err(TripFailure::InvalidDate(loose.to_string()))
            );
        }
        assert!(parse_trip_date("2025-06-01").is_ok());
    }

    #[test]
    fn shapes_generator_parameters() {
        let trip = validate(request(), 30).unwrap();
        let params = trip.plan_params();
        assert_eq!(params.duration_days, 5);
        assert_eq!(params.activities, "hiking, food");
        assert_eq!(params.companions, "couple");
        assert_eq!(params.start_date, "2025-06-01");
        assert_eq!(params.origin_location, "");
        assert_eq!(params.transportation_mode, "car");
    }

    #[test]
    fn each_required_field_is_checked() {
        let blanks: [fn(&mut TripRequest); 6] = [
            |r| r.destination = None,
            |r| r.start_date = Some(String::new()),
            |r| r.end_date = None,
            |r| r.companions = Some(String::new()),
            |r| r.activities = None,
            |r| r.activities = Some(Vec::new()),
        ];
        for blank in blanks {
            let mut request = request();
            blank(&mut request);
            assert_eq!(validate(request, 30), Err(TripFailure::MissingFields));
        }
    }

    #[test]
    fn rejects_reversed_and_overlong_trips() {
        let mut reversed = request();
        reversed.end_date = Some("2025-05-31".to_string());
        assert_eq!(validate(reversed, 30), Err(TripFailure::EndBeforeStart));

        assert_eq!(
            validate(request(), 4),
            Err(TripFailure::TooLong { days: 5, max: 4 })
        );
    }

    #[test]
    fn saved_trip_keeps_raw_codes() {
        let trip = validate(request(), 30).unwrap();
        let id = ObjectId::new();
        let saved = trip.to_saved_trip(id, ObjectId::new(), "<h2>Day 1</h2>");
        assert_eq!(saved.activities, "hiking,food");
        assert_eq!(saved.companions, "partner");
        assert_eq!(saved.start_date, date("2025-06-01"));
        assert_eq!(saved.end_date, date("2025-06-05"));
        assert_eq!(saved.id, Some(id));
    }

    #[test]
    fn rounds_to_hundredths() {
        assert_eq!(round_seconds(Duration::from_millis(1234)), 1.23);
        assert_eq!(round_seconds(Duration::from_millis(1236)), 1.24);
        assert_eq!(round_seconds(Duration::ZERO), 0.0);
    }

    #[test]
    fn failure_messages() {
        assert_eq!(
            TripFailure::ContentTooShort.to_string(),
            "Error generating trip content: Generated content is too short or empty"
        );
        assert_eq!(
            TripFailure::Generator("quota exceeded".to_string()).to_string(),
            "Error generating trip content: quota exceeded"
        );
    }
}
