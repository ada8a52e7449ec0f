use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::TryStreamExt;
use mongodb::{Client, Collection, Database};
use std::sync::Arc;
use thiserror::Error;

use crate::models::{
    booking::BookingRecord,
    place::{Hotel, Place},
    trip::SavedTrip,
};

const PLACES: &str = "Places";
const HOTELS: &str = "Hotels";
const SAVED_TRIPS: &str = "SavedTrips";
const BOOKINGS: &str = "Bookings";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid id: {0}")]
    InvalidId(String),
    #[error(transparent)]
    Database(#[from] mongodb::error::Error),
}

pub fn parse_object_id(id: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

#[async_trait]
pub trait TripStore: Send + Sync {
    async fn save_trip(&self, trip: &SavedTrip) -> Result<(), StoreError>;
}

#[async_trait]
pub trait Catalog: Send + Sync {
    async fn list_places(
        &self,
        search: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<Place>, StoreError>;
    async fn find_place(&self, id: &ObjectId) -> Result<Option<Place>, StoreError>;
    async fn hotels_for_place(&self, place_id: &ObjectId) -> Result<Vec<Hotel>, StoreError>;
    async fn find_hotel(&self, id: &ObjectId) -> Result<Option<Hotel>, StoreError>;
    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn record_booking(&self, booking: &BookingRecord) -> Result<(), StoreError>;
    async fn travel_history(&self, user_id: &ObjectId) -> Result<Vec<BookingRecord>, StoreError>;
}

/// MongoDB-backed implementation of every store trait.
#[derive(Clone)]
pub struct MongoRepository {
    db: Database,
}

impl MongoRepository {
    pub fn new(client: Arc<Client>, database: &str) -> Self {
        Self {
            db: client.database(database),
        }
    }

    fn places(&self) -> Collection<Place> {
        self.db.collection(PLACES)
    }

    fn hotels(&self) -> Collection<Hotel> {
        self.db.collection(HOTELS)
    }
}

/// Case-insensitive prefix match on `field`, or everything when `search` is blank.
fn prefix_filter(field: &str, search: Option<&str>) -> Document {
    match search.map(str::trim) {
        Some(text) if !text.is_empty() => doc! {
            field: {
                "$regex": format!("^{}", regex::escape(text)),
                "$options": "i"
            }
        },
        _ => doc! {},
    }
}

#[async_trait]
impl TripStore for MongoRepository {
    async fn save_trip(&self, trip: &SavedTrip) -> Result<(), StoreError> {
        let collection: Collection<SavedTrip> = self.db.collection(SAVED_TRIPS);
        collection.insert_one(trip).await?;
        Ok(())
    }
}

#[async_trait]
impl Catalog for MongoRepository {
    async fn list_places(
        &self,
        search: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<Place>, StoreError> {
        let places = self.places();
        let mut find = places
            .find(prefix_filter("name", search))
            .sort(doc! { "name": 1 });
        if let Some(limit) = limit {
            find = find.limit(limit);
        }
        let cursor = find.await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_place(&self, id: &ObjectId) -> Result<Option<Place>, StoreError> {
        Ok(self.places().find_one(doc! { "_id": *id }).await?)
    }

    async fn hotels_for_place(&self, place_id: &ObjectId) -> Result<Vec<Hotel>, StoreError> {
        let cursor = self
            .hotels()
            .find(doc! { "place_id": *place_id })
            .sort(doc! { "price": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_hotel(&self, id: &ObjectId) -> Result<Option<Hotel>, StoreError> {
        Ok(self.hotels().find_one(doc! { "_id": *id }).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

#[async_trait]
impl BookingStore for MongoRepository {
    async fn record_booking(&self, booking: &BookingRecord) -> Result<(), StoreError> {
        let collection: Collection<BookingRecord> = self.db.collection(BOOKINGS);
        collection.insert_one(booking).await?;
        Ok(())
    }

    async fn travel_history(&self, user_id: &ObjectId) -> Result<Vec<BookingRecord>, StoreError> {
        let collection: Collection<BookingRecord> = self.db.collection(BOOKINGS);
        let cursor = collection
            .find(doc! { "user_id": *user_id })
            .sort(doc! { "created_at": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_search_matches_everything() {
        assert_eq!(prefix_filter("name", None), doc! {});
        assert_eq!(prefix_filter("name", Some("   ")), doc! {});
    }

    #[test]
    fn search_is_an_escaped_prefix_regex() {
        let filter = prefix_filter("name", Some("St. Moritz"));
        let clause = filter.get_document("name").unwrap();
        assert_eq!(clause.get_str("$regex").unwrap(), r"^St\. Moritz");
        assert_eq!(clause.get_str("$options").unwrap(), "i");
    }

    #[actix_rt::test]
    async fn list_places_reports_an_unreachable_server() {
        let client = Client::with_uri_str("mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=100")
            .await
            .unwrap();
        let repository = MongoRepository::new(Arc::new(client), "Travel");

        let result = repository.list_places(Some("Ja"), Some(5)).await;
        assert!(matches!(result, Err(StoreError::Database(_))));
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!(matches!(
            parse_object_id("not-an-id"),
            Err(StoreError::InvalidId(id)) if id == "not-an-id"
        ));
        assert!(parse_object_id("65f0c0ffee0000000000beef").is_ok());
    }
}
