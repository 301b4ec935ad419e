use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::bookings::models::{BookingRequest, ValidatedBooking};
use crate::errors::ServiceError;
use crate::storage::Storage;

const SNAPSHOT: &str = "bookings";

/// Append-only log of the booking requests, oldest first.
#[derive(Debug, Clone)]
pub struct BookingStore {
    bookings: Arc<RwLock<Vec<BookingRequest>>>,
    storage: Storage,
}

impl BookingStore {
    pub fn load(storage: Storage) -> Result<Self, ServiceError> {
        let bookings = storage
            .load::<Vec<BookingRequest>>(SNAPSHOT)?
            .unwrap_or_default();

        info!("{} booking requests on record", bookings.len());

        Ok(BookingStore {
            bookings: Arc::new(RwLock::new(bookings)),
            storage,
        })
    }

    /// Records a booking, assigning its id and timestamp.
    ///
    /// Either the booking is stored with its id, or it is not recorded at all.
    #[tracing::instrument(skip(self, booking), fields(game = %booking.game))]
    pub async fn submit(&self, booking: ValidatedBooking) -> Result<BookingRequest, ServiceError> {
        let mut bookings = self.bookings.write().await;

        let id = (bookings.len() + 1).to_string();
        let now = Utc::now();
        // the clock may step back, the log still has to stay in order
        let timestamp = bookings
            .last()
            .map_or(now, |last| last.timestamp.max(now));

        let request = booking.into_request(id, timestamp);
        bookings.push(request.clone());

        if let Err(e) = self.storage.save(SNAPSHOT, &*bookings).await {
            bookings.pop();
            return Err(e);
        }

        info!(
            "booking request {} received from {} for {}",
            request.id, request.email, request.game
        );
        Ok(request)
    }

    pub async fn list(&self) -> Vec<BookingRequest> {
        self.bookings.read().await.clone()
    }
}
