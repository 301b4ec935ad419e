use chrono::{DateTime, Utc};

use crate::errors::ServiceError;
use crate::games::Game;
use crate::pricing::options::{self, RoomType, SeatLevel, TransportClass};

/// A reservation request as it arrives from the booking form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBookingInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// the id or "home vs away" label of the game
    #[serde(default)]
    pub game: Option<String>,
    #[serde(default, deserialize_with = "options::lenient_key")]
    pub room_type: Option<RoomType>,
    #[serde(default, deserialize_with = "options::lenient_key")]
    pub transport_class: Option<TransportClass>,
    #[serde(default, deserialize_with = "options::lenient_key")]
    pub seat_level: Option<SeatLevel>,
    #[serde(
        default = "options::single_guest",
        deserialize_with = "options::lenient_guests"
    )]
    pub guests: u32,
    #[serde(default)]
    pub message: Option<String>,
}

/// A request that passed validation, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedBooking {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub game: String,
    pub room_type: Option<RoomType>,
    pub transport_class: Option<TransportClass>,
    pub seat_level: Option<SeatLevel>,
    pub guests: u32,
    pub message: String,
}

/// Booking requests are non-binding, the agency follows up with an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub game: String,
    #[serde(
        serialize_with = "options::key_or_blank",
        deserialize_with = "options::lenient_key"
    )]
    pub room_type: Option<RoomType>,
    #[serde(
        serialize_with = "options::key_or_blank",
        deserialize_with = "options::lenient_key"
    )]
    pub transport_class: Option<TransportClass>,
    #[serde(
        serialize_with = "options::key_or_blank",
        deserialize_with = "options::lenient_key"
    )]
    pub seat_level: Option<SeatLevel>,
    pub guests: u32,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub status: BookingStatus,
}

fn required(
    value: Option<String>,
    field: &'static str,
    missing: &mut Vec<&'static str>,
) -> String {
    match value {
        Some(value) if !value.is_empty() => value,
        _ => {
            missing.push(field);
            String::new()
        }
    }
}

impl RawBookingInput {
    /// Checks that name, email and game are filled in, everything else is optional.
    ///
    /// Values are kept exactly as they were sent. The game doesn't have to be
    /// in the catalog, an unknown one is only logged.
    pub fn validate(self, catalog: &[Game]) -> Result<ValidatedBooking, ServiceError> {
        let mut missing = Vec::new();

        let name = required(self.name, "name", &mut missing);
        let email = required(self.email, "email", &mut missing);
        let game = required(self.game, "game", &mut missing);

        if !missing.is_empty() {
            debug!("rejected booking, missing {:?}", missing);
            return Err(ServiceError::MissingFields(missing));
        }

        if !catalog.iter().any(|known| known.is_referenced_by(&game)) {
            warn!("booking refers to a game that is not in the catalog: {}", game);
        }

        Ok(ValidatedBooking {
            name,
            email,
            phone: self.phone.unwrap_or_default(),
            game,
            room_type: self.room_type,
            transport_class: self.transport_class,
            seat_level: self.seat_level,
            guests: self.guests.max(1),
            message: self.message.unwrap_or_default(),
        })
    }
}

impl ValidatedBooking {
    pub fn into_request(self, id: String, timestamp: DateTime<Utc>) -> BookingRequest {
        BookingRequest {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            game: self.game,
            room_type: self.room_type,
            transport_class: self.transport_class,
            seat_level: self.seat_level,
            guests: self.guests,
            message: self.message,
            timestamp,
            status: BookingStatus::Pending,
        }
    }
}
