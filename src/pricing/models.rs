use serde_json::Value;

use crate::errors::ServiceError;
use crate::pricing::options::{self, RoomType, SeatLevel, TransportClass};

/// whole CHF
pub type Money = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomPrices {
    pub single: Money,
    pub double: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportPrices {
    pub economy: Money,
    pub first: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketPrices {
    pub standard: Money,
    pub premium: Money,
    pub vip: Money,
}

/// The price per guest of every package option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTable {
    pub room: RoomPrices,
    pub transport: TransportPrices,
    pub ticket: TicketPrices,
}

impl Default for PricingTable {
    fn default() -> Self {
        PricingTable {
            room: RoomPrices {
                single: 150,
                double: 100,
            },
            transport: TransportPrices {
                economy: 80,
                first: 150,
            },
            ticket: TicketPrices {
                standard: 120,
                premium: 200,
                vip: 350,
            },
        }
    }
}

impl PricingTable {
    pub fn room(&self, room: RoomType) -> Money {
        match room {
            RoomType::Single => self.room.single,
            RoomType::Double => self.room.double,
        }
    }

    pub fn transport(&self, transport: TransportClass) -> Money {
        match transport {
            TransportClass::Economy => self.transport.economy,
            TransportClass::First => self.transport.first,
        }
    }

    pub fn ticket(&self, seat: SeatLevel) -> Money {
        match seat {
            SeatLevel::Standard => self.ticket.standard,
            SeatLevel::Premium => self.ticket.premium,
            SeatLevel::Vip => self.ticket.vip,
        }
    }

    /// Parses a complete pricing table out of an admin update.
    ///
    /// Every one of the six prices has to be present as a non-negative integer,
    /// the error names all the ones that aren't.
    pub fn from_json(value: &Value) -> Result<PricingTable, ServiceError> {
        let mut invalid: Vec<String> = Vec::new();

        let mut price = |category: &str, key: &str| -> Money {
            match value
                .get(category)
                .and_then(|prices| prices.get(key))
                .and_then(Value::as_u64)
            {
                Some(price) => price,
                None => {
                    invalid.push(format!("{}.{}", category, key));
                    0
                }
            }
        };

        let table = PricingTable {
            room: RoomPrices {
                single: price("room", "single"),
                double: price("room", "double"),
            },
            transport: TransportPrices {
                economy: price("transport", "economy"),
                first: price("transport", "first"),
            },
            ticket: TicketPrices {
                standard: price("ticket", "standard"),
                premium: price("ticket", "premium"),
                vip: price("ticket", "vip"),
            },
        };

        if !invalid.is_empty() {
            return Err(ServiceError::InvalidPricing(format!(
                "{} must be non-negative integers",
                invalid.join(", ")
            )));
        }

        Ok(table)
    }
}

/// What a customer picked in the booking form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceEstimate {
    pub room: Money,
    pub transport: Money,
    pub ticket: Money,
    pub total: Money,
    /// the guest count the total was computed for
    pub guests: u32,
}

impl PriceEstimate {
    pub fn per_guest(&self) -> Money {
        self.total / Money::from(self.guests.max(1))
    }
}

/// Price a selection against the current table.
///
/// Options that weren't picked cost nothing and a guest count below one is
/// treated as a single guest, so every selection yields an estimate.
pub fn estimate(selection: &Selection, table: &PricingTable) -> PriceEstimate {
    let room = selection.room_type.map_or(0, |room| table.room(room));
    let transport = selection
        .transport_class
        .map_or(0, |transport| table.transport(transport));
    let ticket = selection.seat_level.map_or(0, |seat| table.ticket(seat));
    let guests = selection.guests.max(1);

    let total = room
        .saturating_add(transport)
        .saturating_add(ticket)
        .saturating_mul(Money::from(guests));

    PriceEstimate {
        room,
        transport,
        ticket,
        total,
        guests,
    }
}
