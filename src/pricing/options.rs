//! The package options a customer picks from, and the lenient parsing
//! applied to what a booking form sends for them.

use std::convert::TryFrom;

use serde::de::{Deserialize, Deserializer};
use serde::Serializer;
use serde_json::Value;

/// An option with a fixed set of lowercase keys, like `"single"` or `"vip"`.
pub trait OptionKey: Sized {
    fn from_key(key: &str) -> Option<Self>;
    fn key(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomType {
    Single,
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportClass {
    Economy,
    First,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatLevel {
    Standard,
    Premium,
    Vip,
}

impl OptionKey for RoomType {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "single" => Some(RoomType::Single),
            "double" => Some(RoomType::Double),
            _ => None,
        }
    }

    fn key(&self) -> &'static str {
        match self {
            RoomType::Single => "single",
            RoomType::Double => "double",
        }
    }
}

impl OptionKey for TransportClass {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "economy" => Some(TransportClass::Economy),
            "first" => Some(TransportClass::First),
            _ => None,
        }
    }

    fn key(&self) -> &'static str {
        match self {
            TransportClass::Economy => "economy",
            TransportClass::First => "first",
        }
    }
}

impl OptionKey for SeatLevel {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "standard" => Some(SeatLevel::Standard),
            "premium" => Some(SeatLevel::Premium),
            "vip" => Some(SeatLevel::Vip),
            _ => None,
        }
    }

    fn key(&self) -> &'static str {
        match self {
            SeatLevel::Standard => "standard",
            SeatLevel::Premium => "premium",
            SeatLevel::Vip => "vip",
        }
    }
}

/// Unknown keys, blanks and non-strings all mean "not selected".
pub fn lenient_key<'de, D, K>(deserializer: D) -> Result<Option<K>, D::Error>
where
    D: Deserializer<'de>,
    K: OptionKey,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(K::from_key))
}

/// "Not selected" is written as an empty string.
pub fn key_or_blank<S, K>(key: &Option<K>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    K: OptionKey,
{
    serializer.serialize_str(key.as_ref().map_or("", OptionKey::key))
}

pub fn lenient_guests<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(guest_count(&value))
}

pub fn single_guest() -> u32 {
    1
}

/// Anything that isn't a positive count, in a number or a numeric string,
/// counts as a single guest. Counts past `u32::MAX` are capped there.
pub fn guest_count(value: &Value) -> u32 {
    let guests = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    guests
        .filter(|guests| *guests >= 1)
        .map(|guests| u32::try_from(guests).unwrap_or(u32::MAX))
        .unwrap_or(1)
}
