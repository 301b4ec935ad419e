use chrono::{NaiveDate, NaiveTime};
use validator::Validate;

/// how many seats are roughly left, only used for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub home_team: String,
    pub away_team: String,
    pub date: NaiveDate,
    #[serde(with = "clock")]
    pub time: NaiveTime,
    pub venue: String,
    pub city: String,
    /// free text shown to customers, e.g. "From CHF 450"
    pub estimated_price: String,
    pub availability: Availability,
}

/// A game as the admin submits it, the id is assigned by the catalog when absent.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGame {
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(min = 1))]
    pub home_team: String,
    #[validate(length(min = 1))]
    pub away_team: String,
    pub date: NaiveDate,
    #[serde(with = "clock")]
    pub time: NaiveTime,
    #[validate(length(min = 1))]
    pub venue: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[serde(default)]
    pub estimated_price: String,
    pub availability: Availability,
}

/// The fields of a game to overwrite, the id can't be changed.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GamePatch {
    #[validate(length(min = 1))]
    pub home_team: Option<String>,
    #[validate(length(min = 1))]
    pub away_team: Option<String>,
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "clock::deserialize_option")]
    pub time: Option<NaiveTime>,
    #[validate(length(min = 1))]
    pub venue: Option<String>,
    #[validate(length(min = 1))]
    pub city: Option<String>,
    pub estimated_price: Option<String>,
    pub availability: Option<Availability>,
}

impl Game {
    /// "EA7 Emporio Armani Milan vs Real Madrid"
    pub fn label(&self) -> String {
        format!("{} vs {}", self.home_team, self.away_team)
    }

    /// a booking refers to a game either by its id or by its label
    pub fn is_referenced_by(&self, reference: &str) -> bool {
        self.id == reference || self.label() == reference
    }

    pub fn apply(&mut self, patch: GamePatch) {
        if let Some(home_team) = patch.home_team {
            self.home_team = home_team;
        }
        if let Some(away_team) = patch.away_team {
            self.away_team = away_team;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(time) = patch.time {
            self.time = time;
        }
        if let Some(venue) = patch.venue {
            self.venue = venue;
        }
        if let Some(city) = patch.city {
            self.city = city;
        }
        if let Some(estimated_price) = patch.estimated_price {
            self.estimated_price = estimated_price;
        }
        if let Some(availability) = patch.availability {
            self.availability = availability;
        }
    }
}

impl CreateGame {
    pub fn into_game(self, id: String) -> Game {
        Game {
            id,
            home_team: self.home_team,
            away_team: self.away_team,
            date: self.date,
            time: self.time,
            venue: self.venue,
            city: self.city,
            estimated_price: self.estimated_price,
            availability: self.availability,
        }
    }
}

/// The fixtures the catalog starts out with.
pub fn fixtures() -> Vec<Game> {
    let fixture = |id: &str,
                   home_team: &str,
                   away_team: &str,
                   (year, month, day): (i32, u32, u32),
                   (hour, minute): (u32, u32),
                   price: &str,
                   availability: Availability| {
        let (venue, city) = if home_team.ends_with("Milan") {
            ("Unipol Forum", "Milan")
        } else {
            ("SAP Garden", "Munich")
        };

        Game {
            id: id.to_string(),
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            date: NaiveDate::from_ymd_opt(year, month, day).expect("fixture dates are valid"),
            time: NaiveTime::from_hms_opt(hour, minute, 0).expect("fixture times are valid"),
            venue: venue.to_string(),
            city: city.to_string(),
            estimated_price: format!("From CHF {}", price),
            availability,
        }
    };

    const MILAN: &str = "EA7 Emporio Armani Milan";
    const MUNICH: &str = "FC Bayern Munich";

    vec![
        fixture("1", MILAN, "Real Madrid", (2025, 12, 15), (20, 30), "450", Availability::High),
        fixture("2", MUNICH, "Panathinaikos", (2025, 12, 18), (20, 0), "420", Availability::High),
        fixture("3", MILAN, "Fenerbahce", (2026, 1, 10), (20, 45), "480", Availability::Medium),
        fixture("4", MUNICH, "Olympiacos", (2026, 1, 22), (19, 0), "440", Availability::Medium),
        fixture("5", MILAN, "Barcelona", (2026, 2, 5), (20, 30), "520", Availability::Low),
        fixture("6", MUNICH, "Maccabi Tel Aviv", (2026, 2, 12), (20, 0), "410", Availability::High),
    ]
}

/// Kick-off times are written as `HH:MM`, seconds are accepted when reading.
mod clock {
    use chrono::NaiveTime;
    use serde::de::{self, Deserialize, Deserializer};
    use serde::Serializer;

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(de::Error::custom)
    }

    pub fn deserialize_option<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse(&raw).map(Some).map_err(de::Error::custom),
            None => Ok(None),
        }
    }

    fn parse(raw: &str) -> Result<NaiveTime, String> {
        NaiveTime::parse_from_str(raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .map_err(|e| format!("invalid time {:?}, expected HH:MM: {}", raw, e))
    }
}
