use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::{option_fields::OptionField, validation::validate_not_blank};

/// Calendar times travel as `HH:MM`; seconds are accepted on input and dropped.
pub mod hh_mm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn parse(raw: &str) -> Result<NaiveTime, String> {
        let raw = raw.trim();
        NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .map_err(|_| format!("invalid time '{raw}', expected HH:MM"))
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub event_time: NaiveTime,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewEventRequest {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: String,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    pub event_date: NaiveDate,

    #[serde(with = "hh_mm")]
    pub event_time: NaiveTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventInsert {
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub created_by: Uuid,
}

impl NewEventRequest {
    pub fn prepare_for_insert(self, created_by: Uuid) -> EventInsert {
        EventInsert {
            title: self.title.trim().to_string(),
            description: self.description.map(|d| d.trim().to_string()).filter(|d| !d.is_empty()),
            event_date: self.event_date,
            event_time: self.event_time,
            created_by,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: Option<String>,

    pub description: OptionField<String>,

    pub event_date: Option<NaiveDate>,

    #[serde(deserialize_with = "deserialize_optional_time")]
    pub event_time: Option<NaiveTime>,
}

fn deserialize_optional_time<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveTime>, D::Error> {
    Option::<String>::deserialize(deserializer)?
        .map(|raw| hh_mm::parse(&raw).map_err(serde::de::Error::custom))
        .transpose()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventChanges {
    pub title: Option<String>,
    pub description: OptionField<String>,
    pub event_date: Option<NaiveDate>,
    pub event_time: Option<NaiveTime>,
}

impl From<UpdateEventRequest> for EventChanges {
    fn from(request: UpdateEventRequest) -> Self {
        EventChanges {
            title: request.title.map(|t| t.trim().to_string()),
            description: request.description.map_value(|d| d.trim().to_string()),
            event_date: request.event_date,
            event_time: request.event_time,
        }
    }
}

impl EventChanges {
    pub fn apply_to(self, event: &mut Event) {
        if let Some(v) = self.title { event.title = v; }
        self.description.apply_to(&mut event.description);
        if let Some(v) = self.event_date { event.event_date = v; }
        if let Some(v) = self.event_time { event.event_time = v; }
    }
}
