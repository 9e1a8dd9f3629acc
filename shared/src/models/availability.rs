//! Availability query and response

use super::{MealSuggestion, TableRecommendation, Zone};
use crate::error::{ModelError, ModelResult};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Default party size when none is given
pub const DEFAULT_PARTY_SIZE: i32 = 2;

/// Query parameters for `GET /api/availability`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    #[serde(with = "iso_seconds")]
    pub date_time: NaiveDateTime,
    pub party_size: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<Zone>,
    #[serde(default)]
    pub privacy: bool,
    #[serde(default)]
    pub window: bool,
    #[serde(default)]
    pub accessibility: bool,
    #[serde(default)]
    pub kids_area: bool,
}

impl AvailabilityQuery {
    /// Query for the given time with default party size and no preferences
    pub fn at(date_time: NaiveDateTime) -> Self {
        Self {
            date_time,
            party_size: DEFAULT_PARTY_SIZE,
            zone: None,
            privacy: false,
            window: false,
            accessibility: false,
            kids_area: false,
        }
    }

    pub fn with_party_size(mut self, party_size: i32) -> Self {
        self.party_size = party_size;
        self
    }

    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zone = Some(zone);
        self
    }

    pub fn validate(&self) -> ModelResult<()> {
        if self.party_size < 1 {
            return Err(ModelError::InvalidPartySize(self.party_size));
        }
        Ok(())
    }
}

/// Response body of `GET /api/availability`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub tables: Vec<TableRecommendation>,
    #[serde(default)]
    pub algorithm_info: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_suggestion: Option<MealSuggestion>,
}

/// `YYYY-MM-DDTHH:MM:SS`, no fraction and no offset
mod iso_seconds {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let trimmed = raw.get(..19).unwrap_or(&raw);
        NaiveDateTime::parse_from_str(trimmed, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn evening() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_milli_opt(19, 30, 0, 250)
            .unwrap()
    }

    #[test]
    fn test_query_serializes_whole_seconds() {
        let query = AvailabilityQuery::at(evening()).with_zone(Zone::Terrace);
        let json = serde_json::to_value(&query).unwrap();

        assert_eq!(json["dateTime"], "2025-03-14T19:30:00");
        assert_eq!(json["partySize"], 2);
        assert_eq!(json["zone"], "TERRACE");
        assert_eq!(json["kidsArea"], false);
    }

    #[test]
    fn test_query_without_zone_omits_it() {
        let json = serde_json::to_value(AvailabilityQuery::at(evening())).unwrap();
        assert!(json.get("zone").is_none());
    }

    #[test]
    fn test_party_size_must_be_positive() {
        let query = AvailabilityQuery::at(evening()).with_party_size(0);
        assert_eq!(query.validate(), Err(ModelError::InvalidPartySize(0)));
        assert!(AvailabilityQuery::at(evening()).validate().is_ok());
    }

    #[test]
    fn test_response_ignores_request_echo() {
        let json = r#"{
            "request": {"dateTime": "2025-03-14T19:30:00", "partySize": 2},
            "tables": [],
            "algorithmInfo": "Skoor = sobivus",
            "mealSuggestion": {
                "name": "Koka üllatusroog", "category": "Majasoovitus",
                "thumbnail": "", "sourceUrl": "https://www.themealdb.com", "fallback": true
            }
        }"#;
        let response: AvailabilityResponse = serde_json::from_str(json).unwrap();

        assert!(response.tables.is_empty());
        assert_eq!(response.algorithm_info, "Skoor = sobivus");
        assert!(response.meal_suggestion.unwrap().fallback);
    }
}
