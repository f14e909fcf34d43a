use schemars::JsonSchema;
use serde::Deserialize;
use voyage_narrative::TripDetails;
use voyage_sequencer::json::JsonSequencingProblem;

pub const REQUIRED_FIELDS_MESSAGE: &str =
    "All fields are required: destination, noofdays, preferences, season, budget";

/// A form field sent either as text or as a number.
#[derive(Deserialize, JsonSchema, Debug, Clone)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Flag(bool),
}

impl FieldValue {
    /// Empty text, zero and `false` count as not filled in.
    fn filled(&self) -> Option<String> {
        match self {
            FieldValue::Text(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
            FieldValue::Number(number) if *number != 0.0 && number.is_finite() => {
                Some(number.to_string())
            }
            FieldValue::Flag(true) => Some(String::from("true")),
            _ => None,
        }
    }
}

#[derive(Deserialize, JsonSchema, Debug, Default)]
pub struct ItineraryRequest {
    pub destination: Option<FieldValue>,
    /// Trip length in days
    pub noofdays: Option<FieldValue>,
    pub preferences: Option<FieldValue>,
    pub season: Option<FieldValue>,
    pub budget: Option<FieldValue>,

    /// Stops to order instead of the server's configured ones
    pub stops: Option<JsonSequencingProblem>,
}

impl ItineraryRequest {
    /// `None` when any of the five trip fields is missing.
    pub fn trip_details(&self) -> Option<TripDetails> {
        let filled = |field: &Option<FieldValue>| field.as_ref().and_then(FieldValue::filled);

        Some(TripDetails {
            destination: filled(&self.destination)?,
            days: filled(&self.noofdays)?,
            preferences: filled(&self.preferences)?,
            season: filled(&self.season)?,
            budget: filled(&self.budget)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ItineraryRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_all_fields_present() {
        let request = parse(
            r#"{"destination": "Rome", "noofdays": 4, "preferences": "food", "season": "winter", "budget": "2000"}"#,
        );

        assert_eq!(
            request.trip_details(),
            Some(TripDetails {
                destination: String::from("Rome"),
                days: String::from("4"),
                preferences: String::from("food"),
                season: String::from("winter"),
                budget: String::from("2000"),
            })
        );
    }

    #[test]
    fn test_numbers_and_strings_are_accepted() {
        let request = parse(
            r#"{"destination": "Rome", "noofdays": "4", "preferences": "food", "season": "winter", "budget": 1500.5}"#,
        );

        let trip = request.trip_details().unwrap();
        assert_eq!(trip.days, "4");
        assert_eq!(trip.budget, "1500.5");
    }

    #[test]
    fn test_missing_or_empty_fields() {
        for json in [
            r#"{"noofdays": 4, "preferences": "food", "season": "winter", "budget": "2000"}"#,
            r#"{"destination": "", "noofdays": 4, "preferences": "food", "season": "winter", "budget": "2000"}"#,
            r#"{"destination": "Rome", "noofdays": 0, "preferences": "food", "season": "winter", "budget": "2000"}"#,
            r#"{"destination": "Rome", "noofdays": 4, "preferences": null, "season": "winter", "budget": "2000"}"#,
            r#"{"destination": "Rome", "noofdays": 4, "preferences": "food", "season": "  ", "budget": "2000"}"#,
            r#"{"destination": "Rome", "noofdays": 4, "preferences": "food", "season": "winter", "budget": false}"#,
            r#"{}"#,
        ] {
            assert!(parse(json).trip_details().is_none(), "{json} should be rejected");
        }
    }
}
