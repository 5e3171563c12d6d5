use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::PlannerError;

pub const MIN_DAYS: u32 = 1;
pub const MAX_DAYS: u32 = 14;

/// User-supplied parameters for one itinerary. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    destination: String,
    start_date: NaiveDate,
    duration_days: u32,
    preferences: Vec<String>,
}

impl TripRequest {
    /// Only the duration is checked; an empty destination is passed through.
    pub fn new(
        destination: impl Into<String>,
        start_date: NaiveDate,
        duration_days: u32,
        preferences: Vec<String>,
    ) -> Result<Self, PlannerError> {
        if !(MIN_DAYS..=MAX_DAYS).contains(&duration_days) {
            return Err(PlannerError::InvalidRequest(format!(
                "duration must be between {MIN_DAYS} and {MAX_DAYS} days, got {duration_days}"
            )));
        }
        Ok(Self {
            destination: destination.into(),
            start_date,
            duration_days,
            preferences,
        })
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn duration_days(&self) -> u32 {
        self.duration_days
    }

    pub fn preferences(&self) -> &[String] {
        &self.preferences
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn accepts_bounds() {
        assert!(TripRequest::new("Kyoto", date(), MIN_DAYS, vec![]).is_ok());
        assert!(TripRequest::new("Kyoto", date(), MAX_DAYS, vec![]).is_ok());
    }

    #[test]
    fn rejects_out_of_range_duration() {
        let err = TripRequest::new("Kyoto", date(), 0, vec![]).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidRequest(_)));
        assert!(TripRequest::new("Kyoto", date(), MAX_DAYS + 1, vec![]).is_err());
    }

    #[test]
    fn keeps_preference_order_and_duplicates() {
        let prefs = vec!["food".to_string(), "art".to_string(), "food".to_string()];
        let req = TripRequest::new("", date(), 2, prefs.clone()).unwrap();
        assert_eq!(req.preferences(), prefs.as_slice());
        assert_eq!(req.destination(), "");
    }
}
