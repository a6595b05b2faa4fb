use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{ServiceId, SlotId};

/// A bookable time window for one service on one date.
///
/// `start_time < end_time` always holds for persisted slots. Once booked, a
/// slot is frozen: only the booking flag may change, and only through the
/// appointment flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableSlot {
    pub id: SlotId,
    pub service_id: ServiceId,
    pub date: NaiveDate,
    #[serde(with = "crate::time::hms")]
    pub start_time: NaiveTime,
    #[serde(with = "crate::time::hms")]
    pub end_time: NaiveTime,
    pub is_booked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AvailableSlot {
    /// The instant an appointment in this slot must start at.
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }
}

/// Request to open a new slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSlotRequest {
    pub service_id: ServiceId,
    pub date: NaiveDate,
    #[serde(with = "crate::time::hms")]
    pub start_time: NaiveTime,
    #[serde(with = "crate::time::hms")]
    pub end_time: NaiveTime,
}

/// Full replacement of an unbooked slot, booking flag included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSlotRequest {
    pub service_id: ServiceId,
    pub date: NaiveDate,
    #[serde(with = "crate::time::hms")]
    pub start_time: NaiveTime,
    #[serde(with = "crate::time::hms")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub is_booked: bool,
}

/// Reject windows that are empty or run backwards.
pub fn validate_window(start: NaiveTime, end: NaiveTime) -> Result<(), String> {
    if start >= end {
        return Err("start time must be before end time".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(s: &str) -> NaiveTime {
        crate::time::parse_time(s).unwrap()
    }

    #[test]
    fn test_validate_window() {
        assert!(validate_window(time("09:00"), time("10:00")).is_ok());
        assert!(validate_window(time("10:00"), time("10:00")).is_err());
        assert!(validate_window(time("11:00"), time("10:00")).is_err());
    }

    #[test]
    fn test_starts_at() {
        let slot = AvailableSlot {
            id: SlotId::new(),
            service_id: ServiceId::new(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            start_time: time("09:00"),
            end_time: time("10:00"),
            is_booked: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(
            crate::time::format_date_time(&slot.starts_at()),
            "2025-06-01T09:00:00"
        );
    }

    #[test]
    fn test_create_request_accepts_short_times() {
        let json = format!(
            r#"{{"service_id": "{}", "date": "2025-06-01", "start_time": "09:00", "end_time": "10:30"}}"#,
            ServiceId::new()
        );
        let req: CreateSlotRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(req.start_time, time("09:00:00"));
        assert_eq!(req.end_time, time("10:30:00"));
    }

    #[test]
    fn test_update_request_booked_defaults_false() {
        let json = format!(
            r#"{{"service_id": "{}", "date": "2025-06-01", "start_time": "09:00", "end_time": "10:00"}}"#,
            ServiceId::new()
        );
        let req: UpdateSlotRequest = serde_json::from_str(&json).unwrap();
        assert!(!req.is_booked);
    }
}
