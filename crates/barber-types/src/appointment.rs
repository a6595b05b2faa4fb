use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{AppointmentId, ClientId, ServiceId, SlotId};

/// A client's booking of one slot for one service.
///
/// `date_time` equals the bound slot's date plus start time. The slot is
/// booked for as long as the appointment exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub client_id: ClientId,
    pub service_id: ServiceId,
    pub slot_id: SlotId,
    #[serde(with = "crate::time::date_time")]
    pub date_time: NaiveDateTime,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to book a slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub client_id: ClientId,
    pub service_id: ServiceId,
    pub slot_id: SlotId,
    #[serde(with = "crate::time::date_time")]
    pub date_time: NaiveDateTime,
}

/// Full replacement of an appointment's references and time.
///
/// A different `slot_id` moves the booking: the old slot is freed and the
/// new one booked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub client_id: ClientId,
    pub service_id: ServiceId,
    pub slot_id: SlotId,
    #[serde(with = "crate::time::date_time")]
    pub date_time: NaiveDateTime,
}
