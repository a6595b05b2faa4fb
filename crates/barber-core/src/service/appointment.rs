//! Appointment coordination.
//!
//! Binds clients to slots. Every write keeps the slot's booking flag in step
//! with the appointment: booking, moving, and cancelling each go through a
//! single atomic repository call.

use barber_types::appointment::{Appointment, CreateAppointmentRequest, UpdateAppointmentRequest};
use barber_types::error::{AppointmentError, RepositoryError};
use barber_types::id::{AppointmentId, ClientId, ServiceId, SlotId};
use barber_types::slot::AvailableSlot;
use barber_types::time::format_date_time;
use chrono::NaiveDateTime;
use tracing::{info, warn};

use crate::repository::appointment::AppointmentRepository;
use crate::repository::catalog::ServiceOfferingRepository;
use crate::repository::client::ClientRepository;
use crate::repository::slot::SlotRepository;
use crate::service::clock::Clock;

/// Service orchestrating the appointment lifecycle.
///
/// Generic over every repository it reads from so that the core never
/// depends on a storage backend.
pub struct AppointmentService<A, C, S, T, K>
where
    A: AppointmentRepository,
    C: ClientRepository,
    S: ServiceOfferingRepository,
    T: SlotRepository,
    K: Clock,
{
    appointments: A,
    clients: C,
    services: S,
    slots: T,
    clock: K,
}

impl<A, C, S, T, K> AppointmentService<A, C, S, T, K>
where
    A: AppointmentRepository,
    C: ClientRepository,
    S: ServiceOfferingRepository,
    T: SlotRepository,
    K: Clock,
{
    pub fn new(appointments: A, clients: C, services: S, slots: T, clock: K) -> Self {
        Self {
            appointments,
            clients,
            services,
            slots,
            clock,
        }
    }

    pub async fn list_appointments(&self) -> Result<Vec<Appointment>, AppointmentError> {
        self.appointments.list().await.map_err(storage)
    }

    pub async fn get_appointment(&self, id: &AppointmentId) -> Result<Appointment, AppointmentError> {
        self.appointments
            .get_by_id(id)
            .await
            .map_err(storage)?
            .ok_or(AppointmentError::NotFound)
    }

    /// Book a slot for a client.
    ///
    /// Checks run in order: time not in the past, client, service, slot,
    /// slot free, time equal to the slot start. The slot flip and the insert
    /// then happen atomically; a concurrent booking that wins the race turns
    /// into `SlotAlreadyBooked`.
    pub async fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        self.ensure_not_past(request.date_time)?;
        self.ensure_client(&request.client_id).await?;
        self.ensure_service(&request.service_id).await?;

        let slot = self.resolve_slot(&request.slot_id).await?;
        if slot.is_booked {
            warn!(slot_id = %slot.id, "rejected booking of booked slot");
            return Err(AppointmentError::SlotAlreadyBooked);
        }
        ensure_matches_slot(request.date_time, &slot)?;

        let now = chrono::Utc::now();
        let appointment = Appointment {
            id: AppointmentId::new(),
            client_id: request.client_id,
            service_id: request.service_id,
            slot_id: slot.id,
            date_time: request.date_time,
            created_at: now,
            updated_at: now,
        };

        let appointment = self
            .appointments
            .book(&appointment)
            .await
            .map_err(booking_error)?;

        info!(
            appointment_id = %appointment.id,
            slot_id = %appointment.slot_id,
            date_time = %format_date_time(&appointment.date_time),
            "appointment booked"
        );
        Ok(appointment)
    }

    /// Replace an upcoming appointment.
    ///
    /// A different `slot_id` moves the booking: the old slot is freed and
    /// the new one booked in the same transaction. The new time must match
    /// the target slot's start, as on creation.
    pub async fn update_appointment(
        &self,
        id: &AppointmentId,
        request: UpdateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        let mut appointment = self.get_appointment(id).await?;

        if appointment.date_time < self.clock.now() {
            warn!(appointment_id = %id, "rejected edit of past appointment");
            return Err(AppointmentError::PastAppointment);
        }
        self.ensure_not_past(request.date_time)?;

        let held_slot = appointment.slot_id;
        let moved_from = (request.slot_id != held_slot).then_some(held_slot);
        let slot = self.resolve_slot(&request.slot_id).await?;
        if moved_from.is_some() && slot.is_booked {
            warn!(appointment_id = %id, slot_id = %slot.id, "rejected move to booked slot");
            return Err(AppointmentError::SlotAlreadyBooked);
        }

        self.ensure_client(&request.client_id).await?;
        self.ensure_service(&request.service_id).await?;
        ensure_matches_slot(request.date_time, &slot)?;

        appointment.client_id = request.client_id;
        appointment.service_id = request.service_id;
        appointment.slot_id = request.slot_id;
        appointment.date_time = request.date_time;
        appointment.updated_at = chrono::Utc::now();

        let appointment = match self
            .appointments
            .update(&appointment, moved_from.as_ref())
            .await
        {
            Ok(appointment) => appointment,
            Err(RepositoryError::NotFound) if moved_from.is_none() => {
                return Err(AppointmentError::NotFound);
            }
            Err(RepositoryError::Conflict(_)) => {
                return Err(self.update_conflict(id, &held_slot).await);
            }
            Err(other) => return Err(booking_error(other)),
        };

        if let Some(old) = moved_from {
            info!(appointment_id = %id, from = %old, to = %appointment.slot_id, "appointment moved");
        } else {
            info!(appointment_id = %id, "appointment updated");
        }
        Ok(appointment)
    }

    /// Cancel an appointment and free its slot.
    pub async fn delete_appointment(&self, id: &AppointmentId) -> Result<(), AppointmentError> {
        let freed = self.appointments.cancel(id).await.map_err(|e| match e {
            RepositoryError::NotFound => AppointmentError::NotFound,
            other => storage(other),
        })?;

        info!(appointment_id = %id, slot_id = %freed, "appointment cancelled");
        Ok(())
    }

    /// Tell a lost race on the target slot from a row changed since it was read.
    async fn update_conflict(&self, id: &AppointmentId, held_slot: &SlotId) -> AppointmentError {
        match self.appointments.get_by_id(id).await {
            Ok(Some(current)) if current.slot_id != *held_slot => {
                warn!(appointment_id = %id, "rejected update of concurrently changed appointment");
                AppointmentError::ConcurrentChange
            }
            Ok(Some(_)) => AppointmentError::SlotAlreadyBooked,
            Ok(None) => AppointmentError::NotFound,
            Err(e) => storage(e),
        }
    }

    fn ensure_not_past(&self, date_time: NaiveDateTime) -> Result<(), AppointmentError> {
        if date_time < self.clock.now() {
            return Err(AppointmentError::Validation(format!(
                "appointment time {} is in the past",
                format_date_time(&date_time)
            )));
        }
        Ok(())
    }

    async fn ensure_client(&self, id: &ClientId) -> Result<(), AppointmentError> {
        self.clients
            .get_by_id(id)
            .await
            .map_err(storage)?
            .map(|_| ())
            .ok_or(AppointmentError::ClientNotFound)
    }

    async fn ensure_service(&self, id: &ServiceId) -> Result<(), AppointmentError> {
        self.services
            .get_by_id(id)
            .await
            .map_err(storage)?
            .map(|_| ())
            .ok_or(AppointmentError::ServiceNotFound)
    }

    async fn resolve_slot(&self, id: &SlotId) -> Result<AvailableSlot, AppointmentError> {
        self.slots
            .get_by_id(id)
            .await
            .map_err(storage)?
            .ok_or(AppointmentError::SlotNotFound)
    }
}

fn ensure_matches_slot(
    date_time: NaiveDateTime,
    slot: &AvailableSlot,
) -> Result<(), AppointmentError> {
    let starts_at = slot.starts_at();
    if date_time != starts_at {
        warn!(slot_id = %slot.id, "rejected appointment time not matching slot start");
        return Err(AppointmentError::TimeMismatch {
            requested: format_date_time(&date_time),
            slot_start: format_date_time(&starts_at),
        });
    }
    Ok(())
}

/// Map errors from the booking writes, where `NotFound` means the slot
/// vanished and `Conflict` means it was booked first.
fn booking_error(e: RepositoryError) -> AppointmentError {
    match e {
        RepositoryError::NotFound => AppointmentError::SlotNotFound,
        RepositoryError::Conflict(_) => AppointmentError::SlotAlreadyBooked,
        other => storage(other),
    }
}

fn storage(e: RepositoryError) -> AppointmentError {
    AppointmentError::StorageError(e.to_string())
}
