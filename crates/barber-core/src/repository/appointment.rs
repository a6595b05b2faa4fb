//! Appointment repository trait definition.
//!
//! Every write here touches both the appointment and its slot, and must be
//! atomic: either the slot flag and the appointment row change together or
//! neither does.

use barber_types::appointment::Appointment;
use barber_types::error::RepositoryError;
use barber_types::id::{AppointmentId, SlotId};

pub trait AppointmentRepository: Send + Sync {
    fn get_by_id(
        &self,
        id: &AppointmentId,
    ) -> impl std::future::Future<Output = Result<Option<Appointment>, RepositoryError>> + Send;

    /// All appointments ordered by date-time.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Appointment>, RepositoryError>> + Send;

    /// Book `appointment.slot_id` and insert the appointment.
    ///
    /// The slot is flipped only if it is still unbooked; otherwise nothing is
    /// written and `RepositoryError::Conflict` is returned. A missing slot is
    /// `RepositoryError::NotFound`.
    fn book(
        &self,
        appointment: &Appointment,
    ) -> impl std::future::Future<Output = Result<Appointment, RepositoryError>> + Send;

    /// Persist an updated appointment.
    ///
    /// When `moved_from` is set the booking moves: that slot is freed and
    /// `appointment.slot_id` is booked under the same rules as [`book`].
    /// The stored row must still hold `moved_from` (or `appointment.slot_id`
    /// when not moving); if another write changed it first, nothing is
    /// written and `RepositoryError::Conflict` is returned.
    ///
    /// [`book`]: AppointmentRepository::book
    fn update(
        &self,
        appointment: &Appointment,
        moved_from: Option<&SlotId>,
    ) -> impl std::future::Future<Output = Result<Appointment, RepositoryError>> + Send;

    /// Delete the appointment and free the slot its stored row holds.
    ///
    /// Returns the freed slot.
    fn cancel(
        &self,
        id: &AppointmentId,
    ) -> impl std::future::Future<Output = Result<SlotId, RepositoryError>> + Send;
}
