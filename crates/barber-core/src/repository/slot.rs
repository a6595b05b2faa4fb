//! Available slot repository trait definition.

use barber_types::error::RepositoryError;
use barber_types::id::SlotId;
use barber_types::slot::AvailableSlot;
use chrono::{NaiveDate, NaiveTime};

/// Filter criteria for listing slots.
#[derive(Debug, Clone, Default)]
pub struct SlotFilter {
    /// Only slots on this date.
    pub date: Option<NaiveDate>,
    /// Only slots with this booking state.
    pub is_booked: Option<bool>,
}

/// Repository trait for available slot persistence.
///
/// Booking and freeing slots on behalf of appointments goes through
/// `AppointmentRepository`, which does it in the same transaction as the
/// appointment write.
pub trait SlotRepository: Send + Sync {
    fn create(
        &self,
        slot: &AvailableSlot,
    ) -> impl std::future::Future<Output = Result<AvailableSlot, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: &SlotId,
    ) -> impl std::future::Future<Output = Result<Option<AvailableSlot>, RepositoryError>> + Send;

    /// Slots matching the filter, ordered by date then start time.
    fn list(
        &self,
        filter: SlotFilter,
    ) -> impl std::future::Future<Output = Result<Vec<AvailableSlot>, RepositoryError>> + Send;

    /// An unbooked slot with exactly this date and window, if any.
    fn find_unbooked(
        &self,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> impl std::future::Future<Output = Result<Option<AvailableSlot>, RepositoryError>> + Send;

    fn update(
        &self,
        slot: &AvailableSlot,
    ) -> impl std::future::Future<Output = Result<AvailableSlot, RepositoryError>> + Send;

    /// Delete an unbooked slot. A booked slot yields `RepositoryError::Conflict`.
    fn delete(
        &self,
        id: &SlotId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
