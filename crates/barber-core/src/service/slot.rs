//! Available slot management.
//!
//! Slots are opened per service and date. A booked slot is frozen here: it
//! cannot be updated or deleted until its appointment is cancelled.

use barber_types::error::{RepositoryError, SlotError};
use barber_types::id::{ServiceId, SlotId};
use barber_types::slot::{AvailableSlot, CreateSlotRequest, UpdateSlotRequest, validate_window};
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::repository::catalog::ServiceOfferingRepository;
use crate::repository::slot::{SlotFilter, SlotRepository};
use crate::service::clock::Clock;

pub struct SlotService<T: SlotRepository, S: ServiceOfferingRepository, K: Clock> {
    slots: T,
    services: S,
    clock: K,
}

impl<T: SlotRepository, S: ServiceOfferingRepository, K: Clock> SlotService<T, S, K> {
    pub fn new(slots: T, services: S, clock: K) -> Self {
        Self {
            slots,
            services,
            clock,
        }
    }

    /// Every slot, booked or not.
    pub async fn list_slots(&self) -> Result<Vec<AvailableSlot>, SlotError> {
        self.slots
            .list(SlotFilter::default())
            .await
            .map_err(storage)
    }

    pub async fn get_slot(&self, id: &SlotId) -> Result<AvailableSlot, SlotError> {
        self.slots
            .get_by_id(id)
            .await
            .map_err(storage)?
            .ok_or(SlotError::NotFound)
    }

    /// Unbooked slots on `date`, ordered by start time.
    pub async fn list_unbooked_by_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<AvailableSlot>, SlotError> {
        self.slots
            .list(SlotFilter {
                date: Some(date),
                is_booked: Some(false),
            })
            .await
            .map_err(storage)
    }

    pub async fn create_slot(&self, request: CreateSlotRequest) -> Result<AvailableSlot, SlotError> {
        self.ensure_not_past(request.date)?;
        self.ensure_service(&request.service_id).await?;

        if self
            .slots
            .find_unbooked(request.date, request.start_time, request.end_time)
            .await
            .map_err(storage)?
            .is_some()
        {
            warn!(date = %request.date, start = %request.start_time, "rejected duplicate slot");
            return Err(SlotError::DuplicateSlot);
        }

        validate_window(request.start_time, request.end_time).map_err(SlotError::Validation)?;

        let now = chrono::Utc::now();
        let slot = AvailableSlot {
            id: SlotId::new(),
            service_id: request.service_id,
            date: request.date,
            start_time: request.start_time,
            end_time: request.end_time,
            is_booked: false,
            created_at: now,
            updated_at: now,
        };

        let slot = self.slots.create(&slot).await.map_err(storage)?;
        info!(slot_id = %slot.id, date = %slot.date, start = %slot.start_time, "slot opened");
        Ok(slot)
    }

    /// Replace every field of an unbooked slot, including the booking flag.
    ///
    /// Setting `is_booked` here bypasses the appointment flow; it exists for
    /// manual corrections.
    pub async fn update_slot(
        &self,
        id: &SlotId,
        request: UpdateSlotRequest,
    ) -> Result<AvailableSlot, SlotError> {
        let mut slot = self.get_slot(id).await?;
        if slot.is_booked {
            warn!(slot_id = %id, "rejected update of booked slot");
            return Err(SlotError::AlreadyBooked);
        }

        self.ensure_not_past(request.date)?;
        self.ensure_service(&request.service_id).await?;
        validate_window(request.start_time, request.end_time).map_err(SlotError::Validation)?;

        slot.service_id = request.service_id;
        slot.date = request.date;
        slot.start_time = request.start_time;
        slot.end_time = request.end_time;
        slot.is_booked = request.is_booked;
        slot.updated_at = chrono::Utc::now();

        // Booked since the read above: the repository refuses the write.
        self.slots.update(&slot).await.map_err(|e| match e {
            RepositoryError::NotFound => SlotError::NotFound,
            RepositoryError::Conflict(_) => SlotError::AlreadyBooked,
            other => storage(other),
        })
    }

    pub async fn delete_slot(&self, id: &SlotId) -> Result<(), SlotError> {
        let slot = self.get_slot(id).await?;
        if slot.is_booked {
            warn!(slot_id = %id, "rejected deletion of booked slot");
            return Err(SlotError::AlreadyBooked);
        }

        self.slots.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => SlotError::NotFound,
            RepositoryError::Conflict(_) => SlotError::AlreadyBooked,
            other => storage(other),
        })?;
        info!(slot_id = %id, "slot deleted");
        Ok(())
    }

    fn ensure_not_past(&self, date: NaiveDate) -> Result<(), SlotError> {
        if date < self.clock.today() {
            return Err(SlotError::Validation(format!(
                "slot date {date} is in the past"
            )));
        }
        Ok(())
    }

    async fn ensure_service(&self, id: &ServiceId) -> Result<(), SlotError> {
        self.services
            .get_by_id(id)
            .await
            .map_err(storage)?
            .map(|_| ())
            .ok_or(SlotError::ServiceNotFound)
    }
}

fn storage(e: RepositoryError) -> SlotError {
    SlotError::StorageError(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FixedClock, MemoryStore};
    use barber_types::catalog::{ServiceOffering, ServiceType};
    use barber_types::time::{parse_date, parse_time};

    async fn setup() -> (SlotService<MemoryStore, MemoryStore, FixedClock>, ServiceId) {
        let store = MemoryStore::new();
        let offering = ServiceOffering::with_default_price(ServiceType::Haircut);
        ServiceOfferingRepository::create(&store, &offering).await.unwrap();
        let service = SlotService::new(
            store.clone(),
            store,
            FixedClock::at("2025-05-20T12:00:00"),
        );
        (service, offering.id)
    }

    fn request(service_id: ServiceId, date: &str, start: &str, end: &str) -> CreateSlotRequest {
        CreateSlotRequest {
            service_id,
            date: parse_date(date).unwrap(),
            start_time: parse_time(start).unwrap(),
            end_time: parse_time(end).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_slot_unbooked() {
        let (service, service_id) = setup().await;
        let slot = service
            .create_slot(request(service_id, "2025-06-01", "09:00", "10:00"))
            .await
            .unwrap();
        assert!(!slot.is_booked);
        assert_eq!(service.get_slot(&slot.id).await.unwrap(), slot);
    }

    #[tokio::test]
    async fn test_create_slot_today_allowed_past_rejected() {
        let (service, service_id) = setup().await;
        assert!(
            service
                .create_slot(request(service_id, "2025-05-20", "14:00", "15:00"))
                .await
                .is_ok()
        );
        let err = service
            .create_slot(request(service_id, "2025-05-19", "14:00", "15:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, SlotError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_slot_rejects_bad_window() {
        let (service, service_id) = setup().await;
        for (start, end) in [("10:00", "10:00"), ("11:00", "10:00")] {
            let err = service
                .create_slot(request(service_id, "2025-06-01", start, end))
                .await
                .unwrap_err();
            assert!(matches!(err, SlotError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_create_slot_unknown_service() {
        let (service, _) = setup().await;
        let err = service
            .create_slot(request(ServiceId::new(), "2025-06-01", "09:00", "10:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, SlotError::ServiceNotFound));
    }

    #[tokio::test]
    async fn test_duplicate_unbooked_slot_rejected() {
        let (service, service_id) = setup().await;
        service
            .create_slot(request(service_id, "2025-06-01", "09:00", "10:00"))
            .await
            .unwrap();
        let err = service
            .create_slot(request(service_id, "2025-06-01", "09:00", "10:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, SlotError::DuplicateSlot));
    }

    #[tokio::test]
    async fn test_list_unbooked_by_date_is_ordered() {
        let (service, service_id) = setup().await;
        service
            .create_slot(request(service_id, "2025-06-01", "11:00", "12:00"))
            .await
            .unwrap();
        service
            .create_slot(request(service_id, "2025-06-01", "09:00", "10:00"))
            .await
            .unwrap();
        service
            .create_slot(request(service_id, "2025-06-02", "09:00", "10:00"))
            .await
            .unwrap();

        let slots = service
            .list_unbooked_by_date(parse_date("2025-06-01").unwrap())
            .await
            .unwrap();
        let starts: Vec<String> = slots.iter().map(|s| s.start_time.to_string()).collect();
        assert_eq!(starts, vec!["09:00:00", "11:00:00"]);
        assert_eq!(service.list_slots().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_update_slot_replaces_fields() {
        let (service, service_id) = setup().await;
        let slot = service
            .create_slot(request(service_id, "2025-06-01", "09:00", "10:00"))
            .await
            .unwrap();

        let updated = service
            .update_slot(
                &slot.id,
                UpdateSlotRequest {
                    service_id,
                    date: parse_date("2025-06-03").unwrap(),
                    start_time: parse_time("13:00").unwrap(),
                    end_time: parse_time("13:30").unwrap(),
                    is_booked: false,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.date, parse_date("2025-06-03").unwrap());
        assert_eq!(updated.end_time, parse_time("13:30").unwrap());
    }

    #[tokio::test]
    async fn test_booked_slot_is_frozen() {
        let (service, service_id) = setup().await;
        let slot = service
            .create_slot(request(service_id, "2025-06-01", "09:00", "10:00"))
            .await
            .unwrap();
        let mut booked = slot.clone();
        booked.is_booked = true;
        SlotRepository::update(&service.slots, &booked).await.unwrap();

        let err = service
            .update_slot(
                &slot.id,
                UpdateSlotRequest {
                    service_id,
                    date: slot.date,
                    start_time: slot.start_time,
                    end_time: slot.end_time,
                    is_booked: false,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SlotError::AlreadyBooked));

        let err = service.delete_slot(&slot.id).await.unwrap_err();
        assert!(matches!(err, SlotError::AlreadyBooked));
        assert!(service.get_slot(&slot.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_slot() {
        let (service, service_id) = setup().await;
        let slot = service
            .create_slot(request(service_id, "2025-06-01", "09:00", "10:00"))
            .await
            .unwrap();
        service.delete_slot(&slot.id).await.unwrap();
        assert!(matches!(
            service.get_slot(&slot.id).await,
            Err(SlotError::NotFound)
        ));
    }
}
