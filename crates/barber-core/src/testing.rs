//! In-memory repositories and a fixed clock for service tests.
//!
//! `MemoryStore` implements every repository trait over one shared set of
//! tables, mirroring the constraints the SQLite schema enforces (unique keys,
//! restricted deletes, conditional booking).

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use barber_types::appointment::Appointment;
use barber_types::catalog::{ServiceOffering, ServiceType};
use barber_types::client::Client;
use barber_types::error::RepositoryError;
use barber_types::id::{AppointmentId, ClientId, ServiceId, SlotId};
use barber_types::slot::AvailableSlot;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::repository::appointment::AppointmentRepository;
use crate::repository::catalog::ServiceOfferingRepository;
use crate::repository::client::ClientRepository;
use crate::repository::slot::{SlotFilter, SlotRepository};
use crate::service::clock::Clock;

#[derive(Default)]
pub struct Tables {
    pub clients: HashMap<ClientId, Client>,
    pub services: HashMap<ServiceId, ServiceOffering>,
    pub slots: HashMap<SlotId, AvailableSlot>,
    pub appointments: HashMap<AppointmentId, Appointment>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    pub fn slot(&self, id: &SlotId) -> AvailableSlot {
        self.tables().slots.get(id).cloned().unwrap()
    }
}

/// A clock frozen at one instant.
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    pub fn at(s: &str) -> Self {
        Self(barber_types::time::parse_date_time(s).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl ClientRepository for MemoryStore {
    async fn create(&self, client: &Client) -> Result<Client, RepositoryError> {
        let mut t = self.tables();
        if t.clients.values().any(|c| c.national_id == client.national_id) {
            return Err(RepositoryError::Conflict("national_id".to_string()));
        }
        t.clients.insert(client.id, client.clone());
        Ok(client.clone())
    }

    async fn get_by_id(&self, id: &ClientId) -> Result<Option<Client>, RepositoryError> {
        Ok(self.tables().clients.get(id).cloned())
    }

    async fn get_by_national_id(&self, national_id: &str) -> Result<Option<Client>, RepositoryError> {
        Ok(self
            .tables()
            .clients
            .values()
            .find(|c| c.national_id == national_id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Client>, RepositoryError> {
        let mut clients: Vec<Client> = self.tables().clients.values().cloned().collect();
        clients.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(clients)
    }

    async fn update(&self, client: &Client) -> Result<Client, RepositoryError> {
        let mut t = self.tables();
        if t
            .clients
            .values()
            .any(|c| c.id != client.id && c.national_id == client.national_id)
        {
            return Err(RepositoryError::Conflict("national_id".to_string()));
        }
        match t.clients.get_mut(&client.id) {
            Some(existing) => {
                *existing = client.clone();
                Ok(client.clone())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn delete(&self, id: &ClientId) -> Result<(), RepositoryError> {
        let mut t = self.tables();
        if t.appointments.values().any(|a| a.client_id == *id) {
            return Err(RepositoryError::Conflict("client in use".to_string()));
        }
        t.clients
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

impl ServiceOfferingRepository for MemoryStore {
    async fn create(&self, offering: &ServiceOffering) -> Result<ServiceOffering, RepositoryError> {
        let mut t = self.tables();
        if t
            .services
            .values()
            .any(|s| s.service_type == offering.service_type)
        {
            return Err(RepositoryError::Conflict("service_type".to_string()));
        }
        t.services.insert(offering.id, offering.clone());
        Ok(offering.clone())
    }

    async fn get_by_id(&self, id: &ServiceId) -> Result<Option<ServiceOffering>, RepositoryError> {
        Ok(self.tables().services.get(id).cloned())
    }

    async fn get_by_type(
        &self,
        service_type: ServiceType,
    ) -> Result<Option<ServiceOffering>, RepositoryError> {
        Ok(self
            .tables()
            .services
            .values()
            .find(|s| s.service_type == service_type)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<ServiceOffering>, RepositoryError> {
        let mut services: Vec<ServiceOffering> =
            self.tables().services.values().cloned().collect();
        services.sort_by_key(|s| s.id);
        Ok(services)
    }

    async fn update(&self, offering: &ServiceOffering) -> Result<ServiceOffering, RepositoryError> {
        let mut t = self.tables();
        if t
            .services
            .values()
            .any(|s| s.id != offering.id && s.service_type == offering.service_type)
        {
            return Err(RepositoryError::Conflict("service_type".to_string()));
        }
        match t.services.get_mut(&offering.id) {
            Some(existing) => {
                *existing = offering.clone();
                Ok(offering.clone())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn delete(&self, id: &ServiceId) -> Result<(), RepositoryError> {
        let mut t = self.tables();
        if t.slots.values().any(|s| s.service_id == *id)
            || t.appointments.values().any(|a| a.service_id == *id)
        {
            return Err(RepositoryError::Conflict("service in use".to_string()));
        }
        t.services
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

impl SlotRepository for MemoryStore {
    async fn create(&self, slot: &AvailableSlot) -> Result<AvailableSlot, RepositoryError> {
        self.tables().slots.insert(slot.id, slot.clone());
        Ok(slot.clone())
    }

    async fn get_by_id(&self, id: &SlotId) -> Result<Option<AvailableSlot>, RepositoryError> {
        Ok(self.tables().slots.get(id).cloned())
    }

    async fn list(&self, filter: SlotFilter) -> Result<Vec<AvailableSlot>, RepositoryError> {
        let mut slots: Vec<AvailableSlot> = self
            .tables()
            .slots
            .values()
            .filter(|s| filter.date.is_none_or(|d| s.date == d))
            .filter(|s| filter.is_booked.is_none_or(|b| s.is_booked == b))
            .cloned()
            .collect();
        slots.sort_by_key(|s| (s.date, s.start_time));
        Ok(slots)
    }

    async fn find_unbooked(
        &self,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Option<AvailableSlot>, RepositoryError> {
        Ok(self
            .tables()
            .slots
            .values()
            .find(|s| {
                !s.is_booked && s.date == date && s.start_time == start_time && s.end_time == end_time
            })
            .cloned())
    }

    async fn update(&self, slot: &AvailableSlot) -> Result<AvailableSlot, RepositoryError> {
        match self.tables().slots.get_mut(&slot.id) {
            Some(existing) if existing.is_booked => {
                Err(RepositoryError::Conflict("slot is booked".to_string()))
            }
            Some(existing) => {
                *existing = slot.clone();
                Ok(slot.clone())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn delete(&self, id: &SlotId) -> Result<(), RepositoryError> {
        let mut t = self.tables();
        match t.slots.get(id) {
            None => Err(RepositoryError::NotFound),
            Some(slot) if slot.is_booked => {
                Err(RepositoryError::Conflict("slot is booked".to_string()))
            }
            Some(_) => {
                t.slots.remove(id);
                Ok(())
            }
        }
    }
}

impl AppointmentRepository for MemoryStore {
    async fn get_by_id(&self, id: &AppointmentId) -> Result<Option<Appointment>, RepositoryError> {
        Ok(self.tables().appointments.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Appointment>, RepositoryError> {
        let mut appointments: Vec<Appointment> =
            self.tables().appointments.values().cloned().collect();
        appointments.sort_by_key(|a| a.date_time);
        Ok(appointments)
    }

    async fn book(&self, appointment: &Appointment) -> Result<Appointment, RepositoryError> {
        let mut t = self.tables();
        let slot = t
            .slots
            .get_mut(&appointment.slot_id)
            .ok_or(RepositoryError::NotFound)?;
        if slot.is_booked {
            return Err(RepositoryError::Conflict("slot is booked".to_string()));
        }
        slot.is_booked = true;
        t.appointments.insert(appointment.id, appointment.clone());
        Ok(appointment.clone())
    }

    async fn update(
        &self,
        appointment: &Appointment,
        moved_from: Option<&SlotId>,
    ) -> Result<Appointment, RepositoryError> {
        let mut t = self.tables();
        let held_slot = moved_from.unwrap_or(&appointment.slot_id);
        match t.appointments.get(&appointment.id) {
            None => return Err(RepositoryError::NotFound),
            Some(stored) if stored.slot_id != *held_slot => {
                return Err(RepositoryError::Conflict("appointment moved".to_string()));
            }
            Some(_) => {}
        }
        if let Some(old) = moved_from {
            match t.slots.get(&appointment.slot_id) {
                None => return Err(RepositoryError::NotFound),
                Some(s) if s.is_booked => {
                    return Err(RepositoryError::Conflict("slot is booked".to_string()));
                }
                Some(_) => {}
            }
            if let Some(s) = t.slots.get_mut(old) {
                s.is_booked = false;
            }
            if let Some(s) = t.slots.get_mut(&appointment.slot_id) {
                s.is_booked = true;
            }
        }
        t.appointments.insert(appointment.id, appointment.clone());
        Ok(appointment.clone())
    }

    async fn cancel(&self, id: &AppointmentId) -> Result<SlotId, RepositoryError> {
        let mut t = self.tables();
        let appointment = t.appointments.remove(id).ok_or(RepositoryError::NotFound)?;
        if let Some(s) = t.slots.get_mut(&appointment.slot_id) {
            s.is_booked = false;
        }
        Ok(appointment.slot_id)
    }
}
