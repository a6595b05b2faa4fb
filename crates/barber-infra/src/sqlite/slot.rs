//! SQLite available slot repository implementation.

use barber_core::repository::slot::{SlotFilter, SlotRepository};
use barber_types::error::RepositoryError;
use barber_types::id::SlotId;
use barber_types::slot::AvailableSlot;
use barber_types::time::{format_date, format_time};
use chrono::{NaiveDate, NaiveTime};
use sqlx::Row;

use super::pool::{DatabasePool, map_write_error, query_error};
use super::{format_datetime, parse_date, parse_datetime, parse_id, parse_time};

/// SQLite-backed implementation of `SlotRepository`.
pub struct SqliteSlotRepository {
    pool: DatabasePool,
}

impl SqliteSlotRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

pub(crate) fn slot_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<AvailableSlot, RepositoryError> {
    let id: String = row.try_get("id").map_err(query_error)?;
    let service_id: String = row.try_get("service_id").map_err(query_error)?;
    let date: String = row.try_get("slot_date").map_err(query_error)?;
    let start_time: String = row.try_get("start_time").map_err(query_error)?;
    let end_time: String = row.try_get("end_time").map_err(query_error)?;
    let is_booked: bool = row.try_get("is_booked").map_err(query_error)?;
    let created_at: String = row.try_get("created_at").map_err(query_error)?;
    let updated_at: String = row.try_get("updated_at").map_err(query_error)?;

    Ok(AvailableSlot {
        id: parse_id(&id, "slot")?,
        service_id: parse_id(&service_id, "service")?,
        date: parse_date(&date)?,
        start_time: parse_time(&start_time)?,
        end_time: parse_time(&end_time)?,
        is_booked,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

impl SlotRepository for SqliteSlotRepository {
    async fn create(&self, slot: &AvailableSlot) -> Result<AvailableSlot, RepositoryError> {
        sqlx::query(
            "INSERT INTO available_slots (id, service_id, slot_date, start_time, end_time, is_booked, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(slot.id.to_string())
        .bind(slot.service_id.to_string())
        .bind(format_date(&slot.date))
        .bind(format_time(&slot.start_time))
        .bind(format_time(&slot.end_time))
        .bind(slot.is_booked)
        .bind(format_datetime(&slot.created_at))
        .bind(format_datetime(&slot.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| map_write_error(e, || format!("service {} does not exist", slot.service_id)))?;

        Ok(slot.clone())
    }

    async fn get_by_id(&self, id: &SlotId) -> Result<Option<AvailableSlot>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM available_slots WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        row.as_ref().map(slot_from_row).transpose()
    }

    async fn list(&self, filter: SlotFilter) -> Result<Vec<AvailableSlot>, RepositoryError> {
        let mut sql = String::from("SELECT * FROM available_slots");
        let mut conditions: Vec<&str> = Vec::new();

        if filter.date.is_some() {
            conditions.push("slot_date = ?");
        }
        if filter.is_booked.is_some() {
            conditions.push("is_booked = ?");
        }
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY slot_date, start_time, id");

        let mut query = sqlx::query(&sql);
        if let Some(date) = filter.date {
            query = query.bind(format_date(&date));
        }
        if let Some(is_booked) = filter.is_booked {
            query = query.bind(is_booked);
        }

        let rows = query
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        rows.iter().map(slot_from_row).collect()
    }

    async fn find_unbooked(
        &self,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Option<AvailableSlot>, RepositoryError> {
        let row = sqlx::query(
            "SELECT * FROM available_slots
             WHERE slot_date = ? AND start_time = ? AND end_time = ? AND is_booked = 0
             LIMIT 1",
        )
        .bind(format_date(&date))
        .bind(format_time(&start_time))
        .bind(format_time(&end_time))
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(query_error)?;

        row.as_ref().map(slot_from_row).transpose()
    }

    async fn update(&self, slot: &AvailableSlot) -> Result<AvailableSlot, RepositoryError> {
        let result = sqlx::query(
            "UPDATE available_slots
             SET service_id = ?, slot_date = ?, start_time = ?, end_time = ?, is_booked = ?, updated_at = ?
             WHERE id = ? AND is_booked = 0",
        )
        .bind(slot.service_id.to_string())
        .bind(format_date(&slot.date))
        .bind(format_time(&slot.start_time))
        .bind(format_time(&slot.end_time))
        .bind(slot.is_booked)
        .bind(format_datetime(&slot.updated_at))
        .bind(slot.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| map_write_error(e, || format!("service {} does not exist", slot.service_id)))?;

        if result.rows_affected() > 0 {
            return Ok(slot.clone());
        }

        // Nothing updated: either the slot is missing or it is booked.
        match self.get_by_id(&slot.id).await? {
            Some(_) => Err(RepositoryError::Conflict(format!("slot {} is booked", slot.id))),
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn delete(&self, id: &SlotId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM available_slots WHERE id = ? AND is_booked = 0")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| map_write_error(e, || format!("slot {id} is still referenced")))?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        // Nothing deleted: either the slot is missing or it is booked.
        match self.get_by_id(id).await? {
            Some(_) => Err(RepositoryError::Conflict(format!("slot {id} is booked"))),
            None => Err(RepositoryError::NotFound),
        }
    }
}
