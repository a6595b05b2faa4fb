//! SQLite appointment repository implementation.
//!
//! Every write runs in one transaction on the writer pool so the slot's
//! `is_booked` flag and the appointment row never disagree.

use barber_core::repository::appointment::AppointmentRepository;
use barber_types::appointment::Appointment;
use barber_types::error::RepositoryError;
use barber_types::id::{AppointmentId, SlotId};
use barber_types::time::format_date_time;
use sqlx::{Row, Sqlite, Transaction};

use super::pool::{DatabasePool, map_write_error, query_error};
use super::{format_datetime, parse_datetime, parse_id, parse_local_datetime};

/// SQLite-backed implementation of `AppointmentRepository`.
pub struct SqliteAppointmentRepository {
    pool: DatabasePool,
}

impl SqliteAppointmentRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn appointment_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Appointment, RepositoryError> {
    let id: String = row.try_get("id").map_err(query_error)?;
    let client_id: String = row.try_get("client_id").map_err(query_error)?;
    let service_id: String = row.try_get("service_id").map_err(query_error)?;
    let slot_id: String = row.try_get("slot_id").map_err(query_error)?;
    let date_time: String = row.try_get("date_time").map_err(query_error)?;
    let created_at: String = row.try_get("created_at").map_err(query_error)?;
    let updated_at: String = row.try_get("updated_at").map_err(query_error)?;

    Ok(Appointment {
        id: parse_id(&id, "appointment")?,
        client_id: parse_id(&client_id, "client")?,
        service_id: parse_id(&service_id, "service")?,
        slot_id: parse_id(&slot_id, "slot")?,
        date_time: parse_local_datetime(&date_time)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

/// Flip a slot to booked, only if it is still free.
///
/// Zero affected rows means the slot is booked (`Conflict`) or gone
/// (`NotFound`); the caller's transaction is dropped either way.
async fn claim_slot(
    tx: &mut Transaction<'_, Sqlite>,
    slot_id: &SlotId,
    updated_at: &str,
) -> Result<(), RepositoryError> {
    let result = sqlx::query(
        "UPDATE available_slots SET is_booked = 1, updated_at = ? WHERE id = ? AND is_booked = 0",
    )
    .bind(updated_at)
    .bind(slot_id.to_string())
    .execute(&mut **tx)
    .await
    .map_err(query_error)?;

    if result.rows_affected() == 1 {
        return Ok(());
    }

    let exists: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM available_slots WHERE id = ?")
        .bind(slot_id.to_string())
        .fetch_optional(&mut **tx)
        .await
        .map_err(query_error)?;

    match exists {
        Some(_) => Err(RepositoryError::Conflict(format!("slot {slot_id} is already booked"))),
        None => Err(RepositoryError::NotFound),
    }
}

async fn release_slot(
    tx: &mut Transaction<'_, Sqlite>,
    slot_id: &SlotId,
    updated_at: &str,
) -> Result<(), RepositoryError> {
    sqlx::query("UPDATE available_slots SET is_booked = 0, updated_at = ? WHERE id = ?")
        .bind(updated_at)
        .bind(slot_id.to_string())
        .execute(&mut **tx)
        .await
        .map_err(query_error)?;
    Ok(())
}

impl AppointmentRepository for SqliteAppointmentRepository {
    async fn get_by_id(&self, id: &AppointmentId) -> Result<Option<Appointment>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM appointments WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        row.as_ref().map(appointment_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Appointment>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM appointments ORDER BY date_time, id")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        rows.iter().map(appointment_from_row).collect()
    }

    async fn book(&self, appointment: &Appointment) -> Result<Appointment, RepositoryError> {
        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;
        let stamp = format_datetime(&appointment.updated_at);

        claim_slot(&mut tx, &appointment.slot_id, &stamp).await?;

        sqlx::query(
            "INSERT INTO appointments (id, client_id, service_id, slot_id, date_time, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(appointment.id.to_string())
        .bind(appointment.client_id.to_string())
        .bind(appointment.service_id.to_string())
        .bind(appointment.slot_id.to_string())
        .bind(format_date_time(&appointment.date_time))
        .bind(format_datetime(&appointment.created_at))
        .bind(&stamp)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_write_error(e, || {
                format!("slot {} cannot take this appointment", appointment.slot_id)
            })
        })?;

        tx.commit().await.map_err(query_error)?;
        Ok(appointment.clone())
    }

    async fn update(
        &self,
        appointment: &Appointment,
        moved_from: Option<&SlotId>,
    ) -> Result<Appointment, RepositoryError> {
        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;
        let stamp = format_datetime(&appointment.updated_at);
        let held_slot = moved_from.unwrap_or(&appointment.slot_id);

        if let Some(old_slot) = moved_from {
            release_slot(&mut tx, old_slot, &stamp).await?;
            claim_slot(&mut tx, &appointment.slot_id, &stamp).await?;
        }

        // The row must still hold the slot the caller read.
        let result = sqlx::query(
            "UPDATE appointments
             SET client_id = ?, service_id = ?, slot_id = ?, date_time = ?, updated_at = ?
             WHERE id = ? AND slot_id = ?",
        )
        .bind(appointment.client_id.to_string())
        .bind(appointment.service_id.to_string())
        .bind(appointment.slot_id.to_string())
        .bind(format_date_time(&appointment.date_time))
        .bind(&stamp)
        .bind(appointment.id.to_string())
        .bind(held_slot.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_write_error(e, || {
                format!("slot {} cannot take this appointment", appointment.slot_id)
            })
        })?;

        if result.rows_affected() == 0 {
            let exists: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM appointments WHERE id = ?")
                .bind(appointment.id.to_string())
                .fetch_optional(&mut *tx)
                .await
                .map_err(query_error)?;

            return match exists {
                Some(_) => Err(RepositoryError::Conflict(format!(
                    "appointment {} no longer holds slot {held_slot}",
                    appointment.id
                ))),
                None => Err(RepositoryError::NotFound),
            };
        }

        tx.commit().await.map_err(query_error)?;
        Ok(appointment.clone())
    }

    async fn cancel(&self, id: &AppointmentId) -> Result<SlotId, RepositoryError> {
        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        let row: Option<(String,)> =
            sqlx::query_as("DELETE FROM appointments WHERE id = ? RETURNING slot_id")
                .bind(id.to_string())
                .fetch_optional(&mut *tx)
                .await
                .map_err(query_error)?;

        let Some((slot_id,)) = row else {
            return Err(RepositoryError::NotFound);
        };
        let slot_id: SlotId = parse_id(&slot_id, "slot")?;

        release_slot(&mut tx, &slot_id, &format_datetime(&chrono::Utc::now())).await?;

        tx.commit().await.map_err(query_error)?;
        Ok(slot_id)
    }
}
