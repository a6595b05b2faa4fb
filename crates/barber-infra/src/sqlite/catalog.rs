//! SQLite service offering repository implementation.

use barber_core::repository::catalog::ServiceOfferingRepository;
use barber_types::catalog::{Price, ServiceOffering, ServiceType};
use barber_types::error::RepositoryError;
use barber_types::id::ServiceId;
use sqlx::Row;

use super::pool::{DatabasePool, map_write_error, query_error};
use super::{format_datetime, parse_datetime, parse_id};

/// SQLite-backed implementation of `ServiceOfferingRepository`.
///
/// Prices are stored as integer cents in `price_cents`.
pub struct SqliteServiceOfferingRepository {
    pool: DatabasePool,
}

impl SqliteServiceOfferingRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Column value for a service type (`BEARD`, `HAIRCUT`, `COMBO`).
fn type_column(service_type: ServiceType) -> &'static str {
    match service_type {
        ServiceType::Beard => "BEARD",
        ServiceType::Haircut => "HAIRCUT",
        ServiceType::Combo => "COMBO",
    }
}

fn offering_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<ServiceOffering, RepositoryError> {
    let id: String = row.try_get("id").map_err(query_error)?;
    let service_type: String = row.try_get("service_type").map_err(query_error)?;
    let price_cents: i64 = row.try_get("price_cents").map_err(query_error)?;
    let created_at: String = row.try_get("created_at").map_err(query_error)?;
    let updated_at: String = row.try_get("updated_at").map_err(query_error)?;

    Ok(ServiceOffering {
        id: parse_id(&id, "service")?,
        service_type: service_type.parse().map_err(RepositoryError::Query)?,
        price: Price::from_cents(price_cents),
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

impl ServiceOfferingRepository for SqliteServiceOfferingRepository {
    async fn create(&self, offering: &ServiceOffering) -> Result<ServiceOffering, RepositoryError> {
        sqlx::query(
            "INSERT INTO service_offerings (id, service_type, price_cents, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(offering.id.to_string())
        .bind(type_column(offering.service_type))
        .bind(offering.price.cents())
        .bind(format_datetime(&offering.created_at))
        .bind(format_datetime(&offering.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| {
            map_write_error(e, || {
                format!("service type '{}' already exists", offering.service_type)
            })
        })?;

        Ok(offering.clone())
    }

    async fn get_by_id(&self, id: &ServiceId) -> Result<Option<ServiceOffering>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM service_offerings WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        row.as_ref().map(offering_from_row).transpose()
    }

    async fn get_by_type(
        &self,
        service_type: ServiceType,
    ) -> Result<Option<ServiceOffering>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM service_offerings WHERE service_type = ?")
            .bind(type_column(service_type))
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        row.as_ref().map(offering_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<ServiceOffering>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM service_offerings ORDER BY created_at, id")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        rows.iter().map(offering_from_row).collect()
    }

    async fn update(&self, offering: &ServiceOffering) -> Result<ServiceOffering, RepositoryError> {
        let result = sqlx::query(
            "UPDATE service_offerings SET service_type = ?, price_cents = ?, updated_at = ? WHERE id = ?",
        )
        .bind(type_column(offering.service_type))
        .bind(offering.price.cents())
        .bind(format_datetime(&offering.updated_at))
        .bind(offering.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| {
            map_write_error(e, || {
                format!("service type '{}' already exists", offering.service_type)
            })
        })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(offering.clone())
    }

    async fn delete(&self, id: &ServiceId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM service_offerings WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| map_write_error(e, || format!("service {id} is still referenced")))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
