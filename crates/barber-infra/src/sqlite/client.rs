//! SQLite client repository implementation.

use barber_core::repository::client::ClientRepository;
use barber_types::client::Client;
use barber_types::error::RepositoryError;
use barber_types::id::ClientId;
use sqlx::Row;

use super::pool::{DatabasePool, map_write_error, query_error};
use super::{format_datetime, parse_datetime, parse_id};

/// SQLite-backed implementation of `ClientRepository`.
pub struct SqliteClientRepository {
    pool: DatabasePool,
}

impl SqliteClientRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn client_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Client, RepositoryError> {
    let id: String = row.try_get("id").map_err(query_error)?;
    let created_at: String = row.try_get("created_at").map_err(query_error)?;
    let updated_at: String = row.try_get("updated_at").map_err(query_error)?;

    Ok(Client {
        id: parse_id(&id, "client")?,
        name: row.try_get("name").map_err(query_error)?,
        national_id: row.try_get("national_id").map_err(query_error)?,
        phone: row.try_get("phone").map_err(query_error)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

impl ClientRepository for SqliteClientRepository {
    async fn create(&self, client: &Client) -> Result<Client, RepositoryError> {
        sqlx::query(
            "INSERT INTO clients (id, name, national_id, phone, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(client.id.to_string())
        .bind(&client.name)
        .bind(&client.national_id)
        .bind(&client.phone)
        .bind(format_datetime(&client.created_at))
        .bind(format_datetime(&client.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| {
            map_write_error(e, || {
                format!("national ID '{}' already exists", client.national_id)
            })
        })?;

        Ok(client.clone())
    }

    async fn get_by_id(&self, id: &ClientId) -> Result<Option<Client>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM clients WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        row.as_ref().map(client_from_row).transpose()
    }

    async fn get_by_national_id(&self, national_id: &str) -> Result<Option<Client>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM clients WHERE national_id = ?")
            .bind(national_id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        row.as_ref().map(client_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Client>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM clients ORDER BY name, id")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        rows.iter().map(client_from_row).collect()
    }

    async fn update(&self, client: &Client) -> Result<Client, RepositoryError> {
        let result = sqlx::query(
            "UPDATE clients SET name = ?, national_id = ?, phone = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&client.name)
        .bind(&client.national_id)
        .bind(&client.phone)
        .bind(format_datetime(&client.updated_at))
        .bind(client.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| {
            map_write_error(e, || {
                format!("national ID '{}' already exists", client.national_id)
            })
        })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(client.clone())
    }

    async fn delete(&self, id: &ClientId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| map_write_error(e, || format!("client {id} has appointments")))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::test_pool;
    use crate::sqlite::fixtures::make_client;

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = SqliteClientRepository::new(test_pool().await);
        let client = make_client("Ana", "52998224725");
        repo.create(&client).await.unwrap();

        let found = repo.get_by_id(&client.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Ana");
        assert_eq!(found.created_at.timestamp(), client.created_at.timestamp());

        let by_id = repo.get_by_national_id("52998224725").await.unwrap().unwrap();
        assert_eq!(by_id.id, client.id);
        assert!(repo.get_by_national_id("11144477735").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_national_id_is_conflict() {
        let repo = SqliteClientRepository::new(test_pool().await);
        repo.create(&make_client("Ana", "52998224725")).await.unwrap();

        let err = repo
            .create(&make_client("Bruno", "52998224725"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_ordered_by_name() {
        let repo = SqliteClientRepository::new(test_pool().await);
        repo.create(&make_client("Carla", "52998224725")).await.unwrap();
        repo.create(&make_client("Ana", "11144477735")).await.unwrap();

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Ana", "Carla"]);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = SqliteClientRepository::new(test_pool().await);
        let mut client = make_client("Ana", "52998224725");
        repo.create(&client).await.unwrap();

        client.phone = "1133334444".to_string();
        repo.update(&client).await.unwrap();
        let found = repo.get_by_id(&client.id).await.unwrap().unwrap();
        assert_eq!(found.phone, "1133334444");

        repo.delete(&client.id).await.unwrap();
        assert!(repo.get_by_id(&client.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(&client.id).await,
            Err(RepositoryError::NotFound)
        ));
        assert!(matches!(
            repo.update(&client).await,
            Err(RepositoryError::NotFound)
        ));
    }
}
