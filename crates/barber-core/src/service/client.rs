//! Client registration service.
//!
//! Validates and normalizes client input, and keeps the national ID unique
//! across all clients.

use barber_types::client::{Client, ClientFields, CreateClientRequest, UpdateClientRequest};
use barber_types::error::{ClientError, RepositoryError};
use barber_types::id::ClientId;
use tracing::{info, warn};

use crate::repository::client::ClientRepository;

/// Service managing client records.
pub struct ClientService<C: ClientRepository> {
    repo: C,
}

impl<C: ClientRepository> ClientService<C> {
    pub fn new(repo: C) -> Self {
        Self { repo }
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>, ClientError> {
        self.repo.list().await.map_err(storage)
    }

    pub async fn get_client(&self, id: &ClientId) -> Result<Client, ClientError> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(storage)?
            .ok_or(ClientError::NotFound)
    }

    /// Register a new client.
    ///
    /// Fails with `NationalIdConflict` if any client already holds the
    /// (normalized) national ID.
    pub async fn create_client(&self, request: CreateClientRequest) -> Result<Client, ClientError> {
        let fields = ClientFields::parse(&request.name, &request.national_id, &request.phone)
            .map_err(ClientError::Validation)?;

        if self
            .repo
            .get_by_national_id(&fields.national_id)
            .await
            .map_err(storage)?
            .is_some()
        {
            warn!(national_id = %fields.national_id, "rejected duplicate client");
            return Err(ClientError::NationalIdConflict(fields.national_id));
        }

        let now = chrono::Utc::now();
        let client = Client {
            id: ClientId::new(),
            name: fields.name,
            national_id: fields.national_id,
            phone: fields.phone,
            created_at: now,
            updated_at: now,
        };

        let client = self.repo.create(&client).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => {
                ClientError::NationalIdConflict(client.national_id.clone())
            }
            other => storage(other),
        })?;

        info!(client_id = %client.id, "client registered");
        Ok(client)
    }

    /// Replace a client's name, national ID, and phone.
    ///
    /// Keeping the same national ID is always allowed; changing it to one held
    /// by another client is a `NationalIdConflict`.
    pub async fn update_client(
        &self,
        id: &ClientId,
        request: UpdateClientRequest,
    ) -> Result<Client, ClientError> {
        let mut client = self.get_client(id).await?;
        let fields = ClientFields::parse(&request.name, &request.national_id, &request.phone)
            .map_err(ClientError::Validation)?;

        if fields.national_id != client.national_id {
            let holder = self
                .repo
                .get_by_national_id(&fields.national_id)
                .await
                .map_err(storage)?;
            if holder.is_some_and(|other| other.id != client.id) {
                warn!(client_id = %id, "rejected national ID change to a taken value");
                return Err(ClientError::NationalIdConflict(fields.national_id));
            }
        }

        client.name = fields.name;
        client.national_id = fields.national_id;
        client.phone = fields.phone;
        client.updated_at = chrono::Utc::now();

        self.repo.update(&client).await.map_err(|e| match e {
            RepositoryError::NotFound => ClientError::NotFound,
            RepositoryError::Conflict(_) => {
                ClientError::NationalIdConflict(client.national_id.clone())
            }
            other => storage(other),
        })
    }

    pub async fn delete_client(&self, id: &ClientId) -> Result<(), ClientError> {
        self.repo.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => ClientError::NotFound,
            RepositoryError::Conflict(_) => ClientError::InUse,
            other => storage(other),
        })?;
        info!(client_id = %id, "client deleted");
        Ok(())
    }
}

fn storage(e: RepositoryError) -> ClientError {
    ClientError::StorageError(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;

    fn request(name: &str, national_id: &str, phone: &str) -> CreateClientRequest {
        CreateClientRequest {
            name: name.to_string(),
            national_id: national_id.to_string(),
            phone: phone.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_normalizes_fields() {
        let service = ClientService::new(MemoryStore::new());
        let client = service
            .create_client(request("  Ana Souza ", "529.982.247-25", "11987654321"))
            .await
            .unwrap();

        assert_eq!(client.name, "Ana Souza");
        assert_eq!(client.national_id, "52998224725");
        assert_eq!(service.get_client(&client.id).await.unwrap(), client);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let service = ClientService::new(MemoryStore::new());

        let err = service
            .create_client(request("Ana", "52998224724", "11987654321"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));

        let err = service
            .create_client(request("Ana", "52998224725", "1234"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));

        let err = service
            .create_client(request(" ", "52998224725", "11987654321"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert!(service.list_clients().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_national_id_conflicts() {
        let service = ClientService::new(MemoryStore::new());
        service
            .create_client(request("Ana", "52998224725", "11987654321"))
            .await
            .unwrap();

        let err = service
            .create_client(request("Bruno", "529.982.247-25", "1133334444"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::NationalIdConflict(id) if id == "52998224725"));
        assert_eq!(service.list_clients().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_own_national_id() {
        let service = ClientService::new(MemoryStore::new());
        let client = service
            .create_client(request("Ana", "52998224725", "11987654321"))
            .await
            .unwrap();

        let updated = service
            .update_client(
                &client.id,
                UpdateClientRequest {
                    name: "Ana Lima".to_string(),
                    national_id: "52998224725".to_string(),
                    phone: "1133334444".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Ana Lima");
        assert_eq!(updated.phone, "1133334444");
        assert_eq!(updated.created_at, client.created_at);
    }

    #[tokio::test]
    async fn test_update_to_taken_national_id_conflicts() {
        let service = ClientService::new(MemoryStore::new());
        service
            .create_client(request("Ana", "52998224725", "11987654321"))
            .await
            .unwrap();
        let bruno = service
            .create_client(request("Bruno", "11144477735", "1133334444"))
            .await
            .unwrap();

        let err = service
            .update_client(
                &bruno.id,
                UpdateClientRequest {
                    name: "Bruno".to_string(),
                    national_id: "52998224725".to_string(),
                    phone: "1133334444".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::NationalIdConflict(_)));
    }

    #[tokio::test]
    async fn test_missing_client_is_not_found() {
        let service = ClientService::new(MemoryStore::new());
        let id = ClientId::new();
        assert!(matches!(
            service.get_client(&id).await,
            Err(ClientError::NotFound)
        ));
        assert!(matches!(
            service.delete_client(&id).await,
            Err(ClientError::NotFound)
        ));
        assert!(matches!(
            service
                .update_client(
                    &id,
                    UpdateClientRequest {
                        name: "Ana".to_string(),
                        national_id: "52998224725".to_string(),
                        phone: "11987654321".to_string(),
                    },
                )
                .await,
            Err(ClientError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_client() {
        let service = ClientService::new(MemoryStore::new());
        let client = service
            .create_client(request("Ana", "52998224725", "11987654321"))
            .await
            .unwrap();
        service.delete_client(&client.id).await.unwrap();
        assert!(service.list_clients().await.unwrap().is_empty());
    }
}
