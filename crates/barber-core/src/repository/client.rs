//! Client repository trait definition.

use barber_types::client::Client;
use barber_types::error::RepositoryError;
use barber_types::id::ClientId;

/// Repository trait for client persistence.
///
/// Implementations must report a duplicate national ID as
/// `RepositoryError::Conflict`, and deleting a client that appointments still
/// reference as `RepositoryError::Conflict` too.
pub trait ClientRepository: Send + Sync {
    fn create(
        &self,
        client: &Client,
    ) -> impl std::future::Future<Output = Result<Client, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: &ClientId,
    ) -> impl std::future::Future<Output = Result<Option<Client>, RepositoryError>> + Send;

    fn get_by_national_id(
        &self,
        national_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Client>, RepositoryError>> + Send;

    /// All clients ordered by name.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Client>, RepositoryError>> + Send;

    fn update(
        &self,
        client: &Client,
    ) -> impl std::future::Future<Output = Result<Client, RepositoryError>> + Send;

    fn delete(
        &self,
        id: &ClientId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
