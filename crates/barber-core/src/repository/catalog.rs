//! Service offering repository trait definition.

use barber_types::catalog::{ServiceOffering, ServiceType};
use barber_types::error::RepositoryError;
use barber_types::id::ServiceId;

/// Repository trait for the service catalog.
///
/// The service type is a unique key: inserting or updating into an existing
/// type yields `RepositoryError::Conflict`. Deleting an offering that slots or
/// appointments reference is also a `Conflict`.
pub trait ServiceOfferingRepository: Send + Sync {
    fn create(
        &self,
        offering: &ServiceOffering,
    ) -> impl std::future::Future<Output = Result<ServiceOffering, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: &ServiceId,
    ) -> impl std::future::Future<Output = Result<Option<ServiceOffering>, RepositoryError>> + Send;

    fn get_by_type(
        &self,
        service_type: ServiceType,
    ) -> impl std::future::Future<Output = Result<Option<ServiceOffering>, RepositoryError>> + Send;

    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ServiceOffering>, RepositoryError>> + Send;

    fn update(
        &self,
        offering: &ServiceOffering,
    ) -> impl std::future::Future<Output = Result<ServiceOffering, RepositoryError>> + Send;

    fn delete(
        &self,
        id: &ServiceId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
