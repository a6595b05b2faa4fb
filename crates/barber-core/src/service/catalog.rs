//! Service catalog management.
//!
//! At most one offering exists per [`ServiceType`]. `ensure_defaults` seeds
//! the three canonical offerings and is safe to call repeatedly.

use barber_types::catalog::{
    CreateServiceRequest, Price, ServiceOffering, ServiceType, UpdateServiceRequest,
};
use barber_types::error::{CatalogError, RepositoryError};
use barber_types::id::ServiceId;
use tracing::{debug, info, warn};

use crate::repository::catalog::ServiceOfferingRepository;

pub struct CatalogService<S: ServiceOfferingRepository> {
    repo: S,
}

impl<S: ServiceOfferingRepository> CatalogService<S> {
    pub fn new(repo: S) -> Self {
        Self { repo }
    }

    pub async fn list_services(&self) -> Result<Vec<ServiceOffering>, CatalogError> {
        self.repo.list().await.map_err(storage)
    }

    pub async fn get_service(&self, id: &ServiceId) -> Result<ServiceOffering, CatalogError> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(storage)?
            .ok_or(CatalogError::NotFound)
    }

    pub async fn get_by_type(
        &self,
        service_type: ServiceType,
    ) -> Result<ServiceOffering, CatalogError> {
        self.repo
            .get_by_type(service_type)
            .await
            .map_err(storage)?
            .ok_or(CatalogError::NotFound)
    }

    /// Add an offering for a type that has none yet.
    pub async fn create_service(
        &self,
        request: CreateServiceRequest,
    ) -> Result<ServiceOffering, CatalogError> {
        let price = request
            .price
            .unwrap_or_else(|| request.service_type.default_price());
        validate_price(price)?;

        if self
            .repo
            .get_by_type(request.service_type)
            .await
            .map_err(storage)?
            .is_some()
        {
            warn!(service_type = %request.service_type, "rejected duplicate service type");
            return Err(CatalogError::TypeConflict(request.service_type.to_string()));
        }

        let mut offering = ServiceOffering::with_default_price(request.service_type);
        offering.price = price;

        let offering = self.repo.create(&offering).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => {
                CatalogError::TypeConflict(request.service_type.to_string())
            }
            other => storage(other),
        })?;

        info!(service_id = %offering.id, service_type = %offering.service_type, "service created");
        Ok(offering)
    }

    /// Replace an offering's type and price.
    ///
    /// Changing the type to one another offering already holds is a
    /// `TypeConflict`.
    pub async fn update_service(
        &self,
        id: &ServiceId,
        request: UpdateServiceRequest,
    ) -> Result<ServiceOffering, CatalogError> {
        let mut offering = self.get_service(id).await?;
        validate_price(request.price)?;

        if request.service_type != offering.service_type
            && self
                .repo
                .get_by_type(request.service_type)
                .await
                .map_err(storage)?
                .is_some_and(|other| other.id != offering.id)
        {
            warn!(service_id = %id, service_type = %request.service_type, "rejected type change");
            return Err(CatalogError::TypeConflict(request.service_type.to_string()));
        }

        offering.service_type = request.service_type;
        offering.price = request.price;
        offering.updated_at = chrono::Utc::now();

        self.repo.update(&offering).await.map_err(|e| match e {
            RepositoryError::NotFound => CatalogError::NotFound,
            RepositoryError::Conflict(_) => {
                CatalogError::TypeConflict(request.service_type.to_string())
            }
            other => storage(other),
        })
    }

    pub async fn delete_service(&self, id: &ServiceId) -> Result<(), CatalogError> {
        self.repo.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => CatalogError::NotFound,
            RepositoryError::Conflict(_) => CatalogError::InUse,
            other => storage(other),
        })?;
        info!(service_id = %id, "service deleted");
        Ok(())
    }

    /// Create the canonical offering for every type that has none.
    ///
    /// Returns only the offerings created by this call. Losing an insert race
    /// to a concurrent caller counts as "already exists".
    pub async fn ensure_defaults(&self) -> Result<Vec<ServiceOffering>, CatalogError> {
        let mut created = Vec::new();

        for service_type in ServiceType::ALL {
            if self
                .repo
                .get_by_type(service_type)
                .await
                .map_err(storage)?
                .is_some()
            {
                continue;
            }

            let offering = ServiceOffering::with_default_price(service_type);
            match self.repo.create(&offering).await {
                Ok(offering) => {
                    info!(
                        service_type = %offering.service_type,
                        price = %offering.price,
                        "default service created"
                    );
                    created.push(offering);
                }
                Err(RepositoryError::Conflict(_)) => {
                    debug!(%service_type, "default service created concurrently");
                }
                Err(other) => return Err(storage(other)),
            }
        }

        Ok(created)
    }
}

fn validate_price(price: Price) -> Result<(), CatalogError> {
    if price.cents() < 0 {
        return Err(CatalogError::Validation("price cannot be negative".to_string()));
    }
    Ok(())
}

fn storage(e: RepositoryError) -> CatalogError {
    CatalogError::StorageError(e.to_string())
}
