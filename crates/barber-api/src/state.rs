//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! Services are generic over repository and clock traits; AppState pins them
//! to the SQLite repositories and the system clock.

use std::path::PathBuf;
use std::sync::Arc;

use barber_core::service::appointment::AppointmentService;
use barber_core::service::catalog::CatalogService;
use barber_core::service::client::ClientService;
use barber_core::service::slot::SlotService;
use barber_infra::clock::SystemClock;
use barber_infra::config::load_config;
use barber_infra::resolve_data_dir;
use barber_infra::sqlite::appointment::SqliteAppointmentRepository;
use barber_infra::sqlite::catalog::SqliteServiceOfferingRepository;
use barber_infra::sqlite::client::SqliteClientRepository;
use barber_infra::sqlite::pool::{DatabasePool, default_database_url};
use barber_infra::sqlite::slot::SqliteSlotRepository;
use barber_types::config::BarberConfig;

pub type ConcreteClientService = ClientService<SqliteClientRepository>;

pub type ConcreteCatalogService = CatalogService<SqliteServiceOfferingRepository>;

pub type ConcreteSlotService =
    SlotService<SqliteSlotRepository, SqliteServiceOfferingRepository, SystemClock>;

pub type ConcreteAppointmentService = AppointmentService<
    SqliteAppointmentRepository,
    SqliteClientRepository,
    SqliteServiceOfferingRepository,
    SqliteSlotRepository,
    SystemClock,
>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub client_service: Arc<ConcreteClientService>,
    pub catalog_service: Arc<ConcreteCatalogService>,
    pub slot_service: Arc<ConcreteSlotService>,
    pub appointment_service: Arc<ConcreteAppointmentService>,
    pub config: Arc<BarberConfig>,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Resolve the data directory, load config, open the database, and wire
    /// the services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;
        let db_pool = DatabasePool::new(&default_database_url(&data_dir)).await?;

        Ok(Self::from_pool(db_pool, config, data_dir))
    }

    /// Wire the services over an already-open pool.
    pub fn from_pool(db_pool: DatabasePool, config: BarberConfig, data_dir: PathBuf) -> Self {
        let clients = || SqliteClientRepository::new(db_pool.clone());
        let offerings = || SqliteServiceOfferingRepository::new(db_pool.clone());
        let slots = || SqliteSlotRepository::new(db_pool.clone());

        let client_service = ClientService::new(clients());
        let catalog_service = CatalogService::new(offerings());
        let slot_service = SlotService::new(slots(), offerings(), SystemClock);
        let appointment_service = AppointmentService::new(
            SqliteAppointmentRepository::new(db_pool.clone()),
            clients(),
            offerings(),
            slots(),
            SystemClock,
        );

        Self {
            client_service: Arc::new(client_service),
            catalog_service: Arc::new(catalog_service),
            slot_service: Arc::new(slot_service),
            appointment_service: Arc::new(appointment_service),
            config: Arc::new(config),
            data_dir,
            db_pool,
        }
    }
}
