use thiserror::Error;

/// Errors related to client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("client not found")]
    NotFound,

    #[error("national ID '{0}' is already registered to another client")]
    NationalIdConflict(String),

    #[error("invalid client: {0}")]
    Validation(String),

    #[error("client is referenced by existing appointments")]
    InUse,

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors related to the service catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("service not found")]
    NotFound,

    #[error("a service of type '{0}' already exists")]
    TypeConflict(String),

    #[error("invalid service: {0}")]
    Validation(String),

    #[error("service is referenced by existing slots or appointments")]
    InUse,

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors related to available slots.
#[derive(Debug, Error)]
pub enum SlotError {
    #[error("available slot not found")]
    NotFound,

    #[error("service not found")]
    ServiceNotFound,

    #[error("an identical unbooked slot already exists")]
    DuplicateSlot,

    #[error("slot is already booked")]
    AlreadyBooked,

    #[error("invalid slot: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors related to appointments.
#[derive(Debug, Error)]
pub enum AppointmentError {
    #[error("appointment not found")]
    NotFound,

    #[error("client not found")]
    ClientNotFound,

    #[error("service not found")]
    ServiceNotFound,

    #[error("available slot not found")]
    SlotNotFound,

    #[error("the selected slot is already booked")]
    SlotAlreadyBooked,

    #[error("appointment time {requested} does not match the slot start {slot_start}")]
    TimeMismatch {
        requested: String,
        slot_start: String,
    },

    #[error("cannot change an appointment that has already taken place")]
    PastAppointment,

    #[error("the appointment was changed by another request; reload it and retry")]
    ConcurrentChange,

    #[error("invalid appointment: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors from repository operations (used by trait definitions in barber-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}
