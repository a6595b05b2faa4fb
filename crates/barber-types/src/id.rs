//! Entity identifiers.
//!
//! Every entity is keyed by a UUID v7 (time-sortable) wrapped in its own
//! newtype so a `SlotId` can never be passed where a `ClientId` is expected.

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new id using UUID v7.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Wrap an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

entity_id!(
    /// Identifier of a registered client.
    ClientId
);
entity_id!(
    /// Identifier of a service offering in the catalog.
    ServiceId
);
entity_id!(
    /// Identifier of an available time slot.
    SlotId
);
entity_id!(
    /// Identifier of an appointment.
    AppointmentId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_parses_back() {
        let id = SlotId::new();
        let parsed: SlotId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<ClientId>().is_err());
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = AppointmentId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }
}
