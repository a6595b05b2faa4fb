//! Query parameter extractors for list endpoints.

use serde::Deserialize;

/// Query parameters for `GET /appointments/available-times`.
#[derive(Debug, Deserialize, Default)]
pub struct SlotQuery {
    /// `YYYY-MM-DD`. When absent every slot is listed.
    pub date: Option<String>,
}
