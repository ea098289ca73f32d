//! The wrapped bus record: timestamp, aircraft hex, optional tail/flight
//! hint, and the nested raw label+text message. Unknown fields are ignored
//! by default serde behaviour — no `deny_unknown_fields`.
//!

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct BusMessage {
    pub label: String,
    pub text: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BusEnvelope {
    pub timestamp: DateTime<Utc>,
    pub icao_hex: String,
    pub tail: Option<String>,
    pub flight_hint: Option<String>,
    pub message: BusMessage,
}
