//! Response DTOs: RFC3339 for `last_updated`, `HH:MM` for `eta`, `YYYY-MM-DD`
//! for `flight_date`, empty optional fields omitted.
//!

use std::collections::BTreeMap;

use acars_enrich::FlightEnrichment;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct EnrichmentRecord {
    pub icao_hex: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callsign: Option<String>,
    pub flight_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eta: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_runway: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_runway: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub squawk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pax_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pax_breakdown: Option<BTreeMap<String, i32>>,
    pub last_updated: String,
}

impl From<FlightEnrichment> for EnrichmentRecord {
    fn from(row: FlightEnrichment) -> Self {
        EnrichmentRecord {
            icao_hex: row.icao_hex,
            callsign: row.callsign,
            flight_date: row.flight_date.format("%Y-%m-%d").to_string(),
            origin: row.origin,
            destination: row.destination,
            route: row.route,
            eta: row.eta.map(|t| t.format("%H:%M").to_string()),
            departure_runway: row.departure_runway,
            arrival_runway: row.arrival_runway,
            sid: row.sid,
            squawk: row.squawk,
            pax_count: row.pax_count,
            pax_breakdown: row.pax_breakdown,
            last_updated: row.updated_at.to_rfc3339(),
        }
    }
}
