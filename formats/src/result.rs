//! The closed set of parser result types and the accessor-capability trait
//! the enrichment extractor consumes instead of reflecting over JSON.
//!

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Every field an enrichment update might pull out of a parser result.
/// Parsers that have nothing to say about a field simply inherit the `None`
/// default rather than a dedicated "absent" parser being written for it.
///
pub trait EnrichmentFields {
    fn origin(&self) -> Option<&str> {
        None
    }
    fn destination(&self) -> Option<&str> {
        None
    }
    fn departure_runway(&self) -> Option<&str> {
        None
    }
    fn arrival_runway(&self) -> Option<&str> {
        None
    }
    fn sid(&self) -> Option<&str> {
        None
    }
    fn squawk(&self) -> Option<&str> {
        None
    }
    fn route(&self) -> Option<&[String]> {
        None
    }
    fn pax_count(&self) -> Option<i32> {
        None
    }
    fn pax_breakdown(&self) -> Option<&BTreeMap<String, i32>> {
        None
    }
}

/// Pre-Departure Clearance: flight number, origin/destination, runway, SID
/// (including word-numbered variants), squawk, departure frequency, assigned
/// flight level. Missing fields are reported as such; partial results are
/// valid as long as at least one field was pulled.
///
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PdcResult {
    pub message_id: u64,
    pub flight_number: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub runway: Option<String>,
    pub sid: Option<String>,
    pub squawk: Option<String>,
    pub dep_freq: Option<String>,
    pub assigned_fl: Option<String>,
    pub route: Option<Vec<String>>,
}

impl EnrichmentFields for PdcResult {
    fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }
    fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }
    fn departure_runway(&self) -> Option<&str> {
        self.runway.as_deref()
    }
    fn sid(&self) -> Option<&str> {
        self.sid.as_deref()
    }
    fn squawk(&self) -> Option<&str> {
        self.squawk.as_deref()
    }
    fn route(&self) -> Option<&[String]> {
        self.route.as_deref()
    }
}

/// One decoded position fix: coordinates, altitude, speed. Shared shape
/// across the seven position-bearing labels (`80`, `16`, `21`, `22`, `83`,
/// `10`, `4J`); `source_label` records which one produced it.
///
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PositionResult {
    pub message_id: u64,
    pub source_label: String,
    pub lat: f64,
    pub lon: f64,
    pub altitude_ft: Option<i32>,
    pub speed_kt: Option<i32>,
    pub track_deg: Option<f64>,
}

impl EnrichmentFields for PositionResult {}

/// A single flight-plan waypoint, with optional per-leg constraints.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WaypointConstraint {
    pub name: String,
    pub altitude_ft: Option<i32>,
    pub speed_kt: Option<i32>,
}

/// `H1 FPN/...` flight plan: origin, destination, ordered waypoint list.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct FlightPlanResult {
    pub message_id: u64,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub waypoints: Vec<WaypointConstraint>,
}

impl FlightPlanResult {
    pub fn route_names(&self) -> Vec<String> {
        self.waypoints.iter().map(|w| w.name.clone()).collect()
    }
}

impl EnrichmentFields for FlightPlanResult {
    fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }
    fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }
    // `route()` needs owned storage for a borrowed slice; callers that need
    // the route for enrichment use `route_names()` directly (see acars-enrich).
}

/// Loadsheet: origin/destination, passenger count and optional class
/// breakdown.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct LoadsheetResult {
    pub message_id: u64,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub pax_count: Option<i32>,
    pub pax_breakdown: Option<BTreeMap<String, i32>>,
}

impl EnrichmentFields for LoadsheetResult {
    fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }
    fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }
    fn pax_count(&self) -> Option<i32> {
        self.pax_count
    }
    fn pax_breakdown(&self) -> Option<&BTreeMap<String, i32>> {
        self.pax_breakdown.as_ref()
    }
}

/// ETA message: origin/destination plus the raw `HHMM` token. Absolute-instant
/// resolution is deferred to the enrichment extractor, which has the message
/// timestamp needed to roll the token onto a date (see `acars-enrich`).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct EtaResult {
    pub message_id: u64,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub hhmm: Option<String>,
}

impl EnrichmentFields for EtaResult {
    fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }
    fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }
}

/// One climb/descent wind entry: altitude band, direction, speed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WindEntry {
    pub altitude_ft: i32,
    pub direction_deg: u16,
    pub speed_kt: u16,
}

/// One en-route wind entry at a named waypoint and flight level.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EnrouteWindEntry {
    pub waypoint: String,
    pub flight_level: u16,
    pub direction_deg: u16,
    pub speed_kt: u16,
    pub temperature_c: Option<i16>,
}

/// Predicted Wind Information (`H1 PWI` / `H2`): climb, en-route, descent.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct WindForecastResult {
    pub message_id: u64,
    pub climb: Vec<WindEntry>,
    pub enroute: Vec<EnrouteWindEntry>,
    pub descent: Vec<WindEntry>,
}

impl EnrichmentFields for WindForecastResult {}

/// ADS-C meteorological block (tag 16).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MetBlock {
    pub wind_direction_deg: u16,
    pub wind_speed_kt: u16,
    pub temperature_c: i16,
}

/// ADS-C (`B6`): TLV binary decode — position, met block, earth/air
/// reference, predicted route, flight-id, airframe-id.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct AdscResult {
    pub message_id: u64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub altitude_ft: Option<i32>,
    pub met: Option<MetBlock>,
    pub earth_reference: Option<String>,
    pub air_reference: Option<String>,
    pub predicted_route: Option<Vec<String>>,
    pub flight_id: Option<String>,
    pub airframe_id: Option<String>,
}

impl EnrichmentFields for AdscResult {}

/// CPDLC application message: decoded element identifier and its
/// human-readable value. Unsupported elements yield an explicit placeholder
/// string rather than failing the decode.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CpdlcResult {
    pub message_id: u64,
    pub element_id: u32,
    pub element_label: String,
    pub value: String,
}

impl EnrichmentFields for CpdlcResult {}

/// CPDLC connection-management variant.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CpdlcConnectKind {
    /// `CR1`: connection request.
    ConnectRequest,
    /// `CC1`: connection confirm.
    ConnectConfirm,
    /// `DR1`: disconnect request.
    DisconnectRequest,
}

/// CPDLC connection-management message (`CR1`/`CC1`/`DR1`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CpdlcConnectResult {
    pub message_id: u64,
    pub kind: CpdlcConnectKind,
    pub detail: Option<String>,
}

impl EnrichmentFields for CpdlcConnectResult {}

/// Media advisory free-text message (e.g. weather links, company messages).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MediaAdvisoryResult {
    pub message_id: u64,
    pub text: String,
}

impl EnrichmentFields for MediaAdvisoryResult {}

/// Oceanic clearance (`B2`): destination, NAT-style fix list, cleared flight
/// level and Mach number.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct OceanicClearanceResult {
    pub message_id: u64,
    pub destination: Option<String>,
    pub fixes: Vec<String>,
    pub cleared_fl: Option<String>,
    pub mach: Option<String>,
}

impl EnrichmentFields for OceanicClearanceResult {}

/// A single named-waypoint position report (as opposed to the raw lat/lon
/// position families).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WaypointPositionResult {
    pub message_id: u64,
    pub waypoint: String,
    pub eta_hhmm: Option<String>,
}

impl EnrichmentFields for WaypointPositionResult {}

/// Turbulence report: severity and a free-text location description.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TurbulenceResult {
    pub message_id: u64,
    pub severity: Option<String>,
    pub location: Option<String>,
}

impl EnrichmentFields for TurbulenceResult {}

/// Weather report, kept as the raw decoded text (free-form METAR-like body).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeatherResult {
    pub message_id: u64,
    pub raw: String,
}

impl EnrichmentFields for WeatherResult {}

/// ATIS observation: airport, letter, decoded body.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AtisResult {
    pub message_id: u64,
    pub airport: String,
    pub letter: char,
    pub issue_time: Option<String>,
    pub body: String,
}

impl EnrichmentFields for AtisResult {}

/// Landing data: runway in use and fuel remaining, as reported post-arrival.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LandingDataResult {
    pub message_id: u64,
    pub runway: Option<String>,
    pub fuel: Option<String>,
}

impl EnrichmentFields for LandingDataResult {
    fn arrival_runway(&self) -> Option<&str> {
        self.runway.as_deref()
    }
}

/// Gate assignment advisory.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GateAssignmentResult {
    pub message_id: u64,
    pub gate: Option<String>,
}

impl EnrichmentFields for GateAssignmentResult {}

/// The closed sum of everything a parser can produce. Every variant carries
/// its originating message id for join-back to the raw message table.
///
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind")]
pub enum ParsedMessage {
    Pdc(PdcResult),
    Position(PositionResult),
    FlightPlan(FlightPlanResult),
    Loadsheet(LoadsheetResult),
    Eta(EtaResult),
    Pwi(WindForecastResult),
    Adsc(AdscResult),
    Cpdlc(CpdlcResult),
    CpdlcConnect(CpdlcConnectResult),
    MediaAdvisory(MediaAdvisoryResult),
    OceanicClearance(OceanicClearanceResult),
    WaypointPosition(WaypointPositionResult),
    Turbulence(TurbulenceResult),
    Weather(WeatherResult),
    Atis(AtisResult),
    LandingData(LandingDataResult),
    GateAssignment(GateAssignmentResult),
}

impl ParsedMessage {
    /// Stable type tag used as the analytic store's `parser_type` column.
    pub fn type_tag(&self) -> &'static str {
        match self {
            ParsedMessage::Pdc(_) => "pdc",
            ParsedMessage::Position(_) => "position",
            ParsedMessage::FlightPlan(_) => "flight_plan",
            ParsedMessage::Loadsheet(_) => "loadsheet",
            ParsedMessage::Eta(_) => "eta",
            ParsedMessage::Pwi(_) => "pwi",
            ParsedMessage::Adsc(_) => "adsc",
            ParsedMessage::Cpdlc(_) => "cpdlc",
            ParsedMessage::CpdlcConnect(_) => "cpdlc_connect",
            ParsedMessage::MediaAdvisory(_) => "media_advisory",
            ParsedMessage::OceanicClearance(_) => "oceanic_clearance",
            ParsedMessage::WaypointPosition(_) => "waypoint_position",
            ParsedMessage::Turbulence(_) => "turbulence",
            ParsedMessage::Weather(_) => "weather",
            ParsedMessage::Atis(_) => "atis",
            ParsedMessage::LandingData(_) => "landing_data",
            ParsedMessage::GateAssignment(_) => "gate_assignment",
        }
    }

    pub fn message_id(&self) -> u64 {
        match self {
            ParsedMessage::Pdc(r) => r.message_id,
            ParsedMessage::Position(r) => r.message_id,
            ParsedMessage::FlightPlan(r) => r.message_id,
            ParsedMessage::Loadsheet(r) => r.message_id,
            ParsedMessage::Eta(r) => r.message_id,
            ParsedMessage::Pwi(r) => r.message_id,
            ParsedMessage::Adsc(r) => r.message_id,
            ParsedMessage::Cpdlc(r) => r.message_id,
            ParsedMessage::CpdlcConnect(r) => r.message_id,
            ParsedMessage::MediaAdvisory(r) => r.message_id,
            ParsedMessage::OceanicClearance(r) => r.message_id,
            ParsedMessage::WaypointPosition(r) => r.message_id,
            ParsedMessage::Turbulence(r) => r.message_id,
            ParsedMessage::Weather(r) => r.message_id,
            ParsedMessage::Atis(r) => r.message_id,
            ParsedMessage::LandingData(r) => r.message_id,
            ParsedMessage::GateAssignment(r) => r.message_id,
        }
    }
}

/// Forwards to whichever variant is inside; variants with no opinion on a
/// field (and every field `PdcResult`/`FlightPlanResult`/etc. don't
/// override) fall through to the trait's own `None` default.
///
impl EnrichmentFields for ParsedMessage {
    fn origin(&self) -> Option<&str> {
        match self {
            ParsedMessage::Pdc(r) => r.origin(),
            ParsedMessage::FlightPlan(r) => r.origin(),
            ParsedMessage::Loadsheet(r) => r.origin(),
            ParsedMessage::Eta(r) => r.origin(),
            _ => None,
        }
    }

    fn destination(&self) -> Option<&str> {
        match self {
            ParsedMessage::Pdc(r) => r.destination(),
            ParsedMessage::FlightPlan(r) => r.destination(),
            ParsedMessage::Loadsheet(r) => r.destination(),
            ParsedMessage::Eta(r) => r.destination(),
            ParsedMessage::OceanicClearance(r) => r.destination.as_deref(),
            _ => None,
        }
    }

    fn departure_runway(&self) -> Option<&str> {
        match self {
            ParsedMessage::Pdc(r) => r.departure_runway(),
            _ => None,
        }
    }

    fn arrival_runway(&self) -> Option<&str> {
        match self {
            ParsedMessage::LandingData(r) => r.arrival_runway(),
            _ => None,
        }
    }

    fn sid(&self) -> Option<&str> {
        match self {
            ParsedMessage::Pdc(r) => r.sid(),
            _ => None,
        }
    }

    fn squawk(&self) -> Option<&str> {
        match self {
            ParsedMessage::Pdc(r) => r.squawk(),
            _ => None,
        }
    }

    fn route(&self) -> Option<&[String]> {
        match self {
            ParsedMessage::Pdc(r) => r.route(),
            _ => None,
        }
    }

    fn pax_count(&self) -> Option<i32> {
        match self {
            ParsedMessage::Loadsheet(r) => r.pax_count(),
            _ => None,
        }
    }

    fn pax_breakdown(&self) -> Option<&BTreeMap<String, i32>> {
        match self {
            ParsedMessage::Loadsheet(r) => r.pax_breakdown(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_tag_matches_variant() {
        let r = ParsedMessage::Pdc(PdcResult {
            message_id: 1,
            ..Default::default()
        });
        assert_eq!(r.type_tag(), "pdc");
        assert_eq!(r.message_id(), 1);
    }
}
