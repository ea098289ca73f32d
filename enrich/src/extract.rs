//! Projects a dispatcher result list down to at most one partial enrichment
//! update. Only `pdc`, `flight_plan`, `loadsheet` and `eta` contribute;
//! everything else is silently skipped, matching the accessor defaults on
//! [`acars_formats::EnrichmentFields`].
//!

use acars_formats::{normalise_callsign, EnrichmentFields, ParsedMessage};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};

/// One partial update bound for the enrichment store. Every field besides the
/// key triple is optional; an update with no non-key field set is dropped
/// by the extractor before it ever reaches the store adaptor.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnrichmentUpdate {
    pub icao_hex: String,
    pub callsign: String,
    pub flight_date: NaiveDate,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub route: Option<Vec<String>>,
    pub eta: Option<DateTime<Utc>>,
    pub departure_runway: Option<String>,
    pub arrival_runway: Option<String>,
    pub sid: Option<String>,
    pub squawk: Option<String>,
    pub pax_count: Option<i32>,
    pub pax_breakdown: Option<std::collections::BTreeMap<String, i32>>,
}

impl EnrichmentUpdate {
    fn has_non_key_field(&self) -> bool {
        self.origin.is_some()
            || self.destination.is_some()
            || self.route.is_some()
            || self.eta.is_some()
            || self.departure_runway.is_some()
            || self.arrival_runway.is_some()
            || self.sid.is_some()
            || self.squawk.is_some()
            || self.pax_count.is_some()
            || self.pax_breakdown.is_some()
    }
}

/// Resolve an `HHMM` token to a UTC instant on `flight_date`, rolling over to
/// the next day when the token's minute-of-day is more than 6 hours earlier
/// than the message timestamp's minute-of-day — the common case of an ETA
/// transmitted just before local midnight for an arrival just after it.
///
fn resolve_eta(hhmm: &str, flight_date: NaiveDate, msg_timestamp: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if hhmm.len() != 4 || !hhmm.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hour: u32 = hhmm[0..2].parse().ok()?;
    let minute: u32 = hhmm[2..4].parse().ok()?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;

    let eta_minutes_of_day = hour * 60 + minute;
    let msg_minutes_of_day = (msg_timestamp.hour() * 60 + msg_timestamp.minute()) as i64;
    let rolls_over = (msg_minutes_of_day - eta_minutes_of_day as i64) > 6 * 60;

    let date = if rolls_over { flight_date.succ_opt()? } else { flight_date };
    Utc.from_local_datetime(&date.and_time(time)).single()
}

/// Build a partial update from one parsed result, the envelope's hex/callsign
/// hint and the message timestamp. Returns `None` if the result type
/// contributes nothing, the hex is absent, the callsign is empty, or no
/// non-key field ends up populated.
///
pub fn extract(
    icao_hex: Option<&str>,
    callsign_hint: Option<&str>,
    timestamp: DateTime<Utc>,
    result: &ParsedMessage,
) -> Option<EnrichmentUpdate> {
    let icao_hex = icao_hex?.to_ascii_uppercase();
    let callsign = normalise_callsign(callsign_hint?);
    if callsign.is_empty() {
        return None;
    }
    let flight_date = timestamp.date_naive();

    let mut update = EnrichmentUpdate {
        icao_hex,
        callsign,
        flight_date,
        ..Default::default()
    };

    match result {
        ParsedMessage::Pdc(r) => {
            update.origin = r.origin().map(str::to_string);
            update.destination = r.destination().map(str::to_string);
            update.departure_runway = r.departure_runway().map(str::to_string);
            update.sid = r.sid().map(str::to_string);
            update.squawk = r.squawk().map(str::to_string);
            update.route = r.route().map(|r| r.to_vec());
        }
        ParsedMessage::FlightPlan(r) => {
            update.origin = r.origin().map(str::to_string);
            update.destination = r.destination().map(str::to_string);
            let route = r.route_names();
            if !route.is_empty() {
                update.route = Some(route);
            }
        }
        ParsedMessage::Loadsheet(r) => {
            update.origin = r.origin().map(str::to_string);
            update.destination = r.destination().map(str::to_string);
            update.pax_count = r.pax_count();
            update.pax_breakdown = r.pax_breakdown().cloned();
        }
        ParsedMessage::Eta(r) => {
            update.origin = r.origin.clone();
            update.destination = r.destination.clone();
            update.eta = r.hhmm.as_deref().and_then(|h| resolve_eta(h, flight_date, timestamp));
        }
        _ => return None,
    }

    if !update.has_non_key_field() {
        return None;
    }

    Some(update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use acars_formats::{EtaResult, PdcResult};

    #[test]
    fn pdc_projects_key_fields() {
        let result = ParsedMessage::Pdc(PdcResult {
            message_id: 1,
            departure_runway: Some("34L".into()),
            sid: Some("RIC6".into()),
            squawk: Some("4302".into()),
            ..Default::default()
        });
        let ts = Utc.with_ymd_and_hms(2026, 1, 27, 3, 0, 0).unwrap();
        let update = extract(Some("7c6ca3"), Some("QF008"), ts, &result).expect("should extract");
        assert_eq!(update.icao_hex, "7C6CA3");
        assert_eq!(update.sid.as_deref(), Some("RIC6"));
    }

    #[test]
    fn no_contribution_yields_none() {
        let result = ParsedMessage::Pdc(PdcResult {
            message_id: 1,
            ..Default::default()
        });
        let ts = Utc::now();
        assert!(extract(Some("7C6CA3"), Some("QF008"), ts, &result).is_none());
    }

    #[test]
    fn eta_rolls_over_past_midnight() {
        let result = ParsedMessage::Eta(EtaResult {
            message_id: 1,
            hhmm: Some("0015".into()),
            ..Default::default()
        });
        let ts = Utc.with_ymd_and_hms(2026, 1, 27, 23, 50, 0).unwrap();
        let update = extract(Some("7C6CA3"), Some("QF008"), ts, &result).expect("should extract");
        let eta = update.eta.expect("eta set");
        assert_eq!(eta.date_naive(), NaiveDate::from_ymd_opt(2026, 1, 28).unwrap());
    }

    #[test]
    fn missing_callsign_yields_none() {
        let result = ParsedMessage::Pdc(PdcResult {
            message_id: 1,
            sid: Some("RIC6".into()),
            ..Default::default()
        });
        assert!(extract(Some("7C6CA3"), None, Utc::now(), &result).is_none());
    }
}
