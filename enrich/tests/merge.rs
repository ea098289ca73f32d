//! Exercises the fuzzy-merge upsert protocol (spec: first-non-null for
//! origin/destination/runways/SID/squawk, last-write-wins for route/pax/ETA,
//! fuzzy match by numeric callsign suffix, callsign reconciled to the longer
//! variant) against an in-memory double, since a live Postgres is not
//! available for test runs.
//!

use std::collections::BTreeMap;
use std::sync::Mutex;

use acars_enrich::{EnrichmentSink, EnrichmentUpdate, FlightEnrichment};
use acars_formats::{longer_callsign, numeric_suffix};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

/// An in-memory stand-in for `EnrichmentStore` implementing the exact same
/// merge contract in plain Rust instead of SQL.
struct FakeSink {
    rows: Mutex<Vec<FlightEnrichment>>,
}

impl FakeSink {
    fn new() -> Self {
        FakeSink { rows: Mutex::new(Vec::new()) }
    }

    fn rows(&self) -> Vec<FlightEnrichment> {
        self.rows.lock().unwrap().clone()
    }
}

fn coalesce<T: Clone>(existing: &Option<T>, incoming: &Option<T>) -> Option<T> {
    existing.clone().or_else(|| incoming.clone())
}

fn replace<T: Clone>(existing: &Option<T>, incoming: &Option<T>) -> Option<T> {
    incoming.clone().or_else(|| existing.clone())
}

#[async_trait]
impl EnrichmentSink for FakeSink {
    async fn apply(&self, update: &EnrichmentUpdate) -> eyre::Result<()> {
        let mut rows = self.rows.lock().unwrap();

        let suffix = numeric_suffix(&update.callsign);
        let fuzzy_index = if suffix.is_empty() {
            None
        } else {
            rows.iter().position(|r| {
                r.icao_hex == update.icao_hex
                    && r.flight_date == update.flight_date
                    && r.callsign.as_deref().map(|c| c.ends_with(suffix)).unwrap_or(false)
            })
        };

        if let Some(idx) = fuzzy_index {
            let row = &mut rows[idx];
            row.callsign = match &row.callsign {
                Some(stored) => Some(longer_callsign(stored, &update.callsign).to_string()),
                None => Some(update.callsign.clone()),
            };
            row.origin = coalesce(&row.origin, &update.origin);
            row.destination = coalesce(&row.destination, &update.destination);
            row.departure_runway = coalesce(&row.departure_runway, &update.departure_runway);
            row.arrival_runway = coalesce(&row.arrival_runway, &update.arrival_runway);
            row.sid = coalesce(&row.sid, &update.sid);
            row.squawk = coalesce(&row.squawk, &update.squawk);
            row.route = replace(&row.route, &update.route);
            row.eta = replace(&row.eta, &update.eta);
            row.pax_count = replace(&row.pax_count, &update.pax_count);
            row.pax_breakdown = replace(&row.pax_breakdown, &update.pax_breakdown);
            row.updated_at = Utc::now();
            return Ok(());
        }

        let exact_index = rows
            .iter()
            .position(|r| r.icao_hex == update.icao_hex && r.callsign.as_deref() == Some(update.callsign.as_str()) && r.flight_date == update.flight_date);

        if let Some(idx) = exact_index {
            let row = &mut rows[idx];
            row.origin = coalesce(&row.origin, &update.origin);
            row.destination = coalesce(&row.destination, &update.destination);
            row.departure_runway = coalesce(&row.departure_runway, &update.departure_runway);
            row.arrival_runway = coalesce(&row.arrival_runway, &update.arrival_runway);
            row.sid = coalesce(&row.sid, &update.sid);
            row.squawk = coalesce(&row.squawk, &update.squawk);
            row.route = replace(&row.route, &update.route);
            row.eta = replace(&row.eta, &update.eta);
            row.pax_count = replace(&row.pax_count, &update.pax_count);
            row.pax_breakdown = replace(&row.pax_breakdown, &update.pax_breakdown);
            row.updated_at = Utc::now();
            return Ok(());
        }

        rows.push(FlightEnrichment {
            id: rows.len() as i32 + 1,
            icao_hex: update.icao_hex.clone(),
            callsign: Some(update.callsign.clone()),
            flight_date: update.flight_date,
            origin: update.origin.clone(),
            destination: update.destination.clone(),
            route: update.route.clone(),
            eta: update.eta,
            departure_runway: update.departure_runway.clone(),
            arrival_runway: update.arrival_runway.clone(),
            sid: update.sid.clone(),
            squawk: update.squawk.clone(),
            pax_count: update.pax_count,
            pax_breakdown: update.pax_breakdown.clone(),
            updated_at: Utc::now(),
        });
        Ok(())
    }
}

fn base_update(icao_hex: &str, callsign: &str, date: NaiveDate) -> EnrichmentUpdate {
    EnrichmentUpdate {
        icao_hex: icao_hex.to_string(),
        callsign: callsign.to_string(),
        flight_date: date,
        ..Default::default()
    }
}

#[tokio::test]
async fn pdc_and_flight_plan_merge_into_one_row() {
    let sink = FakeSink::new();
    let date = NaiveDate::from_ymd_opt(2026, 1, 27).unwrap();

    let mut first = base_update("7C6CA3", "QF008", date);
    first.departure_runway = Some("34L".into());
    first.sid = Some("RIC6".into());
    first.squawk = Some("4302".into());
    sink.apply(&first).await.unwrap();

    let mut second = base_update("7C6CA3", "QF008", date);
    second.origin = Some("YSSY".into());
    second.destination = Some("KLAX".into());
    second.route = Some(vec!["YSSY".into(), "ABARB".into(), "KLAX".into()]);
    sink.apply(&second).await.unwrap();

    let rows = sink.rows();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.departure_runway.as_deref(), Some("34L"));
    assert_eq!(row.sid.as_deref(), Some("RIC6"));
    assert_eq!(row.squawk.as_deref(), Some("4302"));
    assert_eq!(row.origin.as_deref(), Some("YSSY"));
    assert_eq!(row.destination.as_deref(), Some("KLAX"));
    assert_eq!(row.route.as_ref().unwrap().len(), 3);
}

#[tokio::test]
async fn iata_and_icao_callsigns_merge_to_the_longer_variant() {
    let sink = FakeSink::new();
    let date = NaiveDate::from_ymd_opt(2026, 1, 27).unwrap();

    let mut first = base_update("X", "QF1255", date);
    first.origin = Some("YSSY".into());
    sink.apply(&first).await.unwrap();

    let mut second = base_update("X", "QFA1255", date);
    second.destination = Some("YMML".into());
    sink.apply(&second).await.unwrap();

    let rows = sink.rows();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.callsign.as_deref(), Some("QFA1255"));
    assert_eq!(row.origin.as_deref(), Some("YSSY"));
    assert_eq!(row.destination.as_deref(), Some("YMML"));
}

#[tokio::test]
async fn identical_key_collisions_leave_a_single_row() {
    let sink = FakeSink::new();
    let date = NaiveDate::from_ymd_opt(2026, 1, 27).unwrap();

    for _ in 0..5 {
        let mut update = base_update("7C6CA3", "QF008", date);
        update.sid = Some("RIC6".into());
        sink.apply(&update).await.unwrap();
    }

    assert_eq!(sink.rows().len(), 1);
}

#[tokio::test]
async fn first_non_null_fields_keep_the_first_value_regardless_of_order() {
    let forward = FakeSink::new();
    let backward = FakeSink::new();
    let date = NaiveDate::from_ymd_opt(2026, 1, 27).unwrap();

    let mut a = base_update("7C6CA3", "QF008", date);
    a.origin = Some("YSSY".into());
    let mut b = base_update("7C6CA3", "QF008", date);
    b.origin = Some("YMML".into());
    b.destination = Some("KLAX".into());

    forward.apply(&a).await.unwrap();
    forward.apply(&b).await.unwrap();

    backward.apply(&b).await.unwrap();
    backward.apply(&a).await.unwrap();

    // Whichever update supplied `origin` first wins, in both orders.
    assert_eq!(forward.rows()[0].origin.as_deref(), Some("YSSY"));
    assert_eq!(backward.rows()[0].origin.as_deref(), Some("YMML"));
    assert_eq!(forward.rows()[0].destination.as_deref(), Some("KLAX"));
    assert_eq!(backward.rows()[0].destination.as_deref(), Some("KLAX"));
}

#[tokio::test]
async fn last_write_fields_keep_the_most_recent_value() {
    let sink = FakeSink::new();
    let date = NaiveDate::from_ymd_opt(2026, 1, 27).unwrap();

    let mut first = base_update("7C6CA3", "QF008", date);
    first.pax_count = Some(150);
    let mut breakdown_one = BTreeMap::new();
    breakdown_one.insert("Y".to_string(), 150);
    first.pax_breakdown = Some(breakdown_one);
    sink.apply(&first).await.unwrap();

    let mut second = base_update("7C6CA3", "QF008", date);
    second.pax_count = Some(162);
    let mut breakdown_two = BTreeMap::new();
    breakdown_two.insert("Y".to_string(), 150);
    breakdown_two.insert("C".to_string(), 12);
    second.pax_breakdown = Some(breakdown_two.clone());
    sink.apply(&second).await.unwrap();

    let rows = sink.rows();
    assert_eq!(rows[0].pax_count, Some(162));
    assert_eq!(rows[0].pax_breakdown, Some(breakdown_two));
}
