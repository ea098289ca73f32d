//! Transactional store adaptor: the fuzzy-merge upsert protocol against the
//! `flight_enrichment` table, plus the two read paths.
//!

use acars_formats::{longer_callsign, numeric_suffix};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use sqlx::{PgPool, Row};

use crate::extract::EnrichmentUpdate;

/// The fuzzy-merge upsert contract, abstracted so the merge protocol can be
/// exercised in tests against an in-memory double without a live Postgres.
#[async_trait]
pub trait EnrichmentSink: Send + Sync {
    async fn apply(&self, update: &EnrichmentUpdate) -> eyre::Result<()>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct FlightEnrichment {
    pub id: i32,
    pub icao_hex: String,
    pub callsign: Option<String>,
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
    pub updated_at: DateTime<Utc>,
}

fn row_to_enrichment(row: &sqlx::postgres::PgRow) -> FlightEnrichment {
    let route: Option<Value> = row.get("route");
    let pax_breakdown: Option<Value> = row.get("pax_breakdown");
    FlightEnrichment {
        id: row.get("id"),
        icao_hex: row.get("icao_hex"),
        callsign: row.get("callsign"),
        flight_date: row.get("flight_date"),
        origin: row.get("origin"),
        destination: row.get("destination"),
        route: route.and_then(|v| serde_json::from_value(v).ok()),
        eta: row.get("eta"),
        departure_runway: row.get("departure_runway"),
        arrival_runway: row.get("arrival_runway"),
        sid: row.get("sid"),
        squawk: row.get("squawk"),
        pax_count: row.get("pax_count"),
        pax_breakdown: pax_breakdown.and_then(|v| serde_json::from_value(v).ok()),
        updated_at: row.get("updated_at"),
    }
}

pub struct EnrichmentStore {
    pool: PgPool,
}

impl EnrichmentStore {
    pub fn new(pool: PgPool) -> Self {
        EnrichmentStore { pool }
    }

    pub async fn migrate(&self) -> eyre::Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Apply the fuzzy-merge upsert protocol: discover a fuzzy-matched row by
    /// numeric suffix, reconcile the callsign to the longer variant, then
    /// write via a single `COALESCE(new, old)` statement — UPDATE by id if a
    /// fuzzy match was found, otherwise INSERT with an `ON CONFLICT` clause
    /// applying the same merge policy.
    ///
    pub async fn apply(&self, update: &EnrichmentUpdate) -> eyre::Result<()> {
        let route_json = update.route.as_ref().map(|r| serde_json::to_value(r)).transpose()?;
        let pax_json = update
            .pax_breakdown
            .as_ref()
            .map(serde_json::to_value)
            .transpose()?;

        let suffix = numeric_suffix(&update.callsign);
        let fuzzy_match = if suffix.is_empty() {
            None
        } else {
            sqlx::query(
                "select id, callsign from flight_enrichment \
                 where icao_hex = $1 and flight_date = $2 and callsign like '%' || $3",
            )
            .bind(&update.icao_hex)
            .bind(update.flight_date)
            .bind(suffix)
            .fetch_optional(&self.pool)
            .await?
        };

        if let Some(row) = fuzzy_match {
            let id: i32 = row.get("id");
            let stored_callsign: Option<String> = row.get("callsign");
            let callsign = match stored_callsign {
                Some(stored) => longer_callsign(&stored, &update.callsign).to_string(),
                None => update.callsign.clone(),
            };

            sqlx::query(
                "update flight_enrichment set \
                   callsign = $2, \
                   origin = coalesce(origin, $3), \
                   destination = coalesce(destination, $4), \
                   departure_runway = coalesce(departure_runway, $5), \
                   arrival_runway = coalesce(arrival_runway, $6), \
                   sid = coalesce(sid, $7), \
                   squawk = coalesce(squawk, $8), \
                   route = coalesce($9, route), \
                   eta = coalesce($10, eta), \
                   pax_count = coalesce($11, pax_count), \
                   pax_breakdown = coalesce($12, pax_breakdown), \
                   updated_at = now() \
                 where id = $1",
            )
            .bind(id)
            .bind(callsign)
            .bind(&update.origin)
            .bind(&update.destination)
            .bind(&update.departure_runway)
            .bind(&update.arrival_runway)
            .bind(&update.sid)
            .bind(&update.squawk)
            .bind(route_json)
            .bind(update.eta)
            .bind(update.pax_count)
            .bind(pax_json)
            .execute(&self.pool)
            .await?;
            return Ok(());
        }

        sqlx::query(
            "insert into flight_enrichment \
               (icao_hex, callsign, flight_date, origin, destination, \
                departure_runway, arrival_runway, sid, squawk, route, eta, \
                pax_count, pax_breakdown) \
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             on conflict (icao_hex, callsign, flight_date) do update set \
               origin = coalesce(flight_enrichment.origin, excluded.origin), \
               destination = coalesce(flight_enrichment.destination, excluded.destination), \
               departure_runway = coalesce(flight_enrichment.departure_runway, excluded.departure_runway), \
               arrival_runway = coalesce(flight_enrichment.arrival_runway, excluded.arrival_runway), \
               sid = coalesce(flight_enrichment.sid, excluded.sid), \
               squawk = coalesce(flight_enrichment.squawk, excluded.squawk), \
               route = coalesce(excluded.route, flight_enrichment.route), \
               eta = coalesce(excluded.eta, flight_enrichment.eta), \
               pax_count = coalesce(excluded.pax_count, flight_enrichment.pax_count), \
               pax_breakdown = coalesce(excluded.pax_breakdown, flight_enrichment.pax_breakdown), \
               updated_at = now()",
        )
        .bind(&update.icao_hex)
        .bind(&update.callsign)
        .bind(update.flight_date)
        .bind(&update.origin)
        .bind(&update.destination)
        .bind(&update.departure_runway)
        .bind(&update.arrival_runway)
        .bind(&update.sid)
        .bind(&update.squawk)
        .bind(route_json)
        .bind(update.eta)
        .bind(update.pax_count)
        .bind(pax_json)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// `callsign` with a numeric suffix matches fuzzily (any stored callsign
    /// ending in that suffix); otherwise exact match. At most one row.
    pub async fn get_flight_enrichment(
        &self,
        icao_hex: &str,
        callsign: &str,
        flight_date: NaiveDate,
    ) -> eyre::Result<Option<FlightEnrichment>> {
        let suffix = numeric_suffix(callsign);
        let row = if suffix.is_empty() {
            sqlx::query(
                "select * from flight_enrichment where icao_hex = $1 and callsign = $2 and flight_date = $3",
            )
            .bind(icao_hex)
            .bind(callsign)
            .bind(flight_date)
            .fetch_optional(&self.pool)
            .await?
        } else {
            sqlx::query(
                "select * from flight_enrichment \
                 where icao_hex = $1 and flight_date = $2 and callsign like '%' || $3",
            )
            .bind(icao_hex)
            .bind(flight_date)
            .bind(suffix)
            .fetch_optional(&self.pool)
            .await?
        };
        Ok(row.as_ref().map(row_to_enrichment))
    }

    /// All rows for `icao_hex` on `flight_date`, most-recently-updated first.
    pub async fn get_flight_enrichments_by_aircraft(
        &self,
        icao_hex: &str,
        flight_date: NaiveDate,
    ) -> eyre::Result<Vec<FlightEnrichment>> {
        let rows = sqlx::query(
            "select * from flight_enrichment \
             where icao_hex = $1 and flight_date = $2 order by updated_at desc",
        )
        .bind(icao_hex)
        .bind(flight_date)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(row_to_enrichment).collect())
    }
}

#[async_trait]
impl EnrichmentSink for EnrichmentStore {
    async fn apply(&self, update: &EnrichmentUpdate) -> eyre::Result<()> {
        EnrichmentStore::apply(self, update).await
    }
}
