use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ApiError;
use crate::model::EnrichmentRecord;
use crate::AppState;

const MAX_BATCH_SIZE: usize = 100;

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "time": Utc::now().to_rfc3339() }))
}

pub async fn enrichment_by_hex(
    State(state): State<AppState>,
    Path(hex): Path<String>,
) -> Result<Json<Vec<EnrichmentRecord>>, ApiError> {
    let today = Utc::now().date_naive();
    let rows = state.store.get_flight_enrichments_by_aircraft(&hex, today).await?;
    if rows.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(rows.into_iter().map(EnrichmentRecord::from).collect()))
}

pub async fn enrichment_by_flight(
    State(state): State<AppState>,
    Path((hex, callsign)): Path<(String, String)>,
) -> Result<Json<EnrichmentRecord>, ApiError> {
    let today = Utc::now().date_naive();
    fetch_one(&state, &hex, &callsign, today).await
}

pub async fn enrichment_by_flight_on_date(
    State(state): State<AppState>,
    Path((hex, callsign, date)): Path<(String, String, String)>,
) -> Result<Json<EnrichmentRecord>, ApiError> {
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest(format!("invalid date {date:?}, expected YYYY-MM-DD")))?;
    fetch_one(&state, &hex, &callsign, date).await
}

async fn fetch_one(state: &AppState, hex: &str, callsign: &str, date: NaiveDate) -> Result<Json<EnrichmentRecord>, ApiError> {
    let row = state.store.get_flight_enrichment(hex, callsign, date).await?;
    match row {
        Some(row) => Ok(Json(row.into())),
        None => Err(ApiError::NotFound),
    }
}

#[derive(Debug, Deserialize)]
pub struct BatchAircraft {
    pub icao_hex: String,
    pub callsign: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub aircraft: Vec<BatchAircraft>,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub results: BTreeMap<String, Vec<EnrichmentRecord>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, String>,
}

pub async fn enrichment_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, ApiError> {
    if request.aircraft.is_empty() {
        return Err(ApiError::BadRequest("No aircraft specified".to_string()));
    }
    if request.aircraft.len() > MAX_BATCH_SIZE {
        return Err(ApiError::BadRequest("Maximum 100 aircraft per batch request".to_string()));
    }

    let today = Utc::now().date_naive();
    let mut results = BTreeMap::new();
    let mut errors = BTreeMap::new();

    for entry in request.aircraft {
        let outcome = match &entry.callsign {
            Some(callsign) => state
                .store
                .get_flight_enrichment(&entry.icao_hex, callsign, today)
                .await
                .map(|row| row.into_iter().map(EnrichmentRecord::from).collect::<Vec<_>>()),
            None => state
                .store
                .get_flight_enrichments_by_aircraft(&entry.icao_hex, today)
                .await
                .map(|rows| rows.into_iter().map(EnrichmentRecord::from).collect::<Vec<_>>()),
        };
        match outcome {
            Ok(records) => {
                results.insert(entry.icao_hex, records);
            }
            Err(err) => {
                errors.insert(entry.icao_hex, err.to_string());
            }
        }
    }

    Ok(Json(BatchResponse { results, errors }))
}
