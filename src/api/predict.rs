use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::error::ApiError;
use crate::state::{AppState, Artifact};

const DAYS_PER_YEAR: f64 = 365.0;
const SYSTEM_EFFICIENCY: f64 = 0.75;

const SOLAR_UNIT: &str = "kWh/year";
const BILL_UNIT: &str = "INR";

/// Prediction request body shared by both POST routes; only the expected
/// arity differs.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub features: Vec<f64>,
}

/// Solar response: annual potential for a 1 kW system plus the raw
/// irradiance (kWh/m²/day) it was derived from.
#[derive(Debug, Serialize)]
pub struct SolarPrediction {
    prediction: f64,
    irradiance: f64,
    unit: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ElectricityPrediction {
    prediction: f64,
    unit: &'static str,
}

/// POST /predict_solar - predict annual solar energy potential from an
/// 8-feature row: [lat, lon, cloud_amount, zone_c, zone_e, zone_n, zone_s, zone_w]
pub async fn predict_solar(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<PredictRequest>, ApiError>,
) -> Result<Json<SolarPrediction>, ApiError> {
    let model = require(&state.registry.solar_model)?;
    let scaler = require(&state.registry.solar_scaler)?;

    check_arity(req.features.len(), model.n_features())?;
    debug!(features = ?req.features, "solar prediction request");

    // Only the leading continuous columns are standardized; the zone
    // one-hot columns go to the model raw.
    let scaled = scaler.transform_prefix(&req.features)?;
    let irradiance = model.predict_one(&scaled)?;
    let annual_kwh = annual_energy(irradiance);

    debug!(irradiance, annual_kwh, "solar prediction");

    Ok(Json(SolarPrediction {
        prediction: round2(annual_kwh),
        irradiance: round2(irradiance),
        unit: SOLAR_UNIT,
    }))
}

/// POST /predict_electricity - predict a monthly bill in INR from a
/// 9-feature row. The row is passed to the model unscaled.
pub async fn predict_electricity(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<PredictRequest>, ApiError>,
) -> Result<Json<ElectricityPrediction>, ApiError> {
    let model = require(&state.registry.electricity_model)?;

    check_arity(req.features.len(), model.n_features())?;
    debug!(features = ?req.features, "electricity prediction request");

    let bill_amount = model.predict_one(&req.features)?;

    debug!(bill_amount, "electricity prediction");

    Ok(Json(ElectricityPrediction {
        prediction: round2(bill_amount),
        unit: BILL_UNIT,
    }))
}

/// Annual energy for a 1 kW system: daily irradiance times days/year
/// times a fixed system efficiency factor.
pub(crate) fn annual_energy(irradiance: f64) -> f64 {
    irradiance * DAYS_PER_YEAR * SYSTEM_EFFICIENCY
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn require<T>(slot: &Artifact<T>) -> Result<&T, ApiError> {
    slot.get().ok_or(ApiError::ArtifactUnavailable(slot.name()))
}

fn check_arity(got: usize, expected: usize) -> Result<(), ApiError> {
    if got != expected {
        return Err(ApiError::MalformedInput(format!(
            "expected {expected} features, got {got}"
        )));
    }
    Ok(())
}
