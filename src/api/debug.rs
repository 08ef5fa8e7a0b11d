//! Diagnostic route: reports what loaded and runs one canonical sample
//! through each model. Failures are captured per model so one broken
//! artifact cannot hide the other's report.

use anyhow::{anyhow, Result};
use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::predict::{annual_energy, round2};
use crate::ml::scaler::StandardScaler;
use crate::ml::ModelArtifact;
use crate::state::{AppState, ModelRegistry};

/// Bangalore coordinates, 30% cloud amount, south zone one-hot.
const SOLAR_SAMPLE: [f64; 8] = [12.9716, 77.5946, 30.0, 0.0, 0.0, 0.0, 1.0, 0.0];

/// Canonical electricity row. Field semantics are undocumented upstream;
/// the vector is carried verbatim as an opaque probe input.
const ELECTRICITY_SAMPLE: [f64; 9] = [3.0, 1.0, 0.0, 2.0, 1.0, 1.0, 11.0, 200.0, 7.0];

/// Fixed INR-per-kWh divisor turning the predicted bill into an estimated
/// monthly consumption. Diagnostic only; never used by the live routes.
const TARIFF_RATE_INR_PER_KWH: f64 = 7.0;

const SOLAR_EXPECTED_RANGE: &str = "1200-1500 kWh/year";
const STATUS_NOT_LOADED: &str = "Model not loaded";

#[derive(Debug, Serialize)]
pub struct DebugModelsResponse {
    solar_model: SolarDiagnostics,
    electricity_model: ElectricityDiagnostics,
}

#[derive(Debug, Default, Serialize)]
pub struct SolarDiagnostics {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    model_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    n_features: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    test_irradiance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    test_annual_kwh: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expected_range: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'static str>,
}

#[derive(Debug, Default, Serialize)]
pub struct ElectricityDiagnostics {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    model_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    n_features: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    test_bill: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    test_consumption: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'static str>,
}

/// GET /debug_models - per-model info and canonical sample predictions
pub async fn debug_models(State(state): State<AppState>) -> Json<DebugModelsResponse> {
    Json(DebugModelsResponse {
        solar_model: solar_diagnostics(&state.registry),
        electricity_model: electricity_diagnostics(&state.registry),
    })
}

fn solar_diagnostics(registry: &ModelRegistry) -> SolarDiagnostics {
    let Some(model) = registry.solar_model.get() else {
        return SolarDiagnostics {
            status: Some(STATUS_NOT_LOADED),
            ..Default::default()
        };
    };

    let mut info = SolarDiagnostics {
        model_type: Some(model.kind()),
        n_features: Some(model.n_features()),
        ..Default::default()
    };

    match solar_probe(model, registry.solar_scaler.get()) {
        Ok((irradiance, annual_kwh)) => {
            info.test_irradiance = Some(round2(irradiance));
            info.test_annual_kwh = Some(annual_kwh.round());
            info.expected_range = Some(SOLAR_EXPECTED_RANGE);
        }
        Err(err) => info.error = Some(format!("{err:#}")),
    }

    info
}

fn solar_probe(model: &ModelArtifact, scaler: Option<&StandardScaler>) -> Result<(f64, f64)> {
    let scaler = scaler.ok_or_else(|| anyhow!("solar scaler not loaded"))?;
    let scaled = scaler.transform_prefix(&SOLAR_SAMPLE)?;
    let irradiance = model.predict_one(&scaled)?;
    Ok((irradiance, annual_energy(irradiance)))
}

fn electricity_diagnostics(registry: &ModelRegistry) -> ElectricityDiagnostics {
    let Some(model) = registry.electricity_model.get() else {
        return ElectricityDiagnostics {
            status: Some(STATUS_NOT_LOADED),
            ..Default::default()
        };
    };

    let mut info = ElectricityDiagnostics {
        model_type: Some(model.kind()),
        n_features: Some(model.n_features()),
        ..Default::default()
    };

    match model.predict_one(&ELECTRICITY_SAMPLE) {
        Ok(bill) => {
            info.test_bill = Some(round2(bill));
            info.test_consumption = Some(round2(bill / TARIFF_RATE_INR_PER_KWH));
        }
        Err(err) => info.error = Some(format!("{err:#}")),
    }

    info
}
