//! Trained model artifacts and single-row inference.
//!
//! Artifacts are produced by an offline training pipeline and persisted
//! with bincode. The server never trains; it decodes the envelope defined
//! here and calls [`ModelArtifact::predict_one`] per request.

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;

pub mod scaler;

/// Provenance recorded by the trainer. `feature_names` doubles as the
/// input arity contract for prediction requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_id: String,
    pub version: String,
    pub trained_at: chrono::DateTime<chrono::Utc>,
    pub training_samples: usize,
    pub feature_names: Vec<String>,
}

impl ModelMetadata {
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }
}

/// Plain linear regression: dot product of coefficients plus intercept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    pub fn predict_one(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.coefficients.len() {
            bail!(
                "linear model has {} coefficients, got {} features",
                self.coefficients.len(),
                features.len()
            );
        }
        let dot: f64 = self
            .coefficients
            .iter()
            .zip(features.iter())
            .map(|(c, f)| c * f)
            .sum();
        Ok(dot + self.intercept)
    }
}

/// The regressor families the trainer is allowed to emit.
#[derive(Debug, Serialize, Deserialize)]
pub enum Regressor {
    Linear(LinearModel),
    RandomForest(Box<RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>>),
}

impl Regressor {
    pub fn kind(&self) -> &'static str {
        match self {
            Regressor::Linear(_) => "LinearRegression",
            Regressor::RandomForest(_) => "RandomForestRegressor",
        }
    }

    fn predict_one(&self, features: &[f64]) -> Result<f64> {
        match self {
            Regressor::Linear(model) => model.predict_one(features),
            Regressor::RandomForest(model) => {
                let x = DenseMatrix::new(1, features.len(), features.to_vec(), false);
                let predictions = model
                    .predict(&x)
                    .map_err(|e| anyhow!("forest prediction failed: {e}"))?;
                predictions
                    .first()
                    .copied()
                    .ok_or_else(|| anyhow!("model returned no predictions"))
            }
        }
    }
}

/// On-disk envelope for a trained model: metadata plus the regressor itself.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub metadata: ModelMetadata,
    pub regressor: Regressor,
}

impl ModelArtifact {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn n_features(&self) -> usize {
        self.metadata.n_features()
    }

    pub fn kind(&self) -> &'static str {
        self.regressor.kind()
    }

    /// Predicts a single target value. The arity check is mandatory: a
    /// forest asked for a narrower row than it was trained on can panic
    /// deep inside the tree walk.
    pub fn predict_one(&self, features: &[f64]) -> Result<f64> {
        let expected = self.n_features();
        if features.len() != expected {
            bail!("expected {} features, got {}", expected, features.len());
        }
        self.regressor.predict_one(features)
    }
}
