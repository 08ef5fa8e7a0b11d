//! Feature standardization matching the offline training pipeline.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Column-wise z-score parameters fitted during training and persisted
/// alongside the model. `mean` and `std` always have the same length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    std: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, std: Vec<f64>) -> Result<Self> {
        if mean.len() != std.len() {
            bail!(
                "scaler mean/std length mismatch: {} vs {}",
                mean.len(),
                std.len()
            );
        }
        Ok(Self { mean, std })
    }

    /// Number of leading feature columns this scaler was fitted on.
    pub fn n_columns(&self) -> usize {
        self.mean.len()
    }

    /// Standardizes exactly `n_columns` values. Columns with
    /// near-zero spread in the training data map to 0.0 instead of
    /// dividing by a vanishing std.
    pub fn transform(&self, values: &[f64]) -> Result<Vec<f64>> {
        if values.len() != self.n_columns() {
            bail!(
                "scaler expects {} columns, got {}",
                self.n_columns(),
                values.len()
            );
        }
        Ok(values
            .iter()
            .zip(self.mean.iter().zip(self.std.iter()))
            .map(|(&v, (&mean, &std))| {
                if std.abs() < 1e-10 {
                    0.0
                } else {
                    (v - mean) / std
                }
            })
            .collect())
    }

    /// Standardizes the first `n_columns` entries of `features` and passes
    /// the remainder through untouched. The training pipeline scales only
    /// the continuous leading columns; trailing one-hot flags stay raw.
    pub fn transform_prefix(&self, features: &[f64]) -> Result<Vec<f64>> {
        let n = self.n_columns();
        if features.len() < n {
            bail!(
                "feature vector has {} values but the scaler covers the first {}",
                features.len(),
                n
            );
        }
        let mut out = self.transform(&features[..n])?;
        out.extend_from_slice(&features[n..]);
        Ok(out)
    }
}
