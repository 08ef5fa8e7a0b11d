//! Shared application state: the model registry loaded at startup.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::{error, info};

use crate::config::{Config, ModelsConfig};
use crate::ml::scaler::StandardScaler;
use crate::ml::ModelArtifact;

/// One registry slot. A slot that failed to load stays empty for the
/// lifetime of the process; there is no reload path.
#[derive(Debug)]
pub struct Artifact<T> {
    name: &'static str,
    inner: Option<T>,
}

impl<T> Artifact<T> {
    pub fn loaded(name: &'static str, value: T) -> Self {
        Self {
            name,
            inner: Some(value),
        }
    }

    pub fn missing(name: &'static str) -> Self {
        Self { name, inner: None }
    }

    /// Human-readable slot name, used in logs and 503 error bodies.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.is_some()
    }

    pub fn get(&self) -> Option<&T> {
        self.inner.as_ref()
    }
}

/// The three artifacts the service serves from. Loading is best-effort:
/// any slot may come up empty and the server still starts.
#[derive(Debug)]
pub struct ModelRegistry {
    pub solar_model: Artifact<ModelArtifact>,
    pub solar_scaler: Artifact<StandardScaler>,
    pub electricity_model: Artifact<ModelArtifact>,
}

impl ModelRegistry {
    pub fn load(cfg: &ModelsConfig) -> Self {
        Self {
            solar_model: load_model("solar model", &cfg.solar_model),
            solar_scaler: load_scaler("solar scaler", &cfg.solar_scaler),
            electricity_model: load_model("electricity model", &cfg.electricity_model),
        }
    }

    pub fn loaded_count(&self) -> usize {
        [
            self.solar_model.is_loaded(),
            self.solar_scaler.is_loaded(),
            self.electricity_model.is_loaded(),
        ]
        .into_iter()
        .filter(|loaded| *loaded)
        .count()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ModelRegistry>,
}

impl AppState {
    pub fn new(cfg: &Config) -> Self {
        Self {
            registry: Arc::new(ModelRegistry::load(&cfg.models)),
        }
    }
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    bincode::deserialize(&bytes).with_context(|| format!("decoding {}", path.display()))
}

fn load_model(name: &'static str, path: &Path) -> Artifact<ModelArtifact> {
    match read_artifact::<ModelArtifact>(path) {
        Ok(artifact) => {
            info!(
                slot = name,
                kind = artifact.kind(),
                model_id = %artifact.metadata.model_id,
                version = %artifact.metadata.version,
                n_features = artifact.n_features(),
                "model artifact loaded"
            );
            Artifact::loaded(name, artifact)
        }
        Err(err) => {
            error!(
                slot = name,
                path = %path.display(),
                error = ?err,
                "artifact unavailable, prediction routes that need it will answer 503"
            );
            Artifact::missing(name)
        }
    }
}

fn load_scaler(name: &'static str, path: &Path) -> Artifact<StandardScaler> {
    match read_artifact::<StandardScaler>(path) {
        Ok(scaler) => {
            info!(
                slot = name,
                columns = scaler.n_columns(),
                "scaler artifact loaded"
            );
            Artifact::loaded(name, scaler)
        }
        Err(err) => {
            error!(
                slot = name,
                path = %path.display(),
                error = ?err,
                "artifact unavailable, prediction routes that need it will answer 503"
            );
            Artifact::missing(name)
        }
    }
}
