//! HTTP serving layer for two pre-trained energy regressors: solar
//! irradiance (with derived annual energy potential) and monthly
//! electricity bill estimation.
//!
//! Model artifacts are produced offline and loaded from disk at startup;
//! this crate only deserializes them and answers prediction requests.

pub mod api;
pub mod config;
pub mod ml;
pub mod state;
pub mod telemetry;
