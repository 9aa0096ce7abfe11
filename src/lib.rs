//! Fraud Verdict Service Library
//!
//! Serves a single-page form that collects transaction attributes, resolves
//! one of several pre-trained ONNX classifiers, and renders a binary
//! fraud / not-fraud verdict, plus a dataset-profiling dashboard.

pub mod config;
pub mod dataset;
pub mod error;
pub mod features;
pub mod models;
pub mod registry;
pub mod types;
pub mod web;

pub use config::AppConfig;
pub use error::{DatasetError, PredictError};
pub use features::FeatureEncoder;
pub use models::dispatcher::{Dispatcher, Prediction};
pub use registry::ModelKind;
pub use types::{TransactionRecord, TransactionType, Verdict};
