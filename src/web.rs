//! HTTP surface: the prediction form, the profiling dashboard, and a
//! small JSON API mirroring the form flow.
//!
//! Each request is a pure function of the submitted values: form state
//! lives in the page, not in the server.

use crate::config::AppConfig;
use crate::dataset::{self, DatasetProfile};
use crate::error::PredictError;
use crate::models::dispatcher::{Dispatcher, Prediction};
use crate::registry::ModelKind;
use crate::types::transaction::{TransactionRecord, TransactionType};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Form, Router,
};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let dispatcher = Dispatcher::new(
            &config.models.artifacts_dir,
            config.models.intra_threads,
        );
        Self {
            config: Arc::new(config),
            dispatcher: Arc::new(dispatcher),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/predict", post(predict))
        .route("/dashboard", get(dashboard))
        .route("/api/health", get(api_health))
        .route("/api/models", get(api_models))
        .route("/api/predict", post(api_predict))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Raw form submission. Every field is optional text; unedited fields fall
/// back to zero / empty, matching the widget defaults.
#[derive(Debug, Default, Deserialize)]
pub struct PredictForm {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub step: String,
    #[serde(rename = "type", default)]
    pub tx_type: String,
    #[serde(default)]
    pub amount: String,
    #[serde(rename = "nameOrig", default)]
    pub name_orig: String,
    #[serde(rename = "oldbalanceOrg", default)]
    pub oldbalance_org: String,
    #[serde(rename = "newbalanceOrig", default)]
    pub newbalance_orig: String,
    #[serde(rename = "nameDest", default)]
    pub name_dest: String,
    #[serde(rename = "oldbalanceDest", default)]
    pub oldbalance_dest: String,
    #[serde(rename = "newbalanceDest", default)]
    pub newbalance_dest: String,
}

impl PredictForm {
    /// Assemble the transaction record. The numeric widgets enforce
    /// non-negative values, so anything unparseable is an unedited field
    /// and takes the default.
    pub fn to_record(&self) -> TransactionRecord {
        TransactionRecord {
            step: self.step.parse().unwrap_or_default(),
            tx_type: self
                .tx_type
                .parse::<TransactionType>()
                .unwrap_or_default(),
            amount: self.amount.parse().unwrap_or_default(),
            name_orig: self.name_orig.clone(),
            oldbalance_org: self.oldbalance_org.parse().unwrap_or_default(),
            newbalance_orig: self.newbalance_orig.parse().unwrap_or_default(),
            name_dest: self.name_dest.clone(),
            oldbalance_dest: self.oldbalance_dest.parse().unwrap_or_default(),
            newbalance_dest: self.newbalance_dest.parse().unwrap_or_default(),
        }
    }
}

/// JSON API response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

// ============================================================================
// HTML handlers
// ============================================================================

/// GET / - the prediction form
async fn index() -> impl IntoResponse {
    Html(form_page(None))
}

/// POST /predict - run one classification and re-render the form
async fn predict(State(state): State<AppState>, Form(form): Form<PredictForm>) -> impl IntoResponse {
    let kind = match form.model.parse::<ModelKind>() {
        Ok(kind) => kind,
        Err(e) => {
            warn!(model = %form.model, "Rejected prediction for unknown model");
            return Html(form_page(Some(Banner::error(&e.to_string()))));
        }
    };

    let record = form.to_record();
    match run_prediction(&state, kind, record).await {
        Ok(prediction) => {
            let message = format!(
                "Prediction ({}): {}",
                kind.display_name(),
                prediction.verdict
            );
            Html(form_page(Some(Banner::success(&message))))
        }
        Err(e) => {
            error!(model = %kind, error = %e, "Prediction failed");
            Html(form_page(Some(Banner::error(&e.to_string()))))
        }
    }
}

/// GET /dashboard - dataset profile
async fn dashboard(State(state): State<AppState>) -> impl IntoResponse {
    let path = state.config.dataset.path.clone();
    let result = tokio::task::spawn_blocking(move || dataset::profile(&path)).await;

    match result {
        Ok(Ok(profile)) => Html(dashboard_page(&profile)),
        Ok(Err(e)) => {
            warn!(error = %e, "Dashboard dataset unavailable");
            Html(page(
                "Dashboard",
                &Banner::error(&e.to_string()).render(),
            ))
        }
        Err(e) => {
            error!(error = %e, "Dashboard task panicked");
            Html(page(
                "Dashboard",
                &Banner::error("internal error").render(),
            ))
        }
    }
}

// ============================================================================
// JSON API handlers
// ============================================================================

/// GET /api/health
async fn api_health() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// Registry entry as the API reports it
#[derive(Serialize)]
struct ModelInfo {
    id: &'static str,
    name: &'static str,
    artifact: String,
}

/// GET /api/models - enumerate the registry
async fn api_models() -> impl IntoResponse {
    let models: Vec<ModelInfo> = ModelKind::ALL
        .iter()
        .map(|kind| ModelInfo {
            id: kind.as_str(),
            name: kind.display_name(),
            artifact: kind.artifact_file(),
        })
        .collect();

    Json(ApiResponse::ok(models))
}

/// POST /api/predict request body
#[derive(Deserialize)]
struct ApiPredictRequest {
    model: String,
    record: TransactionRecord,
}

/// POST /api/predict - classification with a structured response
async fn api_predict(
    State(state): State<AppState>,
    Json(request): Json<ApiPredictRequest>,
) -> impl IntoResponse {
    let kind = match request.model.parse::<ModelKind>() {
        Ok(kind) => kind,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<Prediction>::err(e.to_string())),
            )
                .into_response();
        }
    };

    match run_prediction(&state, kind, request.record).await {
        Ok(prediction) => (StatusCode::OK, Json(ApiResponse::ok(prediction))).into_response(),
        Err(e @ PredictError::MissingArtifact { .. }) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<Prediction>::err(e.to_string())),
        )
            .into_response(),
        Err(e) => {
            error!(model = %kind, error = %e, "Prediction failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Prediction>::err(e.to_string())),
            )
                .into_response()
        }
    }
}

/// Artifact load and inference are blocking file work; keep them off the
/// async runtime.
async fn run_prediction(
    state: &AppState,
    kind: ModelKind,
    record: TransactionRecord,
) -> Result<Prediction, PredictError> {
    let dispatcher = state.dispatcher.clone();
    tokio::task::spawn_blocking(move || dispatcher.predict(kind, &record))
        .await
        .map_err(|_| PredictError::Aborted)?
}

// ============================================================================
// HTML rendering
// ============================================================================

enum Banner {
    Success(String),
    Error(String),
}

impl Banner {
    fn success(text: &str) -> Self {
        Banner::Success(text.to_string())
    }

    fn error(text: &str) -> Self {
        Banner::Error(text.to_string())
    }

    fn render(&self) -> String {
        match self {
            Banner::Success(text) => format!(
                "<div class=\"banner success\">{}</div>",
                escape_html(text)
            ),
            Banner::Error(text) => {
                format!("<div class=\"banner error\">{}</div>", escape_html(text))
            }
        }
    }
}

/// Escape text interpolated into HTML.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>\n\
         body {{ font-family: sans-serif; max-width: 46rem; margin: 2rem auto; padding: 0 1rem; }}\n\
         nav a {{ margin-right: 1rem; }}\n\
         label {{ display: block; margin-top: 0.75rem; }}\n\
         input, select {{ width: 100%; padding: 0.35rem; box-sizing: border-box; }}\n\
         button {{ margin-top: 1.25rem; padding: 0.5rem 1.5rem; }}\n\
         .banner {{ padding: 0.75rem; margin: 1rem 0; border-radius: 4px; }}\n\
         .success {{ background: #e6f4ea; border: 1px solid #34a853; }}\n\
         .error {{ background: #fce8e6; border: 1px solid #ea4335; }}\n\
         table {{ border-collapse: collapse; margin-top: 1rem; }}\n\
         td, th {{ border: 1px solid #ccc; padding: 0.4rem 0.8rem; text-align: left; }}\n\
         </style>\n</head>\n<body>\n\
         <nav><a href=\"/\">Fraud Detection Model</a><a href=\"/dashboard\">Dashboard</a></nav>\n\
         <h1>{title}</h1>\n{body}\n</body>\n</html>\n"
    )
}

fn number_input(label: &str, name: &str, step: &str) -> String {
    format!(
        "<label>{label}<input type=\"number\" name=\"{name}\" min=\"0\" step=\"{step}\" value=\"0\"></label>"
    )
}

fn text_input(label: &str, name: &str) -> String {
    format!("<label>{label}<input type=\"text\" name=\"{name}\"></label>")
}

fn form_page(banner: Option<Banner>) -> String {
    let mut body = String::new();

    if let Some(banner) = banner {
        body.push_str(&banner.render());
    }

    body.push_str("<form method=\"post\" action=\"/predict\">");

    body.push_str("<label>Please select the model that you want to use<select name=\"model\">");
    for kind in ModelKind::ALL {
        let _ = write!(
            body,
            "<option value=\"{}\">{}</option>",
            kind.as_str(),
            kind.display_name()
        );
    }
    body.push_str("</select></label><hr>");

    body.push_str("<h2>Please Provide the Specific Information as Input</h2>");
    body.push_str(&number_input("Step", "step", "1"));

    body.push_str("<label>Type<select name=\"type\">");
    for ty in TransactionType::ALL {
        let _ = write!(body, "<option value=\"{0}\">{0}</option>", ty.as_str());
    }
    body.push_str("</select></label>");

    body.push_str(&number_input("Amount", "amount", "0.01"));
    body.push_str(&text_input("Name Orig", "nameOrig"));
    body.push_str(&number_input("Old Balance Orig", "oldbalanceOrg", "0.01"));
    body.push_str(&number_input("New Balance Orig", "newbalanceOrig", "0.01"));
    body.push_str(&text_input("Name Dest", "nameDest"));
    body.push_str(&number_input("Old Balance Dest", "oldbalanceDest", "0.01"));
    body.push_str(&number_input("New Balance Dest", "newbalanceDest", "0.01"));

    body.push_str("<button type=\"submit\">Predict</button></form>");

    page("Fraud Detection Model", &body)
}

fn dashboard_page(profile: &DatasetProfile) -> String {
    let mut body = String::new();

    let _ = write!(
        body,
        "<table>\
         <tr><th>Rows</th><td>{}</td></tr>\
         <tr><th>Fraudulent</th><td>{}</td></tr>\
         <tr><th>Flagged</th><td>{}</td></tr>\
         <tr><th>Fraud rate</th><td>{:.4}%</td></tr>\
         <tr><th>Amount min / mean / max</th><td>{:.2} / {:.2} / {:.2}</td></tr>\
         <tr><th>Step range</th><td>{} &ndash; {}</td></tr>\
         </table>",
        profile.rows,
        profile.fraud_count,
        profile.flagged_count,
        profile.fraud_rate * 100.0,
        profile.amount_min,
        profile.amount_mean,
        profile.amount_max,
        profile.step_min,
        profile.step_max,
    );

    body.push_str("<h2>Transactions by type</h2><table><tr><th>Type</th><th>Count</th></tr>");
    for (ty, count) in &profile.by_type {
        let _ = write!(
            body,
            "<tr><td>{}</td><td>{}</td></tr>",
            escape_html(ty),
            count
        );
    }
    body.push_str("</table>");

    page("Dashboard", &body)
}
