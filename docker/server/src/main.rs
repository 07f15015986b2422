// EcoTrace 🌱 AGPL-3.0 License

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use ecotrace_inference::{
    InferenceConfig, ModelMetadata, Predictor, RegressionModel, VERSION, VehicleProfile,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;
use utoipa::{IntoParams, OpenApi, ToSchema};

const DEFAULT_MODEL_PATH: &str = "co2_model.onnx";
const DEFAULT_PORT: &str = "3000";

// Shared application state
struct AppState {
    model: Mutex<RegressionModel>,
    predictor: Predictor,
    metadata: ModelMetadata,
    model_path: PathBuf,
}

impl AppState {
    fn load(model_path: &str, config: InferenceConfig) -> ecotrace_inference::Result<Self> {
        let predictor = Predictor::new(config)?;
        let model = RegressionModel::load_with_config(model_path, predictor.config())?;
        let metadata = model.metadata().clone();
        let model_path = model.model_path().to_path_buf();
        Ok(Self {
            model: Mutex::new(model),
            predictor,
            metadata,
            model_path,
        })
    }
}

// Vehicle to predict for
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
struct PredictParams {
    /// Vehicle make, e.g. Toyota or Mercedes_Benz
    #[param(example = "Toyota")]
    make: Option<String>,
    /// Body type: Hatchback, Sedan or Suv
    #[serde(rename = "vehicleType")]
    #[param(example = "Sedan")]
    vehicle_type: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
struct PredictResponse {
    /// Rescaled prediction, formatted with at most 3 decimals
    prediction: String,
    /// Engine size the model was queried with
    #[serde(rename = "engineSize")]
    engine_size: f64,
    /// Mileage the model was queried with
    mileage: f64,
}

#[derive(Debug, Serialize, ToSchema)]
struct ErrorResponse {
    /// Error message
    error: String,
}

#[derive(Serialize, ToSchema)]
struct InfoResponse {
    /// Path to the loaded model
    model_path: String,
    /// Artifact format (onnx or linear)
    format: String,
    /// Producer recorded in the artifact
    producer: Option<String>,
    /// Feature names in column order
    feature_names: Vec<String>,
}

#[derive(Serialize, ToSchema)]
struct HealthResponse {
    /// Server status
    status: String,
    /// API version
    version: String,
}

// OpenAPI Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "EcoTrace Inference Server",
        description = "Vehicle CO2 estimates from a regression model.\n\n`POST /predict?make=Toyota&vehicleType=Sedan`",
        version = "0.1.0",
        license(name = "AGPL-3.0")
    ),
    paths(root, health, info, predict),
    components(schemas(PredictResponse, ErrorResponse, InfoResponse, HealthResponse)),
    tags(
        (name = "inference", description = "Regression inference endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let model_path = env::var("MODEL_PATH").unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string());
    let threads = env::var("ORT_THREADS")
        .ok()
        .and_then(|t| t.parse().ok())
        .unwrap_or(0);

    tracing::info!(model = %model_path, threads, "Loading model");
    let state = AppState::load(&model_path, InferenceConfig::new().with_threads(threads))
        .inspect_err(|e| tracing::error!(error = %e, "Failed to load model"))?;
    tracing::info!(summary = %state.metadata.summary(), "Model loaded");

    let app = router(Arc::new(state));

    let port = env::var("PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string());
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/info", get(info))
        .route("/predict", post(predict))
        .route("/api-docs/openapi.json", get(openapi))
        .with_state(state)
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Root endpoint
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Welcome message", body = String)
    )
)]
async fn root() -> &'static str {
    "EcoTrace Inference Server - POST /predict?make=<make>&vehicleType=<type>. OpenAPI at /api-docs/openapi.json"
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Server is healthy", body = HealthResponse)
    )
)]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: VERSION.to_string(),
    })
}

/// Model information endpoint
#[utoipa::path(
    get,
    path = "/info",
    tag = "inference",
    responses(
        (status = 200, description = "Model information", body = InfoResponse)
    )
)]
async fn info(State(state): State<Arc<AppState>>) -> Json<InfoResponse> {
    Json(InfoResponse {
        model_path: state.model_path.display().to_string(),
        format: state.metadata.format.to_string(),
        producer: state.metadata.producer.clone(),
        feature_names: state.metadata.feature_names.clone(),
    })
}

/// Predict the CO2 figure for a vehicle
///
/// The make and body type are resolved to a representative engine size and
/// mileage before the model is queried.
#[utoipa::path(
    post,
    path = "/predict",
    tag = "inference",
    params(PredictParams),
    responses(
        (status = 200, description = "Prediction successful", body = PredictResponse),
        (status = 400, description = "Unknown or missing make or vehicle type", body = ErrorResponse),
        (status = 500, description = "Model failed to predict", body = ErrorResponse)
    )
)]
async fn predict(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PredictParams>,
) -> Result<Json<PredictResponse>, (StatusCode, Json<ErrorResponse>)> {
    tracing::debug!(?params, "Received request");

    let (Some(make), Some(vehicle_type)) = (params.make.as_deref(), params.vehicle_type.as_deref())
    else {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Invalid make or vehicle type".to_string(),
        ));
    };

    let profile = VehicleProfile::lookup(make, vehicle_type).map_err(|e| {
        tracing::warn!(make, vehicle_type, "Vehicle lookup failed");
        error_response(StatusCode::BAD_REQUEST, e.to_string())
    })?;

    let prediction = {
        let mut model = state.model.lock().await;
        state.predictor.predict_with(&mut model, &profile.features)
    }
    .map_err(|e| {
        tracing::error!(error = %e, "Prediction failed");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    tracing::info!(
        make = %profile.make,
        vehicle_type = %profile.vehicle_type,
        prediction = %prediction,
        "Sending prediction"
    );

    Ok(Json(PredictResponse {
        prediction: prediction.to_string(),
        engine_size: profile.features.engine_size,
        mileage: profile.features.mileage,
    }))
}

fn error_response(status: StatusCode, error: String) -> (StatusCode, Json<ErrorResponse>) {
    (status, Json(ErrorResponse { error }))
}
