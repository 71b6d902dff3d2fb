use axum::{extract::State, response::Json, routing::put, Router};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    errors::ServiceError,
    models::{InventoryRecord, ProductRecord, PromotionRecord, SalesRecord},
    ApiResponse, ApiResult, AppState,
};

/// Build the dataset ingestion Router scoped under `/api/v1`.
pub fn dataset_routes() -> Router<AppState> {
    Router::new()
        .route("/datasets/sales", put(load_sales))
        .route("/datasets/inventory", put(load_inventory))
        .route("/datasets/products", put(load_products))
        .route("/datasets/promotions", put(load_promotions))
}

/// Outcome of a dataset replacement.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DatasetLoadSummary {
    pub table: String,
    pub records_loaded: usize,
}

/// Validate every record, reporting the first few offenders by index.
fn validate_records<T: Validate>(table: &str, records: &[T]) -> Result<(), ServiceError> {
    let mut failures: Vec<String> = Vec::new();
    for (index, record) in records.iter().enumerate() {
        if let Err(errors) = record.validate() {
            failures.push(format!("record {}: {}", index, errors));
            if failures.len() == 5 {
                break;
            }
        }
    }
    if failures.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::ValidationError(format!(
            "{} dataset rejected: {}",
            table,
            failures.join("; ")
        )))
    }
}

/// Replace the sales dataset
#[utoipa::path(
    put,
    path = "/api/v1/datasets/sales",
    request_body = Vec<SalesRecord>,
    responses(
        (status = 200, description = "Sales dataset replaced", body = ApiResponse<DatasetLoadSummary>),
        (status = 400, description = "One or more records failed validation", body = crate::errors::ErrorResponse)
    ),
    tag = "Datasets"
)]
pub async fn load_sales(
    State(state): State<AppState>,
    Json(records): Json<Vec<SalesRecord>>,
) -> ApiResult<DatasetLoadSummary> {
    validate_records("sales", &records)?;
    let records_loaded = state.dataset.replace_sales(records);
    info!(records_loaded, "sales dataset replaced");
    Ok(Json(ApiResponse::success(DatasetLoadSummary {
        table: "sales".to_string(),
        records_loaded,
    })))
}

/// Replace the inventory dataset
#[utoipa::path(
    put,
    path = "/api/v1/datasets/inventory",
    request_body = Vec<InventoryRecord>,
    responses(
        (status = 200, description = "Inventory dataset replaced", body = ApiResponse<DatasetLoadSummary>),
        (status = 400, description = "One or more records failed validation", body = crate::errors::ErrorResponse)
    ),
    tag = "Datasets"
)]
pub async fn load_inventory(
    State(state): State<AppState>,
    Json(records): Json<Vec<InventoryRecord>>,
) -> ApiResult<DatasetLoadSummary> {
    validate_records("inventory", &records)?;
    let records_loaded = state.dataset.replace_inventory(records);
    info!(records_loaded, "inventory dataset replaced");
    Ok(Json(ApiResponse::success(DatasetLoadSummary {
        table: "inventory".to_string(),
        records_loaded,
    })))
}

/// Replace the product catalog
#[utoipa::path(
    put,
    path = "/api/v1/datasets/products",
    request_body = Vec<ProductRecord>,
    responses(
        (status = 200, description = "Product catalog replaced", body = ApiResponse<DatasetLoadSummary>),
        (status = 400, description = "One or more records failed validation", body = crate::errors::ErrorResponse)
    ),
    tag = "Datasets"
)]
pub async fn load_products(
    State(state): State<AppState>,
    Json(records): Json<Vec<ProductRecord>>,
) -> ApiResult<DatasetLoadSummary> {
    validate_records("products", &records)?;
    let records_loaded = state.dataset.replace_products(records);
    info!(records_loaded, "product catalog replaced");
    Ok(Json(ApiResponse::success(DatasetLoadSummary {
        table: "products".to_string(),
        records_loaded,
    })))
}

/// Replace the promotion schedule
#[utoipa::path(
    put,
    path = "/api/v1/datasets/promotions",
    request_body = Vec<PromotionRecord>,
    responses(
        (status = 200, description = "Promotion schedule replaced", body = ApiResponse<DatasetLoadSummary>),
        (status = 400, description = "One or more records failed validation", body = crate::errors::ErrorResponse)
    ),
    tag = "Datasets"
)]
pub async fn load_promotions(
    State(state): State<AppState>,
    Json(records): Json<Vec<PromotionRecord>>,
) -> ApiResult<DatasetLoadSummary> {
    validate_records("promotions", &records)?;
    let records_loaded = state.dataset.replace_promotions(records);
    info!(records_loaded, "promotion schedule replaced");
    Ok(Json(ApiResponse::success(DatasetLoadSummary {
        table: "promotions".to_string(),
        records_loaded,
    })))
}
