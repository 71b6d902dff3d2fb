use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    errors::ServiceError,
    services::analytics::{
        CategoryPerformance, PositioningPoint, ProductInsight, ProductSalesTotal, RestockRow,
        RiskBucket, StoreOverview, TrendPoint,
    },
    ApiResponse, ApiResult, AppState,
};

const MAX_HORIZON_DAYS: u32 = 365;
const DEFAULT_TOP_PRODUCTS_LIMIT: u32 = 10;
const MAX_TOP_PRODUCTS_LIMIT: u32 = 100;

/// Build the analytics Router scoped under `/api/v1`.
pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/stores", get(list_stores))
        .route("/stores/:store_id/overview", get(get_store_overview))
        .route("/stores/:store_id/trend", get(get_sales_trend))
        .route("/stores/:store_id/restock", get(get_restock_report))
        .route("/stores/:store_id/top-products", get(get_top_products))
        .route("/stores/:store_id/categories", get(get_category_performance))
        .route(
            "/stores/:store_id/risk-distribution",
            get(get_risk_distribution),
        )
        .route(
            "/stores/:store_id/positioning",
            get(get_inventory_positioning),
        )
        .route(
            "/stores/:store_id/products/:product_id",
            get(get_product_insight),
        )
}

/// Query parameters for forecast-backed reports
#[derive(Debug, Deserialize, IntoParams)]
pub struct HorizonQuery {
    /// Forecast horizon in days (defaults to the configured horizon)
    #[param(minimum = 1, maximum = 365)]
    pub horizon: Option<u32>,
}

/// Query parameters for the product ranking
#[derive(Debug, Deserialize, IntoParams)]
pub struct TopProductsQuery {
    /// Number of products to return (default: 10)
    #[param(minimum = 1, maximum = 100)]
    pub limit: Option<u32>,
}

fn resolve_horizon(state: &AppState, query: &HorizonQuery) -> Result<u32, ServiceError> {
    let horizon = query
        .horizon
        .unwrap_or(state.config.default_forecast_horizon_days);
    if horizon == 0 || horizon > MAX_HORIZON_DAYS {
        return Err(ServiceError::ValidationError(format!(
            "Horizon must be between 1 and {} days",
            MAX_HORIZON_DAYS
        )));
    }
    Ok(horizon)
}

/// List the known store ids
#[utoipa::path(
    get,
    path = "/api/v1/stores",
    responses(
        (status = 200, description = "Known store ids", body = ApiResponse<Vec<String>>)
    ),
    tag = "Analytics"
)]
pub async fn list_stores(
    State(state): State<AppState>,
) -> ApiResult<Vec<String>> {
    Ok(Json(ApiResponse::success(state.analytics.store_ids())))
}

/// Headline metrics for a store
#[utoipa::path(
    get,
    path = "/api/v1/stores/{store_id}/overview",
    params(("store_id" = String, Path, description = "Store identifier")),
    responses(
        (status = 200, description = "Store overview", body = ApiResponse<StoreOverview>),
        (status = 404, description = "Unknown store", body = crate::errors::ErrorResponse)
    ),
    tag = "Analytics"
)]
pub async fn get_store_overview(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> ApiResult<StoreOverview> {
    let overview = state.analytics.store_overview(&store_id)?;
    Ok(Json(ApiResponse::success(overview)))
}

/// Daily sales trend for a store
#[utoipa::path(
    get,
    path = "/api/v1/stores/{store_id}/trend",
    params(("store_id" = String, Path, description = "Store identifier")),
    responses(
        (status = 200, description = "Daily units sold", body = ApiResponse<Vec<TrendPoint>>),
        (status = 404, description = "Unknown store", body = crate::errors::ErrorResponse)
    ),
    tag = "Analytics"
)]
pub async fn get_sales_trend(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> ApiResult<Vec<TrendPoint>> {
    let trend = state.analytics.sales_trend(&store_id)?;
    Ok(Json(ApiResponse::success(trend)))
}

/// Stock and restock analysis for every product the store sells
#[utoipa::path(
    get,
    path = "/api/v1/stores/{store_id}/restock",
    params(
        ("store_id" = String, Path, description = "Store identifier"),
        HorizonQuery
    ),
    responses(
        (status = 200, description = "Restock report", body = ApiResponse<Vec<RestockRow>>),
        (status = 400, description = "Invalid horizon", body = crate::errors::ErrorResponse),
        (status = 404, description = "Unknown store", body = crate::errors::ErrorResponse)
    ),
    tag = "Analytics"
)]
pub async fn get_restock_report(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    Query(query): Query<HorizonQuery>,
) -> ApiResult<Vec<RestockRow>> {
    let horizon = resolve_horizon(&state, &query)?;
    let rows = state.analytics.restock_report(&store_id, horizon)?;
    Ok(Json(ApiResponse::success(rows)))
}

/// Products ranked by units sold
#[utoipa::path(
    get,
    path = "/api/v1/stores/{store_id}/top-products",
    params(
        ("store_id" = String, Path, description = "Store identifier"),
        TopProductsQuery
    ),
    responses(
        (status = 200, description = "Top products", body = ApiResponse<Vec<ProductSalesTotal>>),
        (status = 400, description = "Invalid limit", body = crate::errors::ErrorResponse),
        (status = 404, description = "Unknown store", body = crate::errors::ErrorResponse)
    ),
    tag = "Analytics"
)]
pub async fn get_top_products(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    Query(query): Query<TopProductsQuery>,
) -> ApiResult<Vec<ProductSalesTotal>> {
    let limit = query.limit.unwrap_or(DEFAULT_TOP_PRODUCTS_LIMIT);
    if limit == 0 || limit > MAX_TOP_PRODUCTS_LIMIT {
        return Err(ServiceError::ValidationError(format!(
            "Limit must be between 1 and {}",
            MAX_TOP_PRODUCTS_LIMIT
        )));
    }
    let ranked = state.analytics.top_products(&store_id, limit as usize)?;
    Ok(Json(ApiResponse::success(ranked)))
}

/// Units sold per product category
#[utoipa::path(
    get,
    path = "/api/v1/stores/{store_id}/categories",
    params(("store_id" = String, Path, description = "Store identifier")),
    responses(
        (status = 200, description = "Category performance", body = ApiResponse<Vec<CategoryPerformance>>),
        (status = 404, description = "Unknown store", body = crate::errors::ErrorResponse)
    ),
    tag = "Analytics"
)]
pub async fn get_category_performance(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> ApiResult<Vec<CategoryPerformance>> {
    let categories = state.analytics.category_performance(&store_id)?;
    Ok(Json(ApiResponse::success(categories)))
}

/// Product counts per risk label
#[utoipa::path(
    get,
    path = "/api/v1/stores/{store_id}/risk-distribution",
    params(
        ("store_id" = String, Path, description = "Store identifier"),
        HorizonQuery
    ),
    responses(
        (status = 200, description = "Risk distribution", body = ApiResponse<Vec<RiskBucket>>),
        (status = 400, description = "Invalid horizon", body = crate::errors::ErrorResponse),
        (status = 404, description = "Unknown store", body = crate::errors::ErrorResponse)
    ),
    tag = "Analytics"
)]
pub async fn get_risk_distribution(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    Query(query): Query<HorizonQuery>,
) -> ApiResult<Vec<RiskBucket>> {
    let horizon = resolve_horizon(&state, &query)?;
    let buckets = state.analytics.risk_distribution(&store_id, horizon)?;
    Ok(Json(ApiResponse::success(buckets)))
}

/// Stock vs forecast positioning per product
#[utoipa::path(
    get,
    path = "/api/v1/stores/{store_id}/positioning",
    params(
        ("store_id" = String, Path, description = "Store identifier"),
        HorizonQuery
    ),
    responses(
        (status = 200, description = "Inventory positioning", body = ApiResponse<Vec<PositioningPoint>>),
        (status = 400, description = "Invalid horizon", body = crate::errors::ErrorResponse),
        (status = 404, description = "Unknown store", body = crate::errors::ErrorResponse)
    ),
    tag = "Analytics"
)]
pub async fn get_inventory_positioning(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    Query(query): Query<HorizonQuery>,
) -> ApiResult<Vec<PositioningPoint>> {
    let horizon = resolve_horizon(&state, &query)?;
    let points = state.analytics.inventory_positioning(&store_id, horizon)?;
    Ok(Json(ApiResponse::success(points)))
}

/// Full analysis panel for one product at one store
#[utoipa::path(
    get,
    path = "/api/v1/stores/{store_id}/products/{product_id}",
    params(
        ("store_id" = String, Path, description = "Store identifier"),
        ("product_id" = String, Path, description = "Product identifier"),
        HorizonQuery
    ),
    responses(
        (status = 200, description = "Product insight", body = ApiResponse<ProductInsight>),
        (status = 400, description = "Invalid horizon", body = crate::errors::ErrorResponse),
        (status = 404, description = "Unknown store or product", body = crate::errors::ErrorResponse)
    ),
    tag = "Analytics"
)]
pub async fn get_product_insight(
    State(state): State<AppState>,
    Path((store_id, product_id)): Path<(String, String)>,
    Query(query): Query<HorizonQuery>,
) -> ApiResult<ProductInsight> {
    let horizon = resolve_horizon(&state, &query)?;
    let insight = state
        .analytics
        .product_insight(&store_id, &product_id, horizon)?;
    Ok(Json(ApiResponse::success(insight)))
}
