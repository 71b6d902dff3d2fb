use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{errors, handlers, models, services::analytics as reports};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "StockSense API",
        version = "0.1.0",
        description = r#"
# StockSense Inventory Intelligence API

Computes short-horizon demand forecasts, stock risk classifications, and
reorder recommendations per store and product from an ingested dataset
snapshot.

## Workflow

1. `PUT /api/v1/datasets/{sales,inventory,products,promotions}` to load a
   dataset snapshot.
2. Query `/api/v1/stores/...` for store- and product-level reports.

All forecast-backed reports accept a `horizon` query parameter (days);
when omitted the configured default horizon applies.
"#
    ),
    paths(
        handlers::datasets::load_sales,
        handlers::datasets::load_inventory,
        handlers::datasets::load_products,
        handlers::datasets::load_promotions,
        handlers::analytics::list_stores,
        handlers::analytics::get_store_overview,
        handlers::analytics::get_sales_trend,
        handlers::analytics::get_restock_report,
        handlers::analytics::get_top_products,
        handlers::analytics::get_category_performance,
        handlers::analytics::get_risk_distribution,
        handlers::analytics::get_inventory_positioning,
        handlers::analytics::get_product_insight,
    ),
    components(schemas(
        models::SalesRecord,
        models::InventoryRecord,
        models::ProductRecord,
        models::PromotionRecord,
        crate::analytics::RiskLabel,
        reports::StoreOverview,
        reports::TrendPoint,
        reports::RestockRow,
        reports::ProductSalesTotal,
        reports::CategoryPerformance,
        reports::RiskBucket,
        reports::PositioningPoint,
        reports::PromotionWindow,
        reports::ProductInsight,
        handlers::datasets::DatasetLoadSummary,
        errors::ErrorResponse,
    )),
    tags(
        (name = "Datasets", description = "Dataset snapshot ingestion"),
        (name = "Analytics", description = "Store and product intelligence reports")
    )
)]
pub struct ApiDoc;

/// Swagger UI mounted at `/docs`, serving the generated document.
pub fn swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
