use axum::{
    body::Body,
    http::{Method, Request},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use stocksense_api::{app_router, config::AppConfig, AppState};

/// Test harness wrapping the full application router.
pub struct TestApp {
    pub state: AppState,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let state = AppState::new(AppConfig::default());
        let router = app_router(state.clone());
        Self { state, router }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let request = builder.body(body).expect("request");
        self.router.clone().oneshot(request).await.expect("response")
    }

    /// Load the standard three-table fixture through the ingestion API.
    pub async fn seed_dataset(&self) {
        let sales = json!([
            // S1/P1 trends upward: 10, 12, 14 over three days
            {"date": "2024-01-01", "store_id": "S1", "product_id": "P1", "quantity_sold": 10, "price": "25.00", "is_promo": false},
            {"date": "2024-01-02", "store_id": "S1", "product_id": "P1", "quantity_sold": 12, "price": "25.00", "is_promo": false},
            {"date": "2024-01-03", "store_id": "S1", "product_id": "P1", "quantity_sold": 14, "price": "20.00", "is_promo": true},
            // S1/P2 is flat at 5/day
            {"date": "2024-01-01", "store_id": "S1", "product_id": "P2", "quantity_sold": 5, "price": "3.50", "is_promo": false},
            {"date": "2024-01-02", "store_id": "S1", "product_id": "P2", "quantity_sold": 5, "price": "3.50", "is_promo": false},
            {"date": "2024-01-03", "store_id": "S1", "product_id": "P2", "quantity_sold": 5, "price": "3.50", "is_promo": false},
            // A second store
            {"date": "2024-01-01", "store_id": "S2", "product_id": "P1", "quantity_sold": 40, "price": "25.00", "is_promo": false}
        ]);
        let inventory = json!([
            {"store_id": "S1", "product_id": "P1", "current_stock": 50, "lead_time_days": 5},
            {"store_id": "S1", "product_id": "P2", "current_stock": 200, "lead_time_days": 3},
            {"store_id": "S2", "product_id": "P1", "current_stock": 80, "lead_time_days": 4}
        ]);
        let products = json!([
            {"product_id": "P1", "product_name": "Espresso Beans 1kg", "category": "Grocery", "shelf_life_days": 180},
            {"product_id": "P2", "product_name": "Whole Milk 1L", "category": "Dairy", "shelf_life_days": 5}
        ]);
        let promotions = json!([
            {"product_id": "P1", "promo_start": "2024-01-03", "promo_end": "2024-01-05", "discount_percent": 20}
        ]);

        for (table, payload) in [
            ("sales", sales),
            ("inventory", inventory),
            ("products", products),
            ("promotions", promotions),
        ] {
            let response = self
                .request(
                    Method::PUT,
                    &format!("/api/v1/datasets/{}", table),
                    Some(payload),
                )
                .await;
            assert_eq!(response.status(), 200, "seeding {} failed", table);
        }
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}
