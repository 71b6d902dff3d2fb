use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::debug;
use utoipa::ToSchema;

use crate::{
    analytics::{classify_stock_risk, forecast_demand, reorder_quantity, RiskLabel},
    errors::ServiceError,
    models::SalesRecord,
    store::DatasetStore,
};

/// Store-level headline metrics.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StoreOverview {
    pub store_id: String,
    pub total_units_sold: u64,
    /// Mean of per-date store totals, truncated to whole units.
    pub avg_daily_units: u64,
    pub products_sold: u64,
    pub total_stock: u64,
}

/// One point of a daily sales trend.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub units_sold: u64,
}

/// One row of the stock-and-restock report.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RestockRow {
    pub product_id: String,
    pub current_stock: u32,
    pub predicted_demand: u32,
    pub reorder_quantity: u32,
    pub risk: RiskLabel,
}

/// Total units sold for one product.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductSalesTotal {
    pub product_id: String,
    pub units_sold: u64,
}

/// Units sold per product category.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryPerformance {
    pub category: String,
    pub units_sold: u64,
}

/// Number of products carrying a given risk label.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RiskBucket {
    pub risk: RiskLabel,
    pub products: u64,
}

/// Current stock against predicted demand for one product.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PositioningPoint {
    pub product_id: String,
    pub current_stock: u32,
    pub predicted_demand: u32,
}

/// A scheduled discount window for the product, flagged as active when it
/// covers the latest observed sales date.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PromotionWindow {
    pub promo_start: NaiveDate,
    pub promo_end: NaiveDate,
    pub discount_percent: u32,
    pub active: bool,
}

/// The selected-product panel: pipeline outputs plus supporting context.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductInsight {
    pub store_id: String,
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub shelf_life_days: u32,
    pub lead_time_days: u32,
    pub current_stock: u32,
    pub predicted_demand: u32,
    pub reorder_quantity: u32,
    pub risk: RiskLabel,
    pub trend: Vec<TrendPoint>,
    pub promotions: Vec<PromotionWindow>,
}

/// Analytics service generating the store and product reports.
///
/// Every report recomputes from the current dataset snapshot; nothing is
/// cached between calls.
#[derive(Clone)]
pub struct AnalyticsService {
    dataset: Arc<DatasetStore>,
}

impl AnalyticsService {
    pub fn new(dataset: Arc<DatasetStore>) -> Self {
        Self { dataset }
    }

    pub fn store_ids(&self) -> Vec<String> {
        self.dataset.store_ids()
    }

    /// Headline metrics for a store.
    pub fn store_overview(&self, store_id: &str) -> Result<StoreOverview, ServiceError> {
        let sales = self.known_store_sales(store_id)?;

        let total_units_sold: u64 = sales.iter().map(|r| u64::from(r.quantity_sold)).sum();

        let daily = daily_totals(&sales);
        let avg_daily_units = if daily.is_empty() {
            0
        } else {
            (total_units_sold as f64 / daily.len() as f64) as u64
        };

        let mut product_ids: Vec<&str> = sales.iter().map(|r| r.product_id.as_str()).collect();
        product_ids.sort_unstable();
        product_ids.dedup();

        let total_stock: u64 = self
            .dataset
            .store_inventory(store_id)
            .iter()
            .map(|row| u64::from(row.current_stock))
            .sum();

        Ok(StoreOverview {
            store_id: store_id.to_string(),
            total_units_sold,
            avg_daily_units,
            products_sold: product_ids.len() as u64,
            total_stock,
        })
    }

    /// Per-date total units for a store, ascending by date.
    pub fn sales_trend(&self, store_id: &str) -> Result<Vec<TrendPoint>, ServiceError> {
        let sales = self.known_store_sales(store_id)?;
        Ok(daily_totals(&sales)
            .into_iter()
            .map(|(date, units_sold)| TrendPoint { date, units_sold })
            .collect())
    }

    /// Forecast, risk, and reorder recommendation for every product the
    /// store stocks and has sold. Products without sales history are
    /// skipped: there is nothing to fit a trend to.
    pub fn restock_report(
        &self,
        store_id: &str,
        horizon: u32,
    ) -> Result<Vec<RestockRow>, ServiceError> {
        self.ensure_store(store_id)?;

        let mut rows = Vec::new();
        for inventory in self.dataset.store_inventory(store_id) {
            let Some(series) = self.dataset.product_sales(store_id, &inventory.product_id) else {
                debug!(
                    store_id,
                    product_id = %inventory.product_id,
                    "skipping product with no sales history"
                );
                continue;
            };

            let history: Vec<u32> = series.iter().map(|r| r.quantity_sold).collect();
            let predicted_demand = forecast_demand(&history, horizon)?;

            let product = self.dataset.product(&inventory.product_id).ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "Product {} is not in the catalog",
                    inventory.product_id
                ))
            })?;

            let risk = classify_stock_risk(
                inventory.current_stock,
                predicted_demand,
                product.shelf_life_days,
            )?;
            let reorder = reorder_quantity(
                predicted_demand,
                inventory.lead_time_days,
                inventory.current_stock,
            )?;

            rows.push(RestockRow {
                product_id: inventory.product_id,
                current_stock: inventory.current_stock,
                predicted_demand,
                reorder_quantity: reorder,
                risk,
            });
        }
        Ok(rows)
    }

    /// Products ranked by total units sold, descending. Ties break on
    /// product id so the ranking is stable.
    pub fn top_products(
        &self,
        store_id: &str,
        limit: usize,
    ) -> Result<Vec<ProductSalesTotal>, ServiceError> {
        let sales = self.known_store_sales(store_id)?;

        let mut totals: BTreeMap<String, u64> = BTreeMap::new();
        for record in &sales {
            *totals.entry(record.product_id.clone()).or_default() +=
                u64::from(record.quantity_sold);
        }

        let mut ranked: Vec<ProductSalesTotal> = totals
            .into_iter()
            .map(|(product_id, units_sold)| ProductSalesTotal {
                product_id,
                units_sold,
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.units_sold
                .cmp(&a.units_sold)
                .then_with(|| a.product_id.cmp(&b.product_id))
        });
        ranked.truncate(limit);
        Ok(ranked)
    }

    /// Units sold per product category. Products missing from the catalog
    /// are grouped under "Uncategorized".
    pub fn category_performance(
        &self,
        store_id: &str,
    ) -> Result<Vec<CategoryPerformance>, ServiceError> {
        let sales = self.known_store_sales(store_id)?;

        let mut totals: BTreeMap<String, u64> = BTreeMap::new();
        for record in &sales {
            let category = self
                .dataset
                .product(&record.product_id)
                .map(|p| p.category)
                .unwrap_or_else(|| "Uncategorized".to_string());
            *totals.entry(category).or_default() += u64::from(record.quantity_sold);
        }

        Ok(totals
            .into_iter()
            .map(|(category, units_sold)| CategoryPerformance {
                category,
                units_sold,
            })
            .collect())
    }

    /// Product counts per risk label, in label priority order. Labels with
    /// no products are reported with a zero count.
    pub fn risk_distribution(
        &self,
        store_id: &str,
        horizon: u32,
    ) -> Result<Vec<RiskBucket>, ServiceError> {
        let rows = self.restock_report(store_id, horizon)?;

        let mut counts: HashMap<RiskLabel, u64> = HashMap::new();
        for row in &rows {
            *counts.entry(row.risk).or_default() += 1;
        }

        Ok(RiskLabel::iter()
            .map(|risk| RiskBucket {
                risk,
                products: counts.get(&risk).copied().unwrap_or(0),
            })
            .collect())
    }

    /// Stock vs predicted demand per product (the positioning scatter).
    pub fn inventory_positioning(
        &self,
        store_id: &str,
        horizon: u32,
    ) -> Result<Vec<PositioningPoint>, ServiceError> {
        self.ensure_store(store_id)?;

        let mut points = Vec::new();
        for inventory in self.dataset.store_inventory(store_id) {
            let Some(series) = self.dataset.product_sales(store_id, &inventory.product_id) else {
                continue;
            };
            let history: Vec<u32> = series.iter().map(|r| r.quantity_sold).collect();
            points.push(PositioningPoint {
                product_id: inventory.product_id,
                current_stock: inventory.current_stock,
                predicted_demand: forecast_demand(&history, horizon)?,
            });
        }
        Ok(points)
    }

    /// Everything the selected-product panel shows.
    pub fn product_insight(
        &self,
        store_id: &str,
        product_id: &str,
        horizon: u32,
    ) -> Result<ProductInsight, ServiceError> {
        self.ensure_store(store_id)?;

        let inventory = self.dataset.inventory_for(store_id, product_id).ok_or_else(|| {
            ServiceError::NotFound(format!(
                "No inventory for product {} at store {}",
                product_id, store_id
            ))
        })?;
        let product = self.dataset.product(product_id).ok_or_else(|| {
            ServiceError::NotFound(format!("Product {} is not in the catalog", product_id))
        })?;
        let series = self.dataset.product_sales(store_id, product_id).ok_or_else(|| {
            ServiceError::NotFound(format!(
                "No sales history for product {} at store {}",
                product_id, store_id
            ))
        })?;

        let history: Vec<u32> = series.iter().map(|r| r.quantity_sold).collect();
        let predicted_demand = forecast_demand(&history, horizon)?;
        let risk = classify_stock_risk(
            inventory.current_stock,
            predicted_demand,
            product.shelf_life_days,
        )?;
        let reorder = reorder_quantity(
            predicted_demand,
            inventory.lead_time_days,
            inventory.current_stock,
        )?;

        let trend: Vec<TrendPoint> = series
            .iter()
            .map(|r| TrendPoint {
                date: r.date,
                units_sold: u64::from(r.quantity_sold),
            })
            .collect();

        // Activity is judged against the most recent observed sales date,
        // not the wall clock, so reports stay stable for a given snapshot.
        let latest_sale_date = series.last().map(|r| r.date);
        let promotions = self
            .dataset
            .promotions_for(product_id)
            .into_iter()
            .map(|p| PromotionWindow {
                active: latest_sale_date.is_some_and(|date| p.is_active_on(date)),
                promo_start: p.promo_start,
                promo_end: p.promo_end,
                discount_percent: p.discount_percent,
            })
            .collect();

        Ok(ProductInsight {
            store_id: store_id.to_string(),
            product_id: product_id.to_string(),
            product_name: product.product_name,
            category: product.category,
            shelf_life_days: product.shelf_life_days,
            lead_time_days: inventory.lead_time_days,
            current_stock: inventory.current_stock,
            predicted_demand,
            reorder_quantity: reorder,
            risk,
            trend,
            promotions,
        })
    }

    fn ensure_store(&self, store_id: &str) -> Result<(), ServiceError> {
        if !self.dataset.has_store(store_id) {
            return Err(ServiceError::NotFound(format!("Store {} not found", store_id)));
        }
        Ok(())
    }

    fn known_store_sales(&self, store_id: &str) -> Result<Vec<SalesRecord>, ServiceError> {
        self.ensure_store(store_id)?;
        Ok(self.dataset.store_sales(store_id))
    }
}

fn daily_totals(sales: &[SalesRecord]) -> BTreeMap<NaiveDate, u64> {
    let mut totals = BTreeMap::new();
    for record in sales {
        *totals.entry(record.date).or_default() += u64::from(record.quantity_sold);
    }
    totals
}
