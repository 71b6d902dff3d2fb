//! In-memory dataset store.
//!
//! Holds the most recently ingested snapshot of each dataset table. Tables
//! are replaced wholesale on ingestion and only read afterwards, so the
//! store needs interior mutability but no transactional coordination.

use std::collections::BTreeSet;

use dashmap::DashMap;

use crate::models::{InventoryRecord, ProductRecord, PromotionRecord, SalesRecord};

/// Composite key for per-(store, product) tables.
type StoreProductKey = (String, String);

#[derive(Debug, Default)]
pub struct DatasetStore {
    sales: DashMap<StoreProductKey, Vec<SalesRecord>>,
    inventory: DashMap<StoreProductKey, InventoryRecord>,
    products: DashMap<String, ProductRecord>,
    promotions: DashMap<String, Vec<PromotionRecord>>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the sales table. Records are grouped per (store, product) and
    /// kept sorted by date, which is the ordering the forecaster relies on.
    pub fn replace_sales(&self, records: Vec<SalesRecord>) -> usize {
        let count = records.len();
        self.sales.clear();
        for record in records {
            self.sales
                .entry((record.store_id.clone(), record.product_id.clone()))
                .or_default()
                .push(record);
        }
        for mut series in self.sales.iter_mut() {
            series.sort_by_key(|r| r.date);
        }
        count
    }

    /// Replace the inventory table. The last record wins when the input
    /// carries duplicate (store, product) rows.
    pub fn replace_inventory(&self, records: Vec<InventoryRecord>) -> usize {
        let count = records.len();
        self.inventory.clear();
        for record in records {
            self.inventory
                .insert((record.store_id.clone(), record.product_id.clone()), record);
        }
        count
    }

    pub fn replace_products(&self, records: Vec<ProductRecord>) -> usize {
        let count = records.len();
        self.products.clear();
        for record in records {
            self.products.insert(record.product_id.clone(), record);
        }
        count
    }

    pub fn replace_promotions(&self, records: Vec<PromotionRecord>) -> usize {
        let count = records.len();
        self.promotions.clear();
        for record in records {
            self.promotions
                .entry(record.product_id.clone())
                .or_default()
                .push(record);
        }
        count
    }

    /// Store ids known to either the sales or the inventory table, sorted.
    pub fn store_ids(&self) -> Vec<String> {
        let mut ids = BTreeSet::new();
        for entry in self.sales.iter() {
            ids.insert(entry.key().0.clone());
        }
        for entry in self.inventory.iter() {
            ids.insert(entry.key().0.clone());
        }
        ids.into_iter().collect()
    }

    pub fn has_store(&self, store_id: &str) -> bool {
        self.sales.iter().any(|e| e.key().0 == store_id)
            || self.inventory.iter().any(|e| e.key().0 == store_id)
    }

    /// Every sales record for a store, across all products.
    pub fn store_sales(&self, store_id: &str) -> Vec<SalesRecord> {
        let mut records: Vec<SalesRecord> = self
            .sales
            .iter()
            .filter(|e| e.key().0 == store_id)
            .flat_map(|e| e.value().clone())
            .collect();
        records.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.product_id.cmp(&b.product_id)));
        records
    }

    /// Date-ordered sales history for one product at one store.
    pub fn product_sales(&self, store_id: &str, product_id: &str) -> Option<Vec<SalesRecord>> {
        self.sales
            .get(&(store_id.to_string(), product_id.to_string()))
            .map(|series| series.value().clone())
    }

    /// Inventory rows for a store, ordered by product id.
    pub fn store_inventory(&self, store_id: &str) -> Vec<InventoryRecord> {
        let mut rows: Vec<InventoryRecord> = self
            .inventory
            .iter()
            .filter(|e| e.key().0 == store_id)
            .map(|e| e.value().clone())
            .collect();
        rows.sort_by(|a, b| a.product_id.cmp(&b.product_id));
        rows
    }

    pub fn inventory_for(&self, store_id: &str, product_id: &str) -> Option<InventoryRecord> {
        self.inventory
            .get(&(store_id.to_string(), product_id.to_string()))
            .map(|row| row.value().clone())
    }

    pub fn product(&self, product_id: &str) -> Option<ProductRecord> {
        self.products.get(product_id).map(|p| p.value().clone())
    }

    pub fn promotions_for(&self, product_id: &str) -> Vec<PromotionRecord> {
        self.promotions
            .get(product_id)
            .map(|windows| windows.value().clone())
            .unwrap_or_default()
    }

    /// (sales series, inventory rows, products, promotion windows) counts,
    /// used by the health endpoint.
    pub fn table_sizes(&self) -> (usize, usize, usize, usize) {
        (
            self.sales.len(),
            self.inventory.len(),
            self.products.len(),
            self.promotions.len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn sale(date: (i32, u32, u32), store: &str, product: &str, qty: u32) -> SalesRecord {
        SalesRecord {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            store_id: store.into(),
            product_id: product.into(),
            quantity_sold: qty,
            price: Decimal::new(999, 2),
            is_promo: false,
        }
    }

    #[test]
    fn sales_series_are_sorted_by_date_on_load() {
        let store = DatasetStore::new();
        store.replace_sales(vec![
            sale((2024, 1, 3), "S1", "P1", 14),
            sale((2024, 1, 1), "S1", "P1", 10),
            sale((2024, 1, 2), "S1", "P1", 12),
        ]);

        let series = store.product_sales("S1", "P1").unwrap();
        let quantities: Vec<u32> = series.iter().map(|r| r.quantity_sold).collect();
        assert_eq!(quantities, vec![10, 12, 14]);
    }

    #[test]
    fn replace_discards_the_previous_snapshot() {
        let store = DatasetStore::new();
        store.replace_sales(vec![sale((2024, 1, 1), "S1", "P1", 10)]);
        store.replace_sales(vec![sale((2024, 1, 1), "S2", "P2", 5)]);

        assert!(store.product_sales("S1", "P1").is_none());
        assert_eq!(store.store_ids(), vec!["S2".to_string()]);
    }

    #[test]
    fn store_ids_union_sales_and_inventory() {
        let store = DatasetStore::new();
        store.replace_sales(vec![sale((2024, 1, 1), "S2", "P1", 10)]);
        store.replace_inventory(vec![InventoryRecord {
            store_id: "S1".into(),
            product_id: "P1".into(),
            current_stock: 40,
            lead_time_days: 3,
        }]);

        assert_eq!(store.store_ids(), vec!["S1".to_string(), "S2".to_string()]);
        assert!(store.has_store("S1"));
        assert!(store.has_store("S2"));
        assert!(!store.has_store("S3"));
    }

    #[test]
    fn duplicate_inventory_rows_keep_the_last() {
        let store = DatasetStore::new();
        let mut row = InventoryRecord {
            store_id: "S1".into(),
            product_id: "P1".into(),
            current_stock: 40,
            lead_time_days: 3,
        };
        let first = row.clone();
        row.current_stock = 70;
        store.replace_inventory(vec![first, row]);

        assert_eq!(store.inventory_for("S1", "P1").unwrap().current_stock, 70);
    }
}
