//! In-memory order store loaded from a CSV export.
//!
//! Expected columns: `order_id,created_at,brand,platform,shop,status,province,revenue`,
//! with `created_at` as `YYYY-MM-DD HH:MM:SS` (a `T` separator is accepted too).

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read orders file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read CSV headers: {0}")]
    Headers(#[from] csv::Error),

    #[error("Missing CSV column: {0}")]
    MissingColumn(&'static str),
}

const REQUIRED_COLUMNS: [&str; 8] = [
    "order_id",
    "created_at",
    "brand",
    "platform",
    "shop",
    "status",
    "province",
    "revenue",
];

#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub order_id: String,
    pub created_at: NaiveDateTime,
    pub brand: String,
    pub platform: String,
    pub shop: String,
    pub status: String,
    pub province: String,
    pub revenue: f64,
}

#[derive(Debug, Deserialize)]
struct CsvOrderRow {
    order_id: String,
    created_at: String,
    brand: String,
    platform: String,
    shop: String,
    status: String,
    #[serde(default)]
    province: String,
    #[serde(default)]
    revenue: Option<f64>,
}

impl CsvOrderRow {
    fn into_record(self) -> Option<OrderRecord> {
        let created_at = parse_timestamp(&self.created_at)?;
        Some(OrderRecord {
            order_id: self.order_id.trim().to_string(),
            created_at,
            brand: self.brand.trim().to_string(),
            platform: self.platform.trim().to_string(),
            shop: self.shop.trim().to_string(),
            status: self.status.trim().to_string(),
            province: self.province.trim().to_string(),
            revenue: self.revenue.unwrap_or(0.0),
        })
    }
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

#[derive(Debug, Default)]
pub struct OrderStore {
    orders: Vec<OrderRecord>,
}

impl OrderStore {
    pub fn new(orders: Vec<OrderRecord>) -> Self {
        Self { orders }
    }

    /// Load orders from a CSV file. A missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            tracing::warn!("Orders file not found at {}, starting empty", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        let (store, skipped) = Self::from_csv_str(&text)?;
        tracing::info!(
            "Loaded {} orders from {} ({} skipped)",
            store.len(),
            path.display(),
            skipped
        );
        Ok(store)
    }

    /// Parse CSV text. Returns the store and the number of skipped rows.
    pub fn from_csv_str(csv_text: &str) -> Result<(Self, usize), StoreError> {
        // Strip UTF-8 BOM if present
        let text = csv_text.trim_start_matches('\u{FEFF}');

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(StoreError::MissingColumn(column));
            }
        }

        let mut orders = Vec::new();
        let mut skipped = 0usize;

        for (line, result) in reader.deserialize::<CsvOrderRow>().enumerate() {
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    tracing::warn!("Skipping malformed CSV record {}: {}", line + 1, e);
                    skipped += 1;
                    continue;
                }
            };
            match row.into_record() {
                Some(record) => orders.push(record),
                None => {
                    tracing::warn!("Skipping CSV record {}: bad created_at", line + 1);
                    skipped += 1;
                }
            }
        }

        Ok((Self { orders }, skipped))
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Orders created on a day within `start..=end`
    pub fn in_period(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = &OrderRecord> + '_ {
        self.orders.iter().filter(move |order| {
            let day = order.created_at.date();
            day >= start && day <= end
        })
    }
}
