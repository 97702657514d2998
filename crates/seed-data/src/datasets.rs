//! Built-in seed datasets and record validation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use catalog::models::Item;

use crate::db::SeedError;

/// Oldest age accepted for a seed timestamp: one hundred years.
pub const MAX_AGE_HOURS: i64 = 100 * 366 * 24;

/// One literal seed entry. Timestamps are offsets before the moment of seeding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedRecord {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub created_hours_ago: i64,
    #[serde(default)]
    pub updated_hours_ago: Option<i64>,
}

impl SeedRecord {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            created_hours_ago: 0,
            updated_hours_ago: None,
        }
    }

    /// Sets the creation and last-update ages, in hours.
    pub fn aged(mut self, created_hours_ago: i64, updated_hours_ago: i64) -> Self {
        self.created_hours_ago = created_hours_ago;
        self.updated_hours_ago = Some(updated_hours_ago);
        self
    }

    /// Materializes the record relative to `now`.
    pub fn to_item(&self, now: OffsetDateTime) -> Item {
        let item = Item::new(
            self.name.clone(),
            self.price,
            now - Duration::hours(self.created_hours_ago),
        );
        match self.updated_hours_ago {
            Some(hours) => item.with_updated_at(now - Duration::hours(hours)),
            None => item,
        }
    }
}

/// Catalog of sample products, each with creation and update history.
pub fn catalog() -> Vec<SeedRecord> {
    vec![
        SeedRecord::new("Laptop Gaming", 1299.99).aged(48, 24),
        SeedRecord::new("Mouse Inalámbrico", 29.99).aged(24, 12),
        SeedRecord::new("Teclado Mecánico", 89.50).aged(12, 6),
        SeedRecord::new("Monitor 4K", 299.00).aged(6, 1),
    ]
}

/// Three everyday items created at seeding time.
pub fn starter() -> Vec<SeedRecord> {
    vec![
        SeedRecord::new("Notebook", 12.5),
        SeedRecord::new("Coffee", 3.25),
        SeedRecord::new("Keyboard", 22.0),
    ]
}

/// Rejects datasets that would violate item invariants before touching the database.
pub fn validate(records: &[SeedRecord]) -> Result<(), SeedError> {
    if records.is_empty() {
        return Err(SeedError::EmptyDataset);
    }

    let invalid = |record: &SeedRecord, reason: &str| SeedError::InvalidRecord {
        name: record.name.clone(),
        reason: reason.to_string(),
    };

    let mut seen = HashSet::new();
    for record in records {
        if record.name.trim().is_empty() {
            return Err(invalid(record, "name must not be empty"));
        }
        if !record.price.is_finite() || record.price <= 0.0 {
            return Err(invalid(record, "price must be a positive number"));
        }
        if record.created_hours_ago < 0 {
            return Err(invalid(record, "creation time is in the future"));
        }
        if record.created_hours_ago > MAX_AGE_HOURS {
            return Err(invalid(record, "age out of range"));
        }
        if let Some(updated) = record.updated_hours_ago
            && (updated < 0 || updated > record.created_hours_ago)
        {
            return Err(invalid(record, "update time must fall between creation and now"));
        }
        if !seen.insert(record.name.as_str()) {
            return Err(invalid(record, "name appears more than once"));
        }
    }

    Ok(())
}
