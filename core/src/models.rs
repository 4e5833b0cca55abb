use anyhow::{Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical pantry item. `expiry_dates` is always sorted ascending, which
/// for `YYYY-MM-DD` strings equals chronological order.
#[derive(Debug, Clone, Serialize)]
pub struct PantryItem {
    pub id: i64,
    pub name: String,
    pub quantity: i64,
    pub unit: String,
    pub expiry_dates: Vec<String>,
}

/// Raw record as persisted on disk. Older files carry a single `expiry_date`
/// string instead of the `expiry_dates` list; [`normalize`] upgrades them.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredItem {
    pub id: i64,
    pub name: String,
    pub quantity: i64,
    pub unit: String,
    #[serde(default)]
    pub expiry_dates: Option<Vec<String>>,
    #[serde(default)]
    pub expiry_date: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewPantryItem {
    pub name: String,
    pub quantity: i64,
    pub unit: String,
    pub expiry_date: String,
}

#[derive(Debug, Clone)]
pub struct UpdatePantryItem {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub unit: Option<String>,
    pub expiry_dates: Option<Vec<String>>,
}

/// Upgrade a raw stored record to the canonical shape.
///
/// When `expiry_dates` is absent, a legacy `expiry_date` becomes a
/// one-element list; with neither field the list is empty. The output list
/// is sorted with duplicates removed.
#[must_use]
pub fn normalize(raw: StoredItem) -> PantryItem {
    let mut expiry_dates = match (raw.expiry_dates, raw.expiry_date) {
        (Some(dates), _) => dates,
        (None, Some(date)) => vec![date],
        (None, None) => Vec::new(),
    };
    expiry_dates.sort();
    expiry_dates.dedup();
    PantryItem {
        id: raw.id,
        name: raw.name,
        quantity: raw.quantity,
        unit: raw.unit,
        expiry_dates,
    }
}

/// Merge key for item names: trimmed, lowercased.
#[must_use]
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Validate an item name and return it trimmed.
pub fn validate_item_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        bail!("Item name must not be empty");
    }
    Ok(trimmed.to_string())
}

pub fn validate_expiry_date(date: &str) -> Result<()> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid expiry date '{date}'. Must be YYYY-MM-DD"))?;
    Ok(())
}
