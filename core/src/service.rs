use std::path::Path;

use anyhow::Result;

use crate::models::{
    NewPantryItem, PantryItem, UpdatePantryItem, name_key, normalize, validate_item_name,
};
use crate::store::Store;

/// Business logic for the pantry collection.
///
/// Every operation loads the full collection, transforms it in memory, and
/// writes it back in full. There is no cross-call locking; callers that need
/// exclusion must provide it.
pub struct PantryService {
    store: Store,
}

impl PantryService {
    #[must_use]
    pub fn new(db_path: &Path) -> Self {
        Self {
            store: Store::open(db_path),
        }
    }

    fn load_items(&self) -> Result<Vec<PantryItem>> {
        Ok(self.store.load()?.into_iter().map(normalize).collect())
    }

    /// List all items, optionally filtered by a case-insensitive name
    /// substring. A blank filter matches everything. Insertion order is
    /// preserved.
    pub fn list_items(&self, search: Option<&str>) -> Result<Vec<PantryItem>> {
        let items = self.load_items()?;
        let Some(filter) = search.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(items);
        };
        let needle = filter.to_lowercase();
        Ok(items
            .into_iter()
            .filter(|item| item.name.to_lowercase().contains(&needle))
            .collect())
    }

    /// Add an item, merging into an existing one when the name matches under
    /// trimmed, case-insensitive comparison.
    ///
    /// A merge accumulates quantity and adds the expiry date if it is not
    /// already present; name and unit are left as they were. A genuinely new
    /// name gets a fresh id.
    pub fn add_item(&self, new: &NewPantryItem) -> Result<PantryItem> {
        let name = validate_item_name(&new.name)?;
        let mut items = self.load_items()?;

        let key = name_key(&name);
        let matches: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| name_key(&item.name) == key)
            .map(|(i, _)| i)
            .collect();
        if matches.len() > 1 {
            // One name should map to one item; flag collections that
            // violate this and merge into the first match.
            eprintln!(
                "Warning: {} items share the name '{name}'; merging into id {}",
                matches.len(),
                items[matches[0]].id
            );
        }

        let item = if let Some(&idx) = matches.first() {
            let existing = &mut items[idx];
            existing.quantity += new.quantity;
            if !existing.expiry_dates.contains(&new.expiry_date) {
                existing.expiry_dates.push(new.expiry_date.clone());
                existing.expiry_dates.sort();
            }
            existing.clone()
        } else {
            let item = PantryItem {
                id: next_id(&items),
                name,
                quantity: new.quantity,
                unit: new.unit.clone(),
                expiry_dates: vec![new.expiry_date.clone()],
            };
            items.push(item.clone());
            item
        };

        self.store.save(&items)?;
        Ok(item)
    }

    /// Apply a partial update to the item with `id`. Fields left as `None`
    /// are untouched. Returns `Ok(None)` when no item has that id, in which
    /// case nothing is persisted.
    pub fn update_item(&self, id: i64, update: &UpdatePantryItem) -> Result<Option<PantryItem>> {
        let mut items = self.load_items()?;
        let Some(item) = items.iter_mut().find(|item| item.id == id) else {
            return Ok(None);
        };

        if let Some(name) = &update.name {
            item.name = name.clone();
        }
        if let Some(quantity) = update.quantity {
            item.quantity = quantity;
        }
        if let Some(unit) = &update.unit {
            item.unit = unit.clone();
        }
        if let Some(dates) = &update.expiry_dates {
            // Duplicates are kept as given on this path; only the order is
            // fixed.
            let mut dates = dates.clone();
            dates.sort();
            item.expiry_dates = dates;
        }

        let updated = item.clone();
        self.store.save(&items)?;
        Ok(Some(updated))
    }
}

fn next_id(items: &[PantryItem]) -> i64 {
    items.iter().map(|item| item.id).max().map_or(1, |max| max + 1)
}
