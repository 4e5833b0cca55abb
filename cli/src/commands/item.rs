use anyhow::{Result, bail};
use std::process;

use pantry_core::models::{NewPantryItem, UpdatePantryItem};
use pantry_core::service::PantryService;

use super::helpers::{json_error, parse_date, print_item_table};

pub(crate) fn cmd_add(
    service: &PantryService,
    name: &str,
    quantity: i64,
    unit: &str,
    expiry: Option<String>,
    json: bool,
) -> Result<()> {
    let expiry_date = parse_date(expiry)?.format("%Y-%m-%d").to_string();

    let item = service.add_item(&NewPantryItem {
        name: name.to_string(),
        quantity,
        unit: unit.to_string(),
        expiry_date,
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&item)?);
    } else {
        let name = &item.name;
        let quantity = item.quantity;
        let unit = &item.unit;
        let id = item.id;
        println!("Added {name}: now {quantity} {unit} (id: {id})");
    }

    Ok(())
}

pub(crate) fn cmd_list(service: &PantryService, search: Option<&str>, json: bool) -> Result<()> {
    let items = service.list_items(search)?;

    if items.is_empty() {
        if json {
            println!("[]");
        } else {
            eprintln!("No pantry items found");
        }
        process::exit(2);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        print_item_table(&items);
    }

    Ok(())
}

pub(crate) fn cmd_update(
    service: &PantryService,
    id: i64,
    name: Option<String>,
    quantity: Option<i64>,
    unit: Option<String>,
    expiry_dates: Vec<String>,
    json: bool,
) -> Result<()> {
    if name.is_none() && quantity.is_none() && unit.is_none() && expiry_dates.is_empty() {
        bail!("Nothing to update. Provide at least one of --name, --quantity, --unit, or --expiry");
    }

    let expiry_dates = if expiry_dates.is_empty() {
        None
    } else {
        let mut dates = Vec::with_capacity(expiry_dates.len());
        for date in expiry_dates {
            dates.push(parse_date(Some(date))?.format("%Y-%m-%d").to_string());
        }
        Some(dates)
    };

    let update = UpdatePantryItem {
        name,
        quantity,
        unit,
        expiry_dates,
    };

    if let Some(item) = service.update_item(id, &update)? {
        if json {
            println!("{}", serde_json::to_string_pretty(&item)?);
        } else {
            let name = &item.name;
            let quantity = item.quantity;
            let unit = &item.unit;
            println!("Updated item {id}: {name}, {quantity} {unit}");
        }
        Ok(())
    } else {
        if json {
            println!("{}", json_error(&format!("Item {id} not found")));
        } else {
            eprintln!("Item {id} not found");
        }
        process::exit(2);
    }
}
