use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{CatalogItem, OrderLine, Variant};

/// Variant a line falls back on when an item declares none.
const STANDARD_VARIANT: &str = "Standard";

/// A client-held cart. Lines are ephemeral and never persisted; checkout
/// takes a snapshot of them (see [`Cart::order_lines`]) and from then on
/// the order is the source of truth.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Merge identity: item id, variant name and the sorted option names.
    pub key: String,
    pub item_id: i64,
    pub name: String,
    pub variant: String,
    pub options: Vec<String>,
    /// Fixed when the line is first added; catalog edits never reprice it.
    pub unit_price: Decimal,
    pub quantity: u32,
}

/// Identity is order-insensitive to how options were picked but sensitive
/// to which options were picked.
pub fn line_key(item_id: i64, variant: &str, options: &[String]) -> String {
    let mut sorted = options.to_vec();
    sorted.sort();
    format!("{item_id}-{variant}-{}", sorted.join("-"))
}

impl Cart {
    /// Adds `quantity` of `item` in the chosen variant with the selected
    /// customization options. Resolution order for the variant: the
    /// explicit argument, else the item's first declared variant, else a
    /// synthetic "Standard" variant at the item's base price. A line with
    /// the same identity merges by summing quantity, keeping the price it
    /// was first added at. Returns the line key.
    pub fn add_line(
        &mut self,
        item: &CatalogItem,
        variant: Option<&Variant>,
        quantity: u32,
        options: &[String],
    ) -> String {
        let (variant_name, variant_price) = match variant.or_else(|| item.variants.first()) {
            Some(v) => (v.name.clone(), v.price),
            None => (STANDARD_VARIANT.to_string(), item.price),
        };

        let key = line_key(item.id, &variant_name, options);
        if let Some(line) = self.lines.iter_mut().find(|line| line.key == key) {
            line.quantity += quantity;
            return key;
        }

        let unit_price = variant_price + options_delta(item, options);
        let mut sorted_options = options.to_vec();
        sorted_options.sort();
        self.lines.push(CartLine {
            key: key.clone(),
            item_id: item.id,
            name: item.name.clone(),
            variant: variant_name,
            options: sorted_options,
            unit_price,
            quantity,
        });
        key
    }

    /// Quantity 0 removes the line; anything else replaces its quantity.
    pub fn update_quantity(&mut self, key: &str, quantity: u32) {
        if quantity == 0 {
            self.remove_line(key);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|line| line.key == key) {
            line.quantity = quantity;
        }
    }

    /// Removing an absent line is a no-op, not an error.
    pub fn remove_line(&mut self, key: &str) {
        self.lines.retain(|line| line.key != key);
    }

    pub fn subtotal(&self) -> Decimal {
        self.lines
            .iter()
            .map(|line| line.unit_price * Decimal::from(line.quantity))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Snapshot of the cart as order lines, ready for checkout.
    pub fn order_lines(&self) -> Vec<OrderLine> {
        self.lines
            .iter()
            .map(|line| OrderLine {
                item_id: line.item_id,
                name: line.name.clone(),
                variant: line.variant.clone(),
                options: line.options.clone(),
                unit_price: line.unit_price,
                quantity: line.quantity,
            })
            .collect()
    }
}

/// Sum of the price deltas for the selected option names. Names that no
/// longer match any catalog option contribute nothing; the mismatch is
/// not detected here.
fn options_delta(item: &CatalogItem, options: &[String]) -> Decimal {
    options
        .iter()
        .map(|name| {
            item.customizations
                .iter()
                .flat_map(|group| &group.options)
                .find(|option| option.name == *name)
                .map(|option| option.price)
                .unwrap_or(Decimal::ZERO)
        })
        .sum()
}
