use rust_decimal::{Decimal, RoundingStrategy};

/// Monetary values round to 2 places, midpoint away from zero.
const DECIMAL_PLACES: u32 = 2;

pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Tiered delivery fee schedule keyed by currency symbol: a flat fee
/// below the currency's subtotal threshold, else 5% of subtotal.
/// Unknown symbols fall back to the ₹ tier.
fn fee_tier(currency: &str) -> (Decimal, Decimal) {
    match currency {
        "$" => (Decimal::new(30, 0), Decimal::new(3, 0)),
        "€" => (Decimal::new(30, 0), Decimal::new(3, 0)),
        "£" => (Decimal::new(25, 0), Decimal::new(250, 2)),
        _ => (Decimal::new(300, 0), Decimal::new(40, 0)),
    }
}

pub fn delivery_fee(subtotal: Decimal, currency: &str) -> Decimal {
    let (threshold, flat) = fee_tier(currency);
    if subtotal < threshold {
        flat
    } else {
        round_money(subtotal * Decimal::new(5, 2))
    }
}

/// Flat 10% of subtotal, every currency.
pub fn tax(subtotal: Decimal) -> Decimal {
    round_money(subtotal * Decimal::new(10, 2))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

pub fn totals(subtotal: Decimal, currency: &str) -> Totals {
    let subtotal = round_money(subtotal);
    let delivery_fee = delivery_fee(subtotal, currency);
    let tax = tax(subtotal);
    Totals {
        subtotal,
        delivery_fee,
        tax,
        total: round_money(subtotal + delivery_fee + tax),
    }
}
