//! Savings calculation between the extreme complete baskets.

use crate::basket::{round1, round2};
use crate::error::{Result, ShukError};
use crate::models::{Basket, SavingsReport};

/// Spread between the cheapest and most expensive basket totals.
///
/// The inputs are normalized so the report always reads cheapest-first even
/// when the caller passes them swapped. Negative totals are rejected.
pub fn calculate_savings(a: &Basket, b: &Basket) -> Result<SavingsReport> {
    if a.total_price < 0.0 || b.total_price < 0.0 {
        return Err(ShukError::InvalidArgument(
            "basket totals must be non-negative".to_string(),
        ));
    }

    let (cheapest, most_expensive) = if a.total_price <= b.total_price {
        (a, b)
    } else {
        (b, a)
    };

    let amount = round2(most_expensive.total_price - cheapest.total_price);
    let percentage = if most_expensive.total_price > 0.0 {
        round1(amount / most_expensive.total_price * 100.0)
    } else {
        0.0
    };

    Ok(SavingsReport {
        cheapest: cheapest.clone(),
        most_expensive: most_expensive.clone(),
        savings_amount: amount,
        savings_percentage: percentage,
        price_range: (cheapest.total_price, most_expensive.total_price),
    })
}
