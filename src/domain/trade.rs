// ============================================================================
// Trade Domain Model
// ============================================================================

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::OrderId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The outcome of one matching step between an incoming order and one
/// resting order.
///
/// `taker_order_id` is always the incoming order and `maker_order_id` the
/// resting one; neither implies which side initiated price discovery. A
/// trade's amount is always strictly positive.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trade {
    /// The incoming (aggressive) order
    pub taker_order_id: OrderId,

    /// The resting (passive) order
    pub maker_order_id: OrderId,

    /// Executed quantity
    pub amount: Decimal,

    /// Execution price
    pub price: Decimal,

    /// Trade timestamp
    pub timestamp: DateTime<Utc>,
}

impl Trade {
    pub fn new(
        taker_order_id: OrderId,
        maker_order_id: OrderId,
        amount: Decimal,
        price: Decimal,
    ) -> Self {
        debug_assert!(amount > Decimal::ZERO, "zero-amount trade");
        Self {
            taker_order_id,
            maker_order_id,
            amount,
            price,
            timestamp: Utc::now(),
        }
    }

    /// Notional value of the trade (price * amount)
    pub fn notional_value(&self) -> Decimal {
        self.price * self.amount
    }
}
