// ============================================================================
// Order Domain Model
// ============================================================================

use crate::errors::{EngineError, EngineResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Value Objects
// ============================================================================

/// Opaque, caller-assigned order identifier.
///
/// The engine never generates identifiers; uniqueness is the caller's
/// responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct OrderId(u64);

impl OrderId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side a resting counterparty would be on
    pub fn opposite(&self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

impl FromStr for Side {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        match s {
            "buy" => Ok(Side::Buy),
            "sell" => Ok(Side::Sell),
            other => Err(EngineError::UnrecognizedSide(other.to_string())),
        }
    }
}

/// Order kind as a tagged variant: the price exists exactly when the order
/// is a limit order, so "price absent" is a compile-time fact rather than a
/// runtime convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum OrderType {
    Limit { price: Decimal },
    Market,
}

// ============================================================================
// Order Entity
// ============================================================================

/// A unit of trading interest.
///
/// `amount` is the remaining unfilled quantity and is decremented in place
/// as the order fills. An order whose amount reaches zero is removed from
/// the book rather than kept around.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub order_type: OrderType,
    pub amount: Decimal,
    /// Arrival time, recorded on construction
    pub timestamp: DateTime<Utc>,
}

impl Order {
    /// Create a limit order at the given price
    pub fn limit(id: impl Into<OrderId>, side: Side, price: Decimal, amount: Decimal) -> Self {
        Self {
            id: id.into(),
            side,
            order_type: OrderType::Limit { price },
            amount,
            timestamp: Utc::now(),
        }
    }

    /// Create a market order (no price preference)
    pub fn market(id: impl Into<OrderId>, side: Side, amount: Decimal) -> Self {
        Self {
            id: id.into(),
            side,
            order_type: OrderType::Market,
            amount,
            timestamp: Utc::now(),
        }
    }

    /// The limit price, if this order has one
    pub fn limit_price(&self) -> Option<Decimal> {
        match self.order_type {
            OrderType::Limit { price } => Some(price),
            OrderType::Market => None,
        }
    }

    pub fn is_market(&self) -> bool {
        matches!(self.order_type, OrderType::Market)
    }

    pub fn is_limit(&self) -> bool {
        matches!(self.order_type, OrderType::Limit { .. })
    }

    pub fn is_filled(&self) -> bool {
        self.amount.is_zero()
    }

    /// Reduce the remaining amount by a fill quantity.
    ///
    /// The caller (the matching processor) never fills more than the
    /// remaining amount, so this cannot go negative.
    pub fn fill(&mut self, quantity: Decimal) {
        debug_assert!(quantity <= self.amount, "fill exceeds remaining amount");
        self.amount -= quantity;
    }
}
