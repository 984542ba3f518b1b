// ============================================================================
// Order Book Domain Model
// ============================================================================

use rust_decimal::Decimal;
use std::collections::{BTreeMap, VecDeque};

use super::{Order, OrderType, Side};
use crate::errors::{EngineError, EngineResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Book Side
// ============================================================================

/// One side of the order book (bids or asks).
///
/// Priced orders live in per-price FIFO queues indexed by an ordered map;
/// market orders live in a separate tail queue. Market orders express no
/// price preference, so they rank behind every priced order regardless of
/// submission order. Iteration is best-to-worst: bids descend in price, asks
/// ascend, FIFO within a price level, market orders last.
#[derive(Debug)]
pub struct BookSide {
    side: Side,
    levels: BTreeMap<Decimal, VecDeque<Order>>,
    market: VecDeque<Order>,
}

impl BookSide {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
            market: VecDeque::new(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Insert a resting order at its correct priority slot.
    ///
    /// Fails with [`EngineError::InvalidSide`] if the order belongs on the
    /// other side of the book. Unreachable under correct dispatch, but a
    /// wrong-side insert signals a caller bug and must not be silent.
    pub fn add(&mut self, order: Order) -> EngineResult<()> {
        if order.side != self.side {
            return Err(EngineError::InvalidSide {
                expected: self.side,
                actual: order.side,
            });
        }
        match order.order_type {
            OrderType::Limit { price } => {
                self.levels.entry(price).or_default().push_back(order);
            },
            OrderType::Market => {
                self.market.push_back(order);
            },
        }
        Ok(())
    }

    /// Best resting limit price: highest for bids, lowest for asks
    pub fn best_price(&self) -> Option<Decimal> {
        match self.side {
            Side::Buy => self.levels.keys().next_back().copied(),
            Side::Sell => self.levels.keys().next().copied(),
        }
    }

    /// Remove and return the highest-priority limit order
    pub(crate) fn pop_best_limit(&mut self) -> Option<Order> {
        let price = self.best_price()?;
        let queue = self.levels.get_mut(&price)?;
        let order = queue.pop_front();
        if queue.is_empty() {
            self.levels.remove(&price);
        }
        order
    }

    /// Remove and return the highest-priority market order
    pub(crate) fn pop_market(&mut self) -> Option<Order> {
        self.market.pop_front()
    }

    /// Return a partially consumed maker to the front of its queue, keeping
    /// its time priority
    pub(crate) fn restore(&mut self, order: Order) {
        debug_assert_eq!(order.side, self.side);
        debug_assert!(!order.is_filled(), "filled order returned to the book");
        match order.order_type {
            OrderType::Limit { price } => {
                self.levels.entry(price).or_default().push_front(order);
            },
            OrderType::Market => {
                self.market.push_front(order);
            },
        }
    }

    /// Resting orders in priority order: best price first, FIFO within a
    /// level, market orders after all priced orders
    pub fn iter(&self) -> impl Iterator<Item = &Order> + '_ {
        let priced: Box<dyn Iterator<Item = &Order> + '_> = match self.side {
            Side::Buy => Box::new(self.levels.values().rev().flat_map(|queue| queue.iter())),
            Side::Sell => Box::new(self.levels.values().flat_map(|queue| queue.iter())),
        };
        priced.chain(self.market.iter())
    }

    pub fn len(&self) -> usize {
        self.limit_order_count() + self.market_order_count()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty() && self.market.is_empty()
    }

    pub fn limit_order_count(&self) -> usize {
        self.levels.values().map(VecDeque::len).sum()
    }

    pub fn market_order_count(&self) -> usize {
        self.market.len()
    }

    /// Total resting quantity, market orders included
    pub fn total_quantity(&self) -> Decimal {
        self.iter().map(|order| order.amount).sum()
    }

    /// Aggregated (price, quantity) for the best `num_levels` price levels.
    /// Market orders carry no price and are not part of the depth view.
    pub fn depth(&self, num_levels: usize) -> Vec<(Decimal, Decimal)> {
        let iter: Box<dyn Iterator<Item = _> + '_> = match self.side {
            Side::Buy => Box::new(self.levels.iter().rev()),
            Side::Sell => Box::new(self.levels.iter()),
        };

        iter.take(num_levels)
            .map(|(price, queue)| (*price, queue.iter().map(|order| order.amount).sum()))
            .collect()
    }
}

// ============================================================================
// Order Book
// ============================================================================

/// The two ordered sequences of resting orders, exclusively owning all
/// unmatched interest. Performs no matching logic itself.
#[derive(Debug)]
pub struct OrderBook {
    bids: BookSide,
    asks: BookSide,
}

impl OrderBook {
    pub fn new() -> Self {
        Self {
            bids: BookSide::new(Side::Buy),
            asks: BookSide::new(Side::Sell),
        }
    }

    /// Insert an order into the side matching its `side` field
    pub fn add(&mut self, order: Order) -> EngineResult<()> {
        match order.side {
            Side::Buy => self.bids.add(order),
            Side::Sell => self.asks.add(order),
        }
    }

    pub fn bids(&self) -> &BookSide {
        &self.bids
    }

    pub fn asks(&self) -> &BookSide {
        &self.asks
    }

    pub fn side(&self, side: Side) -> &BookSide {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    pub(crate) fn side_mut(&mut self, side: Side) -> &mut BookSide {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.best_price()
    }

    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.best_price()
    }

    /// Spread (ask - bid), when both sides are quoted
    pub fn spread(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Mid price, when both sides are quoted
    pub fn mid_price(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid + ask) / Decimal::from(2)),
            _ => None,
        }
    }

    /// Immutable snapshot of the top `depth` levels of both sides
    pub fn snapshot(&self, depth: usize) -> OrderBookSnapshot {
        OrderBookSnapshot::with_depth(self.bids.depth(depth), self.asks.depth(depth))
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Order Book Snapshot
// ============================================================================

/// Immutable snapshot of the order book state
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderBookSnapshot {
    /// Bid levels (price, quantity), best first
    pub bids: Vec<(Decimal, Decimal)>,
    /// Ask levels (price, quantity), best first
    pub asks: Vec<(Decimal, Decimal)>,
    /// Current spread (ask - bid)
    pub spread: Option<Decimal>,
    /// Mid price
    pub mid_price: Option<Decimal>,
}

impl OrderBookSnapshot {
    pub fn with_depth(bids: Vec<(Decimal, Decimal)>, asks: Vec<(Decimal, Decimal)>) -> Self {
        let spread = match (bids.first(), asks.first()) {
            (Some((bid, _)), Some((ask, _))) => Some(ask - bid),
            _ => None,
        };

        let mid_price = match (bids.first(), asks.first()) {
            (Some((bid, _)), Some((ask, _))) => Some((bid + ask) / Decimal::from(2)),
            _ => None,
        };

        Self {
            bids,
            asks,
            spread,
            mid_price,
        }
    }

    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|(price, _)| *price)
    }

    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|(price, _)| *price)
    }

    pub fn total_bid_quantity(&self) -> Decimal {
        self.bids.iter().map(|(_, qty)| qty).sum()
    }

    pub fn total_ask_quantity(&self) -> Decimal {
        self.asks.iter().map(|(_, qty)| qty).sum()
    }
}
