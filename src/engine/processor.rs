// ============================================================================
// Matching Processor
// Core continuous double-auction matching logic
// ============================================================================

use crate::domain::{BookSide, Order, OrderBook, Side, Trade};
use crate::engine::pricing::execution_price;
use crate::errors::EngineResult;
use crate::interfaces::{EventHandler, NoOpEventHandler, OrderEvent};
use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Continuous matching processor.
///
/// Exclusively owns one [`OrderBook`] and processes one order at a time:
/// an incoming order is matched against the opposite side from the best
/// price outward, and any unfilled remainder rests in the book. Each
/// `process` call runs to completion before returning; callers embedding
/// the processor in a concurrent host must serialize submissions around it.
pub struct Processor {
    book: OrderBook,
    event_handler: Arc<dyn EventHandler>,
}

impl Processor {
    pub fn new() -> Self {
        Self::with_event_handler(Arc::new(NoOpEventHandler))
    }

    pub fn with_event_handler(event_handler: Arc<dyn EventHandler>) -> Self {
        Self {
            book: OrderBook::new(),
            event_handler,
        }
    }

    /// Process one incoming order, returning the trades it produced.
    ///
    /// Dispatches on `order.side`; the resulting sequence may be empty when
    /// nothing on the opposite side can agree on price. A call either
    /// completes fully or fails before touching the book.
    pub fn process(&mut self, order: Order) -> EngineResult<Vec<Trade>> {
        let order_id = order.id;
        let original_amount = order.amount;

        let mut events = Vec::new();
        events.push(OrderEvent::OrderReceived {
            order_id,
            timestamp: Utc::now(),
        });

        let (trades, rested) = self.match_incoming(order)?;

        for trade in &trades {
            events.push(OrderEvent::OrderMatched {
                trade: trade.clone(),
                timestamp: Utc::now(),
            });
        }

        match rested {
            Some((price, remaining)) => {
                events.push(OrderEvent::OrderAddedToBook {
                    order_id,
                    price,
                    quantity: remaining,
                    timestamp: Utc::now(),
                });
            },
            None => {
                if original_amount > Decimal::ZERO {
                    events.push(OrderEvent::OrderFilled {
                        order_id,
                        total_filled: original_amount,
                        timestamp: Utc::now(),
                    });
                }
            },
        }

        self.event_handler.on_events(events);

        Ok(trades)
    }

    /// Read-only access to the book, for snapshotting and reporting
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// Resting orders of one side in priority order (best first)
    pub fn orders(&self, side: Side) -> Vec<&Order> {
        self.book.side(side).iter().collect()
    }

    // ========================================================================
    // Private methods
    // ========================================================================

    /// Walk the opposite side from the best price outward, trading while
    /// price agreement holds and quantity remains.
    ///
    /// Returns the trades plus, when a remainder rested in the book, its
    /// price (None for market orders) and remaining amount.
    #[allow(clippy::type_complexity)]
    fn match_incoming(
        &mut self,
        mut taker: Order,
    ) -> EngineResult<(Vec<Trade>, Option<(Option<Decimal>, Decimal)>)> {
        let mut trades = Vec::new();
        let opposite = self.book.side_mut(taker.side.opposite());

        // Priced makers first. Stop outright when the best resting price no
        // longer satisfies the incoming limit; exact price equality is a
        // match. A price-blocked walk never reaches the market-order tail,
        // which ranks behind every priced maker.
        let mut price_blocked = false;
        while !taker.is_filled() {
            let best_price = match opposite.best_price() {
                Some(price) => price,
                None => break,
            };
            if let Some(limit_price) = taker.limit_price() {
                let crosses = match taker.side {
                    Side::Buy => best_price <= limit_price,
                    Side::Sell => best_price >= limit_price,
                };
                if !crosses {
                    price_blocked = true;
                    break;
                }
            }
            let maker = match opposite.pop_best_limit() {
                Some(order) => order,
                None => break,
            };
            Self::fill_pair(maker, &mut taker, &mut trades, opposite)?;
        }

        // The market-order tail trades only against a priced taker: two
        // unpriced orders cannot agree on a price, so a market taker skips
        // it entirely.
        if taker.is_limit() && !price_blocked {
            while !taker.is_filled() {
                let maker = match opposite.pop_market() {
                    Some(order) => order,
                    None => break,
                };
                Self::fill_pair(maker, &mut taker, &mut trades, opposite)?;
            }
        }

        if !taker.is_filled() {
            let rested = (taker.limit_price(), taker.amount);
            self.book.add(taker)?;
            return Ok((trades, Some(rested)));
        }

        Ok((trades, None))
    }

    /// Execute one maker/taker fill: emit a trade for the smaller of the two
    /// remaining amounts and return the maker to the book when it still has
    /// quantity left (only possible once the taker is exhausted).
    fn fill_pair(
        mut maker: Order,
        taker: &mut Order,
        trades: &mut Vec<Trade>,
        side: &mut BookSide,
    ) -> EngineResult<()> {
        let price = execution_price(&maker, taker)?;
        let quantity = taker.amount.min(maker.amount);

        maker.fill(quantity);
        taker.fill(quantity);
        trades.push(Trade::new(taker.id, maker.id, quantity, price));

        if !maker.is_filled() {
            side.restore(maker);
        }

        Ok(())
    }
}

impl Default for Processor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderId;

    fn limit(id: u64, side: Side, price: &str, amount: i64) -> Order {
        Order::limit(id, side, price.parse().unwrap(), Decimal::from(amount))
    }

    fn market(id: u64, side: Side, amount: i64) -> Order {
        Order::market(id, side, Decimal::from(amount))
    }

    fn assert_trade(trade: &Trade, taker: u64, maker: u64, amount: i64, price: &str) {
        assert_eq!(trade.taker_order_id, OrderId::new(taker));
        assert_eq!(trade.maker_order_id, OrderId::new(maker));
        assert_eq!(trade.amount, Decimal::from(amount));
        assert_eq!(trade.price, price.parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_two_market_orders_never_trade() {
        for first_side in [Side::Buy, Side::Sell] {
            let mut processor = Processor::new();
            let trades = processor.process(market(1, first_side, 1)).unwrap();
            assert!(trades.is_empty());
            let trades = processor.process(market(2, first_side.opposite(), 1)).unwrap();
            assert!(trades.is_empty());

            // Both rest in the book indefinitely
            assert_eq!(processor.orders(Side::Buy).len(), 1);
            assert_eq!(processor.orders(Side::Sell).len(), 1);
        }
    }

    #[test]
    fn test_limit_buy_fills_resting_market_sell_at_buy_price() {
        let mut processor = Processor::new();
        processor.process(market(2, Side::Sell, 100)).unwrap();

        let trades = processor.process(limit(1, Side::Buy, "1.3", 100)).unwrap();
        assert_eq!(trades.len(), 1);
        assert_trade(&trades[0], 1, 2, 100, "1.3");
        assert!(processor.orders(Side::Buy).is_empty());
        assert!(processor.orders(Side::Sell).is_empty());
    }

    #[test]
    fn test_limit_sell_fills_resting_market_buy_at_sell_price() {
        let mut processor = Processor::new();
        processor.process(market(1, Side::Buy, 100)).unwrap();

        let trades = processor.process(limit(2, Side::Sell, "1.3", 100)).unwrap();
        assert_eq!(trades.len(), 1);
        assert_trade(&trades[0], 2, 1, 100, "1.3");
        assert!(processor.orders(Side::Buy).is_empty());
        assert!(processor.orders(Side::Sell).is_empty());
    }

    #[test]
    fn test_exact_cross_at_different_prices_fills_at_lower_quote() {
        let mut processor = Processor::new();
        assert!(processor.process(limit(1, Side::Buy, "1.3", 100)).unwrap().is_empty());

        let trades = processor.process(limit(2, Side::Sell, "1.29", 100)).unwrap();
        assert_eq!(trades.len(), 1);
        assert_trade(&trades[0], 2, 1, 100, "1.29");
        assert!(processor.orders(Side::Buy).is_empty());
        assert!(processor.orders(Side::Sell).is_empty());
    }

    #[test]
    fn test_no_cross_leaves_both_orders_resting() {
        let mut processor = Processor::new();
        assert!(processor.process(limit(1, Side::Buy, "1.29", 100)).unwrap().is_empty());
        assert!(processor.process(limit(2, Side::Sell, "1.30", 100)).unwrap().is_empty());

        assert_eq!(processor.orders(Side::Buy).len(), 1);
        assert_eq!(processor.orders(Side::Sell).len(), 1);
    }

    #[test]
    fn test_exact_price_equality_is_a_match() {
        // The boundary case: maker ask price equals the buy limit exactly
        let mut processor = Processor::new();
        processor.process(limit(1, Side::Sell, "1.29", 100)).unwrap();

        let trades = processor.process(limit(2, Side::Buy, "1.29", 100)).unwrap();
        assert_eq!(trades.len(), 1);
        assert_trade(&trades[0], 2, 1, 100, "1.29");
    }

    #[test]
    fn test_sell_walks_bids_from_highest_price() {
        let mut processor = Processor::new();
        processor.process(limit(2, Side::Buy, "1.29", 1)).unwrap();
        processor.process(limit(3, Side::Buy, "1.3", 20)).unwrap();
        processor.process(limit(4, Side::Buy, "1.31", 90)).unwrap();

        let trades = processor.process(limit(1, Side::Sell, "1.29", 100)).unwrap();
        assert_eq!(trades.len(), 2);
        assert_trade(&trades[0], 1, 4, 90, "1.29");
        assert_trade(&trades[1], 1, 3, 10, "1.29");

        // The 1.29 bid is untouched; the 1.30 bid keeps its remainder
        assert!(processor.orders(Side::Sell).is_empty());
        let bids = processor.orders(Side::Buy);
        assert_eq!(bids.len(), 2);
        assert_eq!(bids[0].id, OrderId::new(3));
        assert_eq!(bids[0].amount, Decimal::from(10));
        assert_eq!(bids[1].id, OrderId::new(2));
        assert_eq!(bids[1].amount, Decimal::from(1));
    }

    #[test]
    fn test_partial_fill_rests_remainder() {
        let mut processor = Processor::new();
        processor.process(limit(2, Side::Sell, "1.29", 1)).unwrap();
        processor.process(limit(3, Side::Sell, "1.30", 20)).unwrap();

        let trades = processor.process(limit(1, Side::Buy, "1.29", 100)).unwrap();
        assert_eq!(trades.len(), 1);
        assert_trade(&trades[0], 1, 2, 1, "1.29");

        let bids = processor.orders(Side::Buy);
        assert_eq!(bids.len(), 1);
        assert_eq!(bids[0].amount, Decimal::from(99));

        // The too-expensive sell keeps its original amount
        let asks = processor.orders(Side::Sell);
        assert_eq!(asks.len(), 1);
        assert_eq!(asks[0].id, OrderId::new(3));
        assert_eq!(asks[0].amount, Decimal::from(20));
    }

    #[test]
    fn test_maker_partially_consumed_keeps_time_priority() {
        let mut processor = Processor::new();
        processor.process(limit(1, Side::Sell, "1.29", 100)).unwrap();
        processor.process(limit(2, Side::Sell, "1.29", 100)).unwrap();

        processor.process(limit(3, Side::Buy, "1.29", 40)).unwrap();

        let asks = processor.orders(Side::Sell);
        assert_eq!(asks[0].id, OrderId::new(1));
        assert_eq!(asks[0].amount, Decimal::from(60));
        assert_eq!(asks[1].id, OrderId::new(2));
        assert_eq!(asks[1].amount, Decimal::from(100));
    }

    #[test]
    fn test_market_taker_sweeps_priced_levels_only() {
        let mut processor = Processor::new();
        processor.process(limit(1, Side::Sell, "1.29", 30)).unwrap();
        processor.process(limit(2, Side::Sell, "1.35", 30)).unwrap();
        processor.process(market(3, Side::Sell, 50)).unwrap();

        let trades = processor.process(market(4, Side::Buy, 100)).unwrap();
        assert_eq!(trades.len(), 2);
        assert_trade(&trades[0], 4, 1, 30, "1.29");
        assert_trade(&trades[1], 4, 2, 30, "1.35");

        // The resting market sell is skipped; the market buy remainder rests
        let bids = processor.orders(Side::Buy);
        assert_eq!(bids.len(), 1);
        assert_eq!(bids[0].id, OrderId::new(4));
        assert_eq!(bids[0].amount, Decimal::from(40));
        assert_eq!(processor.orders(Side::Sell).len(), 1);
    }

    #[test]
    fn test_price_blocked_walk_never_reaches_market_tail() {
        let mut processor = Processor::new();
        processor.process(limit(1, Side::Sell, "1.50", 100)).unwrap();
        processor.process(market(2, Side::Sell, 50)).unwrap();

        // The walk breaks at the too-expensive 1.50 ask; the market sell
        // resting behind it is not matched either.
        let trades = processor.process(limit(3, Side::Buy, "1.30", 10)).unwrap();
        assert!(trades.is_empty());
        assert_eq!(processor.orders(Side::Buy).len(), 1);
        assert_eq!(processor.orders(Side::Sell).len(), 2);
    }

    #[test]
    fn test_zero_amount_order_neither_trades_nor_rests() {
        let mut processor = Processor::new();
        processor.process(limit(1, Side::Sell, "1.29", 100)).unwrap();

        let trades = processor.process(limit(2, Side::Buy, "1.29", 0)).unwrap();
        assert!(trades.is_empty());
        assert!(processor.orders(Side::Buy).is_empty());
        assert_eq!(processor.orders(Side::Sell).len(), 1);
    }

    #[test]
    fn test_resting_amount_reaches_zero_exactly_when_removed() {
        let mut processor = Processor::new();
        processor.process(limit(1, Side::Sell, "1.29", 50)).unwrap();
        processor.process(limit(2, Side::Buy, "1.29", 30)).unwrap();

        let asks = processor.orders(Side::Sell);
        assert_eq!(asks.len(), 1);
        assert_eq!(asks[0].amount, Decimal::from(20));

        processor.process(limit(3, Side::Buy, "1.29", 20)).unwrap();
        assert!(processor.orders(Side::Sell).is_empty());
    }
}
