// ============================================================================
// Double-Auction Matching Engine Library
// Continuous matching with a price-time priority order book
// ============================================================================

//! # Double-Auction Matching Engine
//!
//! A continuous double-auction matching engine for a single instrument.
//! Orders are submitted one at a time; each submission is matched against
//! the opposite side of the book from the best price outward, and any
//! unfilled remainder rests in the book in price-time priority (better
//! price first, FIFO within a price level, market orders behind all priced
//! orders).
//!
//! ## Features
//!
//! - **Price-time priority** order book with a distinct market-order tail
//! - **Limit and market orders** as a tagged type, so "price absent" is a
//!   compile-time fact
//! - **Buyer-favoring price resolution**: execution at the lower of the two
//!   quoted prices
//! - **Event hooks** for logging, metrics, or downstream feeds
//! - Optional serde support for the public data model (`serde` feature)
//!
//! ## Example
//!
//! ```rust
//! use double_auction::prelude::*;
//! use rust_decimal::Decimal;
//!
//! let mut processor = Processor::new();
//!
//! // A resting bid...
//! processor
//!     .process(Order::limit(1, Side::Buy, Decimal::new(129, 2), Decimal::from(100)))
//!     .unwrap();
//!
//! // ...partially consumed by an incoming market sell
//! let trades = processor
//!     .process(Order::market(2, Side::Sell, Decimal::from(40)))
//!     .unwrap();
//!
//! assert_eq!(trades.len(), 1);
//! assert_eq!(trades[0].price, Decimal::new(129, 2));
//! assert_eq!(trades[0].amount, Decimal::from(40));
//!
//! let snapshot = processor.book().snapshot(10);
//! assert_eq!(snapshot.best_bid(), Some(Decimal::new(129, 2)));
//! ```

pub mod domain;
pub mod engine;
pub mod errors;
pub mod interfaces;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        BookSide, Order, OrderBook, OrderBookSnapshot, OrderId, OrderType, Side, Trade,
    };
    pub use crate::engine::{execution_price, Processor};
    pub use crate::errors::{EngineError, EngineResult};
    pub use crate::interfaces::{EventHandler, LoggingEventHandler, NoOpEventHandler, OrderEvent};
}
