// ============================================================================
// Domain Models Module
// Contains all core domain entities and value objects
// ============================================================================

pub mod order;
pub mod order_book;
pub mod trade;

pub use order::{Order, OrderId, OrderType, Side};
pub use order_book::{BookSide, OrderBook, OrderBookSnapshot};
pub use trade::Trade;
