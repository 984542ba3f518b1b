// ============================================================================
// Price Resolution
// Determines the execution price for a matched maker/taker pair
// ============================================================================

use crate::domain::Order;
use crate::errors::{EngineError, EngineResult};
use rust_decimal::Decimal;

/// Resolve the execution price for a matched pair of orders.
///
/// The price is the minimum of the prices the two orders carry; a market
/// order contributes no constraint. When only one order is priced, that
/// price is used (there is no other liquidity reference); when both are
/// priced, the lower quote wins, so price improvement accrues to the buyer.
///
/// Fails with [`EngineError::NoPriceAvailable`] on two market orders. The
/// processor never matches two unpriced orders, so hitting that branch
/// means a dispatch bug upstream.
pub fn execution_price(maker: &Order, taker: &Order) -> EngineResult<Decimal> {
    match (maker.limit_price(), taker.limit_price()) {
        (Some(maker_price), Some(taker_price)) => Ok(maker_price.min(taker_price)),
        (Some(maker_price), None) => Ok(maker_price),
        (None, Some(taker_price)) => Ok(taker_price),
        (None, None) => Err(EngineError::NoPriceAvailable),
    }
}
