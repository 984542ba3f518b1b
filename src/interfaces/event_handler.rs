// ============================================================================
// Event Handler Interface
// Defines the contract for handling order and trade events
// ============================================================================

use crate::domain::{OrderId, Trade};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Events emitted by the matching processor.
///
/// Events are delivered after all book mutation for a `process` call has
/// completed, so handlers always observe a consistent book.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrderEvent {
    /// Order received by the processor
    OrderReceived {
        order_id: OrderId,
        timestamp: DateTime<Utc>,
    },

    /// Order matched, trade generated
    OrderMatched {
        trade: Trade,
        timestamp: DateTime<Utc>,
    },

    /// Incoming order fully filled on arrival, never entered the book
    OrderFilled {
        order_id: OrderId,
        total_filled: Decimal,
        timestamp: DateTime<Utc>,
    },

    /// Unfilled remainder added to the book (price is None for market orders)
    OrderAddedToBook {
        order_id: OrderId,
        price: Option<Decimal>,
        quantity: Decimal,
        timestamp: DateTime<Utc>,
    },
}

/// Event handler trait for processing matching events.
/// Implementations can handle logging, metrics, notifications, etc.
pub trait EventHandler: Send + Sync {
    /// Handle an order event
    fn on_event(&self, event: OrderEvent);

    /// Batch event handler (optional optimization)
    fn on_events(&self, events: Vec<OrderEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// No-op event handler for testing
pub struct NoOpEventHandler;

impl EventHandler for NoOpEventHandler {
    fn on_event(&self, _event: OrderEvent) {
        // Do nothing
    }
}

/// Logging event handler
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn on_event(&self, event: OrderEvent) {
        tracing::debug!("Matching processor event: {:?}", event);
    }
}
