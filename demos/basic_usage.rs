// ============================================================================
// Basic Usage Example
// ============================================================================

use double_auction::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Double-Auction Matching Engine Example ===\n");

    let mut processor = Processor::with_event_handler(Arc::new(LoggingEventHandler));

    // Add sell orders at different prices
    println!("Adding sell orders...");
    for i in 0i64..5 {
        processor
            .process(Order::limit(
                i as u64,
                Side::Sell,
                Decimal::from(50_000 + i * 100),
                Decimal::from(1),
            ))
            .unwrap();
    }

    // Add buy orders below the spread
    println!("Adding buy orders...");
    for i in 0i64..5 {
        processor
            .process(Order::limit(
                (i + 10) as u64,
                Side::Buy,
                Decimal::from(49_900 - i * 100),
                Decimal::from(1),
            ))
            .unwrap();
    }

    // Get order book snapshot
    println!("\n=== Order Book Snapshot ===");
    let snapshot = processor.book().snapshot(5);

    println!("\nBids:");
    for (price, qty) in &snapshot.bids {
        println!("  {} @ {}", qty, price);
    }

    println!("\nAsks:");
    for (price, qty) in &snapshot.asks {
        println!("  {} @ {}", qty, price);
    }

    println!("\nSpread:    {:?}", snapshot.spread);
    println!("Mid price: {:?}", snapshot.mid_price);

    // Cross the spread: a marketable buy sweeps the two best asks
    println!("\n=== Crossing the spread ===");
    let trades = processor
        .process(Order::limit(
            20,
            Side::Buy,
            Decimal::from(50_100),
            Decimal::from(2),
        ))
        .unwrap();

    for trade in &trades {
        println!(
            "Trade: taker {} x maker {}  {} @ {}",
            trade.taker_order_id, trade.maker_order_id, trade.amount, trade.price
        );
    }

    let snapshot = processor.book().snapshot(5);
    println!("\nBest ask after sweep: {:?}", snapshot.best_ask());
}
