// ============================================================================
// Engine Module
// Contains the core matching business logic
// ============================================================================

mod processor;
pub mod pricing;

pub use pricing::execution_price;
pub use processor::Processor;
