//! Domain layer - Entities persisted by the storage manager.
//!
//! Plain serde types with no I/O. The storage adapters only ever see
//! them as JSON text, so field names here define the on-disk format.

pub mod bot_status;
pub mod metric;
pub mod order;

// Re-export core types for convenience
pub use bot_status::{BotBudget, BotStatus, DataFrame, Trade};
pub use metric::{Metric, MetricType, MetricValue};
pub use order::{Order, OrderSide, OrderType, TradingPair};
