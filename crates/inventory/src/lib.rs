//! Lot aggregation and costing.
//!
//! Folds independently recorded purchase lots of the same product into one
//! inventory position. Pure, deterministic, no IO: every pass takes the full
//! set of lots plus a category lookup and returns fresh positions.

pub mod blend;
pub mod config;
pub mod key;
pub mod lot;
pub mod position;
pub mod query;
pub mod reconcile;
pub mod reducer;

pub use blend::{BIAS_FACTOR, BlendedCost, CostBlender, MARKUP, blend};
pub use config::{CRITICAL_STOCK_BELOW, CostingConfig, LOW_STOCK_BELOW};
pub use key::{CategoryKey, GroupKey, identify, key};
pub use lot::{NewLot, RawLot, RawLotRecord, parse_records};
pub use position::{AggregatedPosition, StockLevel};
pub use query::{find_position, find_position_mut, group_exists, search};
pub use reconcile::Lifespan;
pub use reducer::{AggregationMode, Aggregator, LotGroup, aggregate, group};
