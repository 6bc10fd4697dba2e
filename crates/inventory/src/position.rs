use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use lotwise_catalog::CategoryDisplay;
use lotwise_core::{CategoryId, LotId};

use crate::config::CostingConfig;
use crate::key::{CategoryKey, GroupKey};

/// Single inventory position for one `(name, category)` group.
///
/// Built fresh by every aggregation pass; nothing carries over between passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedPosition {
    /// Identifier of the first lot seen for the group (display only).
    pub id: LotId,
    pub name: String,
    pub category: CategoryDisplay,
    pub quantity: i64,
    /// Raw cost of a contributing lot; see the aggregation mode for which one.
    pub unit_cost: Decimal,
    pub average_unit_cost: Decimal,
    pub current_sale_price: Decimal,
    /// Highest unit cost among the group's lots.
    pub most_expensive_unit_cost: Decimal,
    pub most_expensive_lot: LotId,
    pub lot_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AggregatedPosition {
    /// Grouping key this position was folded under.
    pub fn key(&self) -> GroupKey {
        let category = if self.category.resolved {
            CategoryKey::Resolved(self.category.label.clone())
        } else {
            match CategoryId::new(self.category.label.clone()) {
                Ok(id) => CategoryKey::Unresolved(id),
                Err(_) => CategoryKey::Resolved(self.category.label.clone()),
            }
        };
        GroupKey::new(self.name.clone(), category)
    }

    pub fn stock_level(&self, config: &CostingConfig) -> StockLevel {
        StockLevel::classify(self.quantity, config)
    }
}

/// Stock badge shown next to a position's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockLevel {
    Critical,
    Low,
    Healthy,
}

impl StockLevel {
    pub fn classify(quantity: i64, config: &CostingConfig) -> Self {
        if quantity < config.critical_stock_below {
            StockLevel::Critical
        } else if quantity < config.low_stock_below {
            StockLevel::Low
        } else {
            StockLevel::Healthy
        }
    }
}
