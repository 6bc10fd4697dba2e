//! Lot reducer: folds a group of lots into one aggregated position.
//!
//! Both modes share grouping and timestamp reconciliation; they differ only in
//! how the cost fields of the accumulator evolve.
//!
//! Fold order is the arrival order of lots from the source. Quantity and
//! timestamps do not depend on it; the blended cost in COST mode does, because
//! each step compares against the most expensive lot seen *so far*.
//!
//! In COST mode the accumulator's `unit_cost` is the seed lot's cost for the
//! whole fold. Every step pairs it with the incoming lot's cost.

use std::cmp::Ordering;
use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use lotwise_catalog::{CategoryDirectory, CategoryDisplay};

use crate::blend::CostBlender;
use crate::config::CostingConfig;
use crate::key::{GroupKey, identify};
use crate::lot::RawLot;
use crate::position::AggregatedPosition;
use crate::reconcile::Lifespan;

/// How cost fields are folded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMode {
    /// Weighted-average costing with derived sale price (inventory display).
    Cost,
    /// Plain quantity sum keeping the most recently updated cost (sell flow).
    Sum,
}

/// Groups lots and folds each group.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator {
    blender: CostBlender,
}

impl Aggregator {
    pub fn new(config: &CostingConfig) -> Self {
        Self {
            blender: config.blender(),
        }
    }

    pub fn with_blender(blender: CostBlender) -> Self {
        Self { blender }
    }

    /// One aggregation pass over all lots.
    ///
    /// Positions come back in order of each group's first lot.
    pub fn aggregate(
        &self,
        lots: &[RawLot],
        categories: &CategoryDirectory,
        mode: AggregationMode,
    ) -> Vec<AggregatedPosition> {
        let groups = group(lots, categories);
        let unresolved = groups.iter().filter(|g| !g.category.resolved).count();

        let positions: Vec<_> = groups
            .into_iter()
            .filter_map(|g| self.reduce(g.lots, g.category, mode))
            .collect();

        tracing::debug!(
            lots = lots.len(),
            groups = positions.len(),
            unresolved_groups = unresolved,
            ?mode,
            "aggregated lots"
        );
        positions
    }

    /// Fold lots that share one key. Returns `None` for an empty group.
    pub fn reduce<'a>(
        &self,
        lots: impl IntoIterator<Item = &'a RawLot>,
        category: CategoryDisplay,
        mode: AggregationMode,
    ) -> Option<AggregatedPosition> {
        let mut lots = lots.into_iter();
        let first = lots.next()?;
        let mut acc = self.seed(first, category, mode);
        for lot in lots {
            self.fold(&mut acc, lot, mode);
        }
        Some(acc)
    }

    fn seed(
        &self,
        lot: &RawLot,
        category: CategoryDisplay,
        mode: AggregationMode,
    ) -> AggregatedPosition {
        let current_sale_price = match mode {
            AggregationMode::Cost => self.blender.sale_price(lot.unit_cost),
            AggregationMode::Sum => lot.unit_cost,
        };
        AggregatedPosition {
            id: lot.id.clone(),
            name: lot.name.clone(),
            category,
            quantity: lot.quantity,
            unit_cost: lot.unit_cost,
            average_unit_cost: lot.unit_cost,
            current_sale_price,
            most_expensive_unit_cost: lot.unit_cost,
            most_expensive_lot: lot.id.clone(),
            lot_count: 1,
            created_at: lot.created_at,
            updated_at: lot.updated_at,
        }
    }

    fn fold(&self, acc: &mut AggregatedPosition, lot: &RawLot, mode: AggregationMode) {
        acc.quantity = acc.quantity.saturating_add(lot.quantity);

        if lot.unit_cost > acc.most_expensive_unit_cost {
            acc.most_expensive_unit_cost = lot.unit_cost;
            acc.most_expensive_lot = lot.id.clone();
        }

        match mode {
            AggregationMode::Cost => {
                let (current, new_batch) = order_by_creation(acc, lot);
                let blended = self
                    .blender
                    .blend(current, new_batch, acc.most_expensive_unit_cost);
                acc.average_unit_cost = blended.average_unit_cost;
                acc.current_sale_price = blended.sale_price;
            }
            AggregationMode::Sum => {
                if lot.updated_at > acc.updated_at {
                    acc.unit_cost = lot.unit_cost;
                    acc.average_unit_cost = lot.unit_cost;
                    acc.current_sale_price = lot.unit_cost;
                }
            }
        }

        // Must run after the mode step: both modes compare pre-merge instants.
        let span = Lifespan::new(acc.created_at, acc.updated_at)
            .merge(Lifespan::new(lot.created_at, lot.updated_at));
        acc.created_at = span.created_at;
        acc.updated_at = span.updated_at;

        acc.lot_count += 1;
    }
}

/// `(current, new_batch)`: the cost of the earlier-created record first.
///
/// On equal creation instants both slots take the incoming lot's cost.
fn order_by_creation(acc: &AggregatedPosition, lot: &RawLot) -> (Decimal, Decimal) {
    match acc.created_at.cmp(&lot.created_at) {
        Ordering::Less => (acc.unit_cost, lot.unit_cost),
        Ordering::Greater => (lot.unit_cost, acc.unit_cost),
        Ordering::Equal => (lot.unit_cost, lot.unit_cost),
    }
}

/// Lots sharing one key, in arrival order.
#[derive(Debug)]
pub struct LotGroup<'a> {
    pub key: GroupKey,
    pub category: CategoryDisplay,
    pub lots: Vec<&'a RawLot>,
}

/// Partition lots by key, keeping first-seen group order and arrival order
/// within each group.
pub fn group<'a>(lots: &'a [RawLot], categories: &CategoryDirectory) -> Vec<LotGroup<'a>> {
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<LotGroup<'a>> = Vec::new();

    for lot in lots {
        let (key, category) = identify(lot, categories);
        match index.get(&key) {
            Some(&i) => groups[i].lots.push(lot),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(LotGroup {
                    key,
                    category,
                    lots: vec![lot],
                });
            }
        }
    }

    groups
}

/// Aggregate with the default costing configuration.
pub fn aggregate(
    lots: &[RawLot],
    categories: &CategoryDirectory,
    mode: AggregationMode,
) -> Vec<AggregatedPosition> {
    Aggregator::default().aggregate(lots, categories, mode)
}
