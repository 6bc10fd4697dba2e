//! Cost blender: weighted average cost and derived sale price.
//!
//! The only place the bias and markup factors are applied.

use rust_decimal::Decimal;

/// Share of the gap between the pair average and the group's most expensive
/// lot that the blended cost moves toward the most expensive lot.
pub const BIAS_FACTOR: Decimal = Decimal::from_parts(25, 0, 0, false, 2);

/// Multiplier from average unit cost to sale price.
pub const MARKUP: Decimal = Decimal::from_parts(120, 0, 0, false, 2);

/// Result of one blend step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendedCost {
    /// Plain mean of the two costs being merged.
    pub cost_average: Decimal,
    pub average_unit_cost: Decimal,
    pub sale_price: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostBlender {
    bias: Decimal,
    markup: Decimal,
}

impl Default for CostBlender {
    fn default() -> Self {
        Self::new(BIAS_FACTOR, MARKUP)
    }
}

impl CostBlender {
    pub fn new(bias: Decimal, markup: Decimal) -> Self {
        Self { bias, markup }
    }

    pub fn bias(&self) -> Decimal {
        self.bias
    }

    pub fn markup(&self) -> Decimal {
        self.markup
    }

    /// Blend the cost already on the position with an incoming batch cost.
    ///
    /// `current` is the cost of the earlier-created record, `new_batch` the
    /// later one. The blend is symmetric in those two; the order only matters
    /// for readability at the call site.
    pub fn blend(
        &self,
        current: Decimal,
        new_batch: Decimal,
        most_expensive: Decimal,
    ) -> BlendedCost {
        let cost_average = (current + new_batch) / Decimal::TWO;
        let average_unit_cost = cost_average + (most_expensive - cost_average) * self.bias;
        BlendedCost {
            cost_average,
            average_unit_cost,
            sale_price: self.sale_price(average_unit_cost),
        }
    }

    pub fn sale_price(&self, average_unit_cost: Decimal) -> Decimal {
        average_unit_cost * self.markup
    }
}

/// [`CostBlender::blend`] with an explicit bias and the default markup.
///
/// Returns `(average_unit_cost, sale_price)`.
pub fn blend(
    older: Decimal,
    newer: Decimal,
    most_expensive: Decimal,
    bias: Decimal,
) -> (Decimal, Decimal) {
    let blended = CostBlender::new(bias, MARKUP).blend(older, newer, most_expensive);
    (blended.average_unit_cost, blended.sale_price)
}
