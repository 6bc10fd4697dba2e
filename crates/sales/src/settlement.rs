use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use lotwise_core::{LotId, SaleId};
use lotwise_inventory::AggregatedPosition;

use crate::ledger::{LedgerError, SaleLedger};

/// A completed sale, ready for the sale ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub sale_id: SaleId,
    /// Identifier of the position sold from (its first lot).
    pub lot_id: LotId,
    pub product_name: String,
    pub category: String,
    pub quantity_sold: i64,
    /// Unit sale price as supplied by the caller.
    pub sale_price: Decimal,
    pub sale_date: DateTime<Utc>,
}

impl SaleRecord {
    pub fn total(&self) -> Decimal {
        self.sale_price * Decimal::from(self.quantity_sold)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettlementError {
    #[error("invalid sale quantity {requested}: must be positive")]
    InvalidQuantity { requested: i64 },

    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: i64, available: i64 },

    #[error("sale ledger rejected the sale: {0}")]
    Ledger(#[from] LedgerError),
}

/// Check `0 < requested <= position.quantity` without touching the position.
pub fn check_quantity(
    position: &AggregatedPosition,
    requested: i64,
) -> Result<(), SettlementError> {
    if requested <= 0 {
        return Err(SettlementError::InvalidQuantity { requested });
    }
    if requested > position.quantity {
        return Err(SettlementError::InsufficientStock {
            requested,
            available: position.quantity,
        });
    }
    Ok(())
}

/// Settle a sale stamped with the current time.
pub fn sell(
    position: &mut AggregatedPosition,
    quantity: i64,
    sale_price: Decimal,
) -> Result<SaleRecord, SettlementError> {
    sell_at(position, quantity, sale_price, Utc::now())
}

/// Settle a sale at an explicit instant.
///
/// On failure the position is left exactly as it was.
pub fn sell_at(
    position: &mut AggregatedPosition,
    quantity: i64,
    sale_price: Decimal,
    sold_at: DateTime<Utc>,
) -> Result<SaleRecord, SettlementError> {
    let record = prepare(position, quantity, sale_price, sold_at)?;
    commit(position, &record);
    Ok(record)
}

/// Settle a sale and hand the record to `ledger`.
///
/// Stock is only decremented once the ledger accepts the record.
pub fn sell_and_record<L: SaleLedger + ?Sized>(
    position: &mut AggregatedPosition,
    quantity: i64,
    sale_price: Decimal,
    sold_at: DateTime<Utc>,
    ledger: &L,
) -> Result<SaleRecord, SettlementError> {
    let record = prepare(position, quantity, sale_price, sold_at)?;
    ledger.submit(&record)?;
    commit(position, &record);
    Ok(record)
}

fn prepare(
    position: &AggregatedPosition,
    quantity: i64,
    sale_price: Decimal,
    sold_at: DateTime<Utc>,
) -> Result<SaleRecord, SettlementError> {
    if let Err(e) = check_quantity(position, quantity) {
        tracing::debug!(product = %position.name, error = %e, "sale refused");
        return Err(e);
    }
    Ok(SaleRecord {
        sale_id: SaleId::new(),
        lot_id: position.id.clone(),
        product_name: position.name.clone(),
        category: position.category.label.clone(),
        quantity_sold: quantity,
        sale_price,
        sale_date: sold_at,
    })
}

fn commit(position: &mut AggregatedPosition, record: &SaleRecord) {
    position.quantity -= record.quantity_sold;
    tracing::info!(
        sale_id = %record.sale_id,
        product = %record.product_name,
        category = %record.category,
        quantity = record.quantity_sold,
        remaining = position.quantity,
        "sale settled"
    );
}
