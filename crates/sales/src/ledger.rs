//! Sale ledger collaborator.

use std::collections::HashSet;
use std::sync::{Arc, RwLock, RwLockReadGuard};

use thiserror::Error;

use lotwise_core::{LotId, SaleId};

use crate::settlement::SaleRecord;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("sale rejected: {0}")]
    Rejected(String),

    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

/// Accepts settled sales for persistence.
///
/// Called once per successful sale. Settlement does not retry or queue on the
/// ledger's behalf.
pub trait SaleLedger {
    fn submit(&self, sale: &SaleRecord) -> Result<(), LedgerError>;
}

impl<T: SaleLedger + ?Sized> SaleLedger for Arc<T> {
    fn submit(&self, sale: &SaleRecord) -> Result<(), LedgerError> {
        (**self).submit(sale)
    }
}

/// In-memory ledger (no persistence). Rejects a sale id it has already seen.
#[derive(Debug, Default)]
pub struct InMemorySaleLedger {
    inner: RwLock<LedgerState>,
}

#[derive(Debug, Default)]
struct LedgerState {
    sales: Vec<SaleRecord>,
    seen: HashSet<SaleId>,
}

impl InMemorySaleLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<RwLockReadGuard<'_, LedgerState>, LedgerError> {
        self.inner
            .read()
            .map_err(|_| LedgerError::Unavailable("ledger lock poisoned".to_string()))
    }

    /// All accepted sales in submission order.
    pub fn sales(&self) -> Result<Vec<SaleRecord>, LedgerError> {
        Ok(self.state()?.sales.clone())
    }

    pub fn len(&self) -> Result<usize, LedgerError> {
        Ok(self.state()?.sales.len())
    }

    pub fn is_empty(&self) -> Result<bool, LedgerError> {
        Ok(self.len()? == 0)
    }

    /// Units sold from the position identified by `lot_id`.
    pub fn quantity_sold(&self, lot_id: &LotId) -> Result<i64, LedgerError> {
        Ok(self
            .state()?
            .sales
            .iter()
            .filter(|s| &s.lot_id == lot_id)
            .map(|s| s.quantity_sold)
            .sum())
    }
}

impl SaleLedger for InMemorySaleLedger {
    fn submit(&self, sale: &SaleRecord) -> Result<(), LedgerError> {
        let mut state = self
            .inner
            .write()
            .map_err(|_| LedgerError::Unavailable("ledger lock poisoned".to_string()))?;

        if !state.seen.insert(sale.sale_id) {
            return Err(LedgerError::Rejected(format!("duplicate sale id {}", sale.sale_id)));
        }
        state.sales.push(sale.clone());
        Ok(())
    }
}
