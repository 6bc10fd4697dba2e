//! Sale settlement.
//!
//! Validates a sale against an aggregated position, decrements its stock and
//! emits a sale record for the external ledger. Persisting the record is the
//! ledger's job, not this crate's.

pub mod ledger;
pub mod settlement;

pub use ledger::{InMemorySaleLedger, LedgerError, SaleLedger};
pub use settlement::{SaleRecord, SettlementError, check_quantity, sell, sell_and_record, sell_at};
