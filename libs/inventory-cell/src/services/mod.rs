pub mod alert;
pub mod ledger;
pub mod supply;
pub mod transaction;

pub use alert::AlertService;
pub use supply::SupplyService;
pub use transaction::TransactionService;
