pub mod ledger;
pub mod merit;
