pub mod ledger;
pub mod models;
pub mod queries;
