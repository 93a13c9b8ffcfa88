pub mod budget;
pub mod category;
pub mod ledger;
pub mod period;
pub mod record;
pub mod settings;
pub mod summary;
