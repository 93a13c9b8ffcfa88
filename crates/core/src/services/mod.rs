pub mod aggregator;
pub mod budget_service;
pub mod category_service;
pub mod ledger_service;
pub mod period_filter;
