pub mod dashboard;
pub mod form;
pub mod transactions;
