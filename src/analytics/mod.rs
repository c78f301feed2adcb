pub mod baseline;
pub mod equity_curve;
pub mod reconcile;
pub mod summary;
