pub mod analytics;
pub mod dashboard;
pub mod health;
pub mod metrics;
pub mod page;
pub mod trades;
pub mod ws;
