pub mod app;
pub mod chat;
pub mod forward;
pub mod metrics;
pub mod shipping;
