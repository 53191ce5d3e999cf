pub mod carrier_extractor;
pub mod upstream_client;

pub use upstream_client::{UpstreamClient, UpstreamError};
