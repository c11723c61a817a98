//! Core traits for the reconciler
//!
//! - [`ZoneClient`]: capability interface over one remote zone
//! - [`ZoneClientFactory`]: builds a zone client per configured zone
//! - [`DnsProvider`]: the operations the external controller calls

pub mod dns_provider;
pub mod zone_client;

pub use dns_provider::DnsProvider;
pub use zone_client::{ZoneClient, ZoneClientFactory};
