// # dnssvcs-core
//
// Record reconciliation core for private DNS Services zones.
//
// ## Architecture Overview
//
// One reconcile call takes a desired record and a zone, and converges the
// zone's remote records on it:
// - **Normalizer**: validates input and canonicalizes names and TTLs
// - **Matcher**: plans create/update/delete actions per target
// - **DnsSvcsProvider**: applies the plan through the zone's client
// - **ZoneClient**: capability interface over one remote zone
// - **ZoneRegistry**: read-only map from zone id to zone client
//
// ## Design Principles
//
// 1. **Remote is the source of truth**: no local state between calls
// 2. **Fail closed**: unparseable remote records abort the call
// 3. **Sequential**: one remote write at a time, no rollback
// 4. **No retries**: transport retries belong to the zone clients

pub mod config;
pub mod error;
pub mod normalize;
pub mod provider;
pub mod reconcile;
pub mod registry;
pub mod traits;
pub mod types;
pub mod zone;

// Re-export core types for convenience
pub use config::{ProviderConfig, RetryConfig};
pub use error::{ClientError, Error, Result, ValidationErrors};
pub use provider::DnsSvcsProvider;
pub use reconcile::ReconcileAction;
pub use registry::ZoneRegistry;
pub use traits::{DnsProvider, ZoneClient, ZoneClientFactory};
pub use types::{DesiredRecord, RecordData, RecordType, RemoteRecord, ResourceRecord, Zone};
pub use zone::{MemoryZoneClient, MemoryZoneClientFactory};
