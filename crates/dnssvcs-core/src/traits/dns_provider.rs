// # DNS Provider Trait
//
// The caller-facing surface. An external controller loop invokes one of
// these once per reconcile pass for each (record, zone) pair.
//
// ## Usage
//
// ```rust,ignore
// use dnssvcs_core::{DesiredRecord, DnsProvider, Zone};
//
// let record = DesiredRecord::new("*.apps.example.com.", "A", ["11.22.33.44"]).with_ttl(300);
// provider.ensure(&record, &Zone::new("zone-1")).await?;
// ```

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{DesiredRecord, Zone};

/// Trait for reconciling one desired record against one zone
///
/// # Idempotency
///
/// Every operation converges on the desired state and is safe to call
/// again after a partial failure: targets applied before the failure stay
/// applied, the next call picks up the rest.
///
/// # Retries
///
/// Implementations do not retry. Transport retries are configured on the
/// zone clients; anything else is returned to the controller, which owns
/// the reconcile schedule.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Create or update remote records so every target of `record` exists
    async fn ensure(&self, record: &DesiredRecord, zone: &Zone) -> Result<()>;

    /// Same as [`DnsProvider::ensure`]
    async fn replace(&self, record: &DesiredRecord, zone: &Zone) -> Result<()>;

    /// Delete every remote record matching a target of `record`
    ///
    /// Records that are already gone are not an error.
    async fn delete(&self, record: &DesiredRecord, zone: &Zone) -> Result<()>;

    /// Provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
