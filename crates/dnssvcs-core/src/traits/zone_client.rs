// # Zone Client Trait
//
// Capability interface over the record store of one remote zone. The
// transport behind it (HTTP, auth, retries with backoff) is configured once
// when the client is built and is invisible to the reconciler.
//
// ## Implementations
//
// - In-memory: `crate::zone::MemoryZoneClient`
// - Remote: supplied by the embedding application through a
//   [`ZoneClientFactory`]
//
// ## Not Found
//
// A missing zone or record must surface as an error for which
// `ClientError::is_not_found` is true. The reconciler treats it as an
// already satisfied end state for list, update and delete.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ProviderConfig;
use crate::error::ClientError;
use crate::types::{RecordData, RecordType, ResourceRecord};

/// Trait for zone-scoped record stores
///
/// Implementations must be thread-safe: one client may serve concurrent
/// reconcile calls for different records.
#[async_trait]
pub trait ZoneClient: Send + Sync {
    /// List every record in the zone
    async fn list_records(
        &self,
        instance_id: &str,
        zone_id: &str,
    ) -> Result<Vec<ResourceRecord>, ClientError>;

    /// Look up a record by name
    ///
    /// Returns `Ok(None)` when no record carries the name.
    async fn get_record(
        &self,
        instance_id: &str,
        zone_id: &str,
        name: &str,
    ) -> Result<Option<ResourceRecord>, ClientError>;

    /// Create a record, returning the id the remote service assigned
    async fn create_record(
        &self,
        instance_id: &str,
        zone_id: &str,
        name: &str,
        record_type: RecordType,
        rdata: &RecordData,
        ttl: i64,
    ) -> Result<String, ClientError>;

    /// Rewrite the name, payload and TTL of an existing record
    async fn update_record(
        &self,
        instance_id: &str,
        zone_id: &str,
        record_id: &str,
        name: &str,
        rdata: &RecordData,
        ttl: i64,
    ) -> Result<ResourceRecord, ClientError>;

    /// Delete a record by id
    async fn delete_record(
        &self,
        instance_id: &str,
        zone_id: &str,
        record_id: &str,
    ) -> Result<(), ClientError>;
}

/// Helper trait for constructing zone clients from configuration
pub trait ZoneClientFactory: Send + Sync {
    /// Create the client for one configured zone
    ///
    /// The retry policy in `config.retry` is applied here, once.
    fn create(
        &self,
        config: &ProviderConfig,
        zone_id: &str,
    ) -> Result<Arc<dyn ZoneClient>, crate::Error>;
}
