// # Memory Zone Client
//
// In-memory implementation of ZoneClient.
//
// ## Purpose
//
// Holds records the way the remote service would, without any network.
// Useful for testing, local development and dry runs of a reconcile pass.
//
// ## Behavior
//
// - Records are kept per zone id; the instance id is ignored
// - Ids are assigned sequentially ("rr-1", "rr-2", ...)
// - Unknown record ids answer `ClientError::NotFound`, like a 404
// - Nothing survives the process

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::config::ProviderConfig;
use crate::error::ClientError;
use crate::traits::{ZoneClient, ZoneClientFactory};
use crate::types::{RecordData, RecordType, ResourceRecord};

/// In-memory zone client
///
/// Clones share the same records.
///
/// # Example
///
/// ```rust,no_run
/// use dnssvcs_core::traits::ZoneClient;
/// use dnssvcs_core::types::{RecordData, RecordType};
/// use dnssvcs_core::zone::MemoryZoneClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = MemoryZoneClient::new();
///     let data = RecordData::new(RecordType::A, "11.22.33.44");
///
///     let id = client
///         .create_record("instance-1", "zone-1", "www", RecordType::A, &data, 300)
///         .await?;
///     let records = client.list_records("instance-1", "zone-1").await?;
///     assert_eq!(records[0].id, id);
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryZoneClient {
    zones: Arc<RwLock<HashMap<String, Vec<ResourceRecord>>>>,
    next_id: Arc<AtomicU64>,
}

impl MemoryZoneClient {
    /// Create a new empty memory zone client
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record as if it already existed remotely
    pub async fn insert(&self, zone_id: &str, record: ResourceRecord) {
        let mut guard = self.zones.write().await;
        guard.entry(zone_id.to_string()).or_default().push(record);
    }

    /// Snapshot of a zone's records
    pub async fn records(&self, zone_id: &str) -> Vec<ResourceRecord> {
        let guard = self.zones.read().await;
        guard.get(zone_id).cloned().unwrap_or_default()
    }

    /// Number of records in a zone
    pub async fn len(&self, zone_id: &str) -> usize {
        self.zones.read().await.get(zone_id).map_or(0, Vec::len)
    }

    fn next_record_id(&self) -> String {
        format!("rr-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[async_trait]
impl ZoneClient for MemoryZoneClient {
    async fn list_records(
        &self,
        _instance_id: &str,
        zone_id: &str,
    ) -> Result<Vec<ResourceRecord>, ClientError> {
        Ok(self.records(zone_id).await)
    }

    async fn get_record(
        &self,
        _instance_id: &str,
        zone_id: &str,
        name: &str,
    ) -> Result<Option<ResourceRecord>, ClientError> {
        let guard = self.zones.read().await;
        Ok(guard
            .get(zone_id)
            .and_then(|records| records.iter().find(|r| r.name == name))
            .cloned())
    }

    async fn create_record(
        &self,
        _instance_id: &str,
        zone_id: &str,
        name: &str,
        record_type: RecordType,
        rdata: &RecordData,
        ttl: i64,
    ) -> Result<String, ClientError> {
        if rdata.record_type() != record_type {
            return Err(ClientError::status(
                400,
                format!("payload does not match record type {record_type}"),
            ));
        }

        let id = self.next_record_id();
        let now = Utc::now();
        let mut record = ResourceRecord::new(&id, name, rdata, ttl);
        record.created_on = Some(now);
        record.modified_on = Some(now);

        self.insert(zone_id, record).await;
        Ok(id)
    }

    async fn update_record(
        &self,
        _instance_id: &str,
        zone_id: &str,
        record_id: &str,
        name: &str,
        rdata: &RecordData,
        ttl: i64,
    ) -> Result<ResourceRecord, ClientError> {
        let mut guard = self.zones.write().await;
        let record = guard
            .get_mut(zone_id)
            .and_then(|records| records.iter_mut().find(|r| r.id == record_id))
            .ok_or_else(|| ClientError::not_found(format!("record {record_id}")))?;

        record.name = name.to_string();
        record.record_type = rdata.record_type().as_str().to_string();
        record.rdata = rdata.to_rdata();
        record.ttl = ttl;
        record.modified_on = Some(Utc::now());

        Ok(record.clone())
    }

    async fn delete_record(
        &self,
        _instance_id: &str,
        zone_id: &str,
        record_id: &str,
    ) -> Result<(), ClientError> {
        let mut guard = self.zones.write().await;
        let records = guard
            .get_mut(zone_id)
            .ok_or_else(|| ClientError::not_found(format!("zone {zone_id}")))?;

        let before = records.len();
        records.retain(|r| r.id != record_id);
        if records.len() == before {
            return Err(ClientError::not_found(format!("record {record_id}")));
        }
        Ok(())
    }
}

/// Factory handing out a fresh memory zone client per zone
pub struct MemoryZoneClientFactory;

impl ZoneClientFactory for MemoryZoneClientFactory {
    fn create(
        &self,
        _config: &ProviderConfig,
        _zone_id: &str,
    ) -> Result<Arc<dyn ZoneClient>, crate::Error> {
        Ok(Arc::new(MemoryZoneClient::new()))
    }
}
