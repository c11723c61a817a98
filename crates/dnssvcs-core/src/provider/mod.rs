//! DNS Services provider
//!
//! [`DnsSvcsProvider`] is the reconciler the external controller talks to.
//! For each call it:
//!
//! 1. Validates and normalizes the desired record (no I/O on bad input)
//! 2. Looks up the zone client registered for the zone
//! 3. Lists the zone's current records (404 counts as an empty zone)
//! 4. Plans create/update/delete actions with the matcher
//! 5. Applies the actions one at a time, stopping at the first failure
//!
//! ## Partial progress
//!
//! Actions applied before a failure are not rolled back. The remote service
//! is the source of truth and the controller calls again on its next pass;
//! planning from a fresh listing picks up where the previous call stopped.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::ProviderConfig;
use crate::error::{ClientError, Error, Result};
use crate::normalize::{NormalizedRecord, normalize_dns_name};
use crate::reconcile::{ReconcileAction, parse_remote_records, plan_delete, plan_ensure};
use crate::registry::ZoneRegistry;
use crate::traits::{DnsProvider, ZoneClient, ZoneClientFactory};
use crate::types::{DesiredRecord, RemoteRecord, Zone};

/// Reconciler for private DNS Services zones
#[derive(Debug, Clone)]
pub struct DnsSvcsProvider {
    /// DNS Services instance owning the zones
    instance_id: String,

    /// Zone clients, fixed at construction
    zones: ZoneRegistry,
}

impl DnsSvcsProvider {
    /// Create a provider, building one zone client per configured zone
    ///
    /// # Returns
    ///
    /// - `Ok(DnsSvcsProvider)`: Every zone has a client
    /// - `Err(Error::Config)`: The configuration is invalid or a client could not be built
    pub fn new(config: &ProviderConfig, factory: &dyn ZoneClientFactory) -> Result<Self> {
        let zones = ZoneRegistry::build(config, factory)?;
        Ok(Self::with_registry(config.instance_id.clone(), zones))
    }

    /// Create a provider from an already assembled registry
    pub fn with_registry(instance_id: impl Into<String>, zones: ZoneRegistry) -> Self {
        Self {
            instance_id: instance_id.into(),
            zones,
        }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn zones(&self) -> &ZoneRegistry {
        &self.zones
    }

    /// Probe every zone client with a listing
    ///
    /// All failures are collected into one [`Error::ZoneValidation`].
    pub async fn validate_zones(&self) -> Result<()> {
        let mut failures = Vec::new();

        for (zone_id, client) in self.zones.iter() {
            if let Err(e) = client.list_records(&self.instance_id, zone_id).await {
                failures.push(format!("failed to get dns records for zone {zone_id}: {e}"));
            }
        }

        if failures.is_empty() {
            info!(zones = self.zones.len(), "validated dns services");
            Ok(())
        } else {
            Err(Error::ZoneValidation(failures))
        }
    }

    /// Actions [`DnsProvider::ensure`] would apply, without applying them
    pub async fn plan_ensure(
        &self,
        record: &DesiredRecord,
        zone: &Zone,
    ) -> Result<Vec<ReconcileAction>> {
        let desired = NormalizedRecord::new(record, zone)?;
        let client = self.client_for(zone)?;
        let current = self.current_records("ensure", client, &zone.id).await?;
        Ok(plan_ensure(&desired, &current))
    }

    /// Actions [`DnsProvider::delete`] would apply, without applying them
    pub async fn plan_delete(
        &self,
        record: &DesiredRecord,
        zone: &Zone,
    ) -> Result<Vec<ReconcileAction>> {
        let desired = NormalizedRecord::for_delete(record, zone)?;
        let client = self.client_for(zone)?;
        let current = self.current_records("delete", client, &zone.id).await?;
        Ok(plan_delete(&desired, &current))
    }

    /// Fetch a single record by name
    ///
    /// The name is normalized first. A 404 from the remote service is `Ok(None)`.
    pub async fn lookup(&self, dns_name: &str, zone: &Zone) -> Result<Option<RemoteRecord>> {
        let client = self.client_for(zone)?;
        let name = normalize_dns_name(dns_name);

        match client.get_record(&self.instance_id, &zone.id, name).await {
            Ok(Some(record)) => RemoteRecord::try_from(record).map(Some),
            Ok(None) => Ok(None),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(Error::read("lookup", "get", e)),
        }
    }

    async fn create_or_update(&self, record: &DesiredRecord, zone: &Zone) -> Result<()> {
        let desired = NormalizedRecord::new(record, zone)?;
        let client = self.client_for(zone)?;
        let current = self.current_records("ensure", client, &zone.id).await?;
        let actions = plan_ensure(&desired, &current);
        self.apply("ensure", client, zone, &desired, &actions).await
    }

    async fn remove(&self, record: &DesiredRecord, zone: &Zone) -> Result<()> {
        let desired = NormalizedRecord::for_delete(record, zone)?;
        let client = self.client_for(zone)?;
        let current = self.current_records("delete", client, &zone.id).await?;
        let actions = plan_delete(&desired, &current);
        self.apply("delete", client, zone, &desired, &actions).await
    }

    fn client_for(&self, zone: &Zone) -> Result<&Arc<dyn ZoneClient>> {
        self.zones
            .get(&zone.id)
            .ok_or_else(|| Error::UnknownZone(zone.id.clone()))
    }

    /// List and parse the zone's records; a 404 is an empty zone
    async fn current_records(
        &self,
        operation: &'static str,
        client: &Arc<dyn ZoneClient>,
        zone_id: &str,
    ) -> Result<Vec<RemoteRecord>> {
        match client.list_records(&self.instance_id, zone_id).await {
            Ok(records) => parse_remote_records(records),
            Err(e) if e.is_not_found() => {
                debug!(zone = %zone_id, "zone listing not found, treating as empty");
                Ok(Vec::new())
            }
            Err(e) => Err(Error::read(operation, "list", e)),
        }
    }

    /// Apply actions sequentially, stopping at the first failure
    async fn apply(
        &self,
        operation: &'static str,
        client: &Arc<dyn ZoneClient>,
        zone: &Zone,
        desired: &NormalizedRecord,
        actions: &[ReconcileAction],
    ) -> Result<()> {
        for action in actions {
            match action {
                ReconcileAction::Create { name, data, ttl } => {
                    let id = client
                        .create_record(
                            &self.instance_id,
                            &zone.id,
                            name,
                            data.record_type(),
                            data,
                            *ttl,
                        )
                        .await
                        .map_err(|e| Error::write(operation, "create", e))?;
                    info!(
                        record = %name,
                        id = %id,
                        zone = %zone.id,
                        content = data.target(),
                        "created DNS record"
                    );
                }
                ReconcileAction::Update {
                    id,
                    name,
                    data,
                    ttl,
                } => {
                    let result = client
                        .update_record(&self.instance_id, &zone.id, id, name, data, *ttl)
                        .await;
                    if skip_not_found(result.map(|_| ()), operation, "update", id)? {
                        info!(
                            record = %name,
                            id = %id,
                            zone = %zone.id,
                            content = data.target(),
                            "updated DNS record"
                        );
                    }
                }
                ReconcileAction::Delete { id } => {
                    let result = client.delete_record(&self.instance_id, &zone.id, id).await;
                    if skip_not_found(result, operation, "delete", id)? {
                        info!(
                            record = %desired.dns_name,
                            id = %id,
                            zone = %zone.id,
                            "deleted DNS record"
                        );
                    }
                }
                ReconcileAction::NoOp => {
                    debug!(record = %desired.dns_name, zone = %zone.id, "nothing to do for target");
                }
            }
        }

        Ok(())
    }
}

/// `Ok(true)` when the write landed, `Ok(false)` when the record was already gone
fn skip_not_found(
    result: std::result::Result<(), ClientError>,
    operation: &'static str,
    call: &'static str,
    id: &str,
) -> Result<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(e) if e.is_not_found() => {
            debug!(id = %id, call, "dns record not found, skipping");
            Ok(false)
        }
        Err(e) => Err(Error::write(operation, call, e)),
    }
}

#[async_trait]
impl DnsProvider for DnsSvcsProvider {
    async fn ensure(&self, record: &DesiredRecord, zone: &Zone) -> Result<()> {
        self.create_or_update(record, zone).await
    }

    async fn replace(&self, record: &DesiredRecord, zone: &Zone) -> Result<()> {
        self.create_or_update(record, zone).await
    }

    async fn delete(&self, record: &DesiredRecord, zone: &Zone) -> Result<()> {
        self.remove(record, zone).await
    }

    fn provider_name(&self) -> &'static str {
        "dnssvcs"
    }
}
