//! Zone client registry
//!
//! Maps zone ids to the zone client that serves them. The registry is
//! assembled once, when the provider is constructed, and is read-only
//! afterwards; it needs no locking and can be shared across concurrent
//! reconcile calls.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dnssvcs_core::registry::ZoneRegistry;
//!
//! let registry = ZoneRegistry::build(&config, &factory)?;
//! let client = registry.get("zone-1").expect("registered");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::config::ProviderConfig;
use crate::error::Result;
use crate::traits::{ZoneClient, ZoneClientFactory};

/// Read-only mapping from zone id to zone client
#[derive(Clone, Default)]
pub struct ZoneRegistry {
    clients: HashMap<String, Arc<dyn ZoneClient>>,
}

impl ZoneRegistry {
    /// Build one client per configured zone
    pub fn build(config: &ProviderConfig, factory: &dyn ZoneClientFactory) -> Result<Self> {
        config.validate()?;

        let mut clients = HashMap::with_capacity(config.zones.len());
        for zone_id in &config.zones {
            let client = factory.create(config, zone_id)?;
            info!(zone = %zone_id, "registered zone client");
            clients.insert(zone_id.clone(), client);
        }

        Ok(Self { clients })
    }

    /// Create a registry from already built clients
    pub fn from_clients(
        clients: impl IntoIterator<Item = (impl Into<String>, Arc<dyn ZoneClient>)>,
    ) -> Self {
        Self {
            clients: clients
                .into_iter()
                .map(|(zone_id, client)| (zone_id.into(), client))
                .collect(),
        }
    }

    /// Client registered for a zone
    pub fn get(&self, zone_id: &str) -> Option<&Arc<dyn ZoneClient>> {
        self.clients.get(zone_id)
    }

    /// Check if a zone is registered
    pub fn contains(&self, zone_id: &str) -> bool {
        self.clients.contains_key(zone_id)
    }

    /// Registered zone ids, sorted
    pub fn zone_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.clients.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Iterate over (zone id, client) pairs, sorted by zone id
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn ZoneClient>)> {
        let mut entries: Vec<_> = self
            .clients
            .iter()
            .map(|(id, client)| (id.as_str(), client))
            .collect();
        entries.sort_unstable_by_key(|(id, _)| *id);
        entries.into_iter()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl fmt::Debug for ZoneRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoneRegistry")
            .field("zones", &self.zone_ids())
            .finish()
    }
}
