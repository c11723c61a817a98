//! Minimal embedding example for dnssvcs-core
//!
//! Drives a few reconcile passes the way a controller loop would, against
//! in-memory zone clients. A real deployment supplies a `ZoneClientFactory`
//! that builds remote clients instead.

use anyhow::Result;
use dnssvcs_core::{
    DesiredRecord, DnsProvider, DnsSvcsProvider, MemoryZoneClientFactory, ProviderConfig, Zone,
};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = ProviderConfig::new("demo-api-key", "demo-instance", ["zone-a"])
        .with_user_agent("dnssvcs-demo/0.1");
    let provider = DnsSvcsProvider::new(&config, &MemoryZoneClientFactory)?;
    provider.validate_zones().await?;

    let zone = Zone::new("zone-a");
    let record = DesiredRecord::new(
        "*.apps.example.com.",
        "A",
        ["10.0.0.1", "10.0.0.2"],
    )
    .with_ttl(300);

    // First pass creates both targets, second pass only updates
    provider.ensure(&record, &zone).await?;
    for action in provider.plan_ensure(&record, &zone).await? {
        info!("next pass would {}", action);
    }
    provider.replace(&record.clone().with_ttl(45), &zone).await?;

    if let Some(found) = provider.lookup("*.apps.example.com", &zone).await? {
        info!(id = %found.id, content = found.target(), ttl = found.ttl, "lookup");
    }

    provider.delete(&record, &zone).await?;
    let remaining = provider.plan_delete(&record, &zone).await?;
    info!(
        remaining = remaining.iter().filter(|a| a.is_mutation()).count(),
        "records left after delete"
    );

    Ok(())
}
