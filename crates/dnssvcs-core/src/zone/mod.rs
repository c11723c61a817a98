// # Zone Client Implementations
//
// Zone clients that ship with the core. Remote clients are supplied by the
// embedding application through a `ZoneClientFactory`.

pub mod memory;

pub use memory::{MemoryZoneClient, MemoryZoneClientFactory};
