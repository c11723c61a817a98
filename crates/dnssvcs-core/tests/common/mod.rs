//! Test doubles and common utilities for reconciler contract tests
//!
//! `FakeZoneClient` records every call it receives and answers with
//! scripted replies, so tests can assert exactly which remote operations a
//! reconcile call issued.

#![allow(dead_code)]

use dnssvcs_core::traits::ZoneClient;
use dnssvcs_core::types::{RecordData, RecordType, ResourceRecord};
use dnssvcs_core::{ClientError, DnsSvcsProvider, ZoneRegistry};
use std::sync::{Arc, Mutex};

pub const INSTANCE_ID: &str = "instance-1";
pub const ZONE_ID: &str = "zoneID";

/// A call received by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Get {
        name: String,
    },
    Create {
        name: String,
        record_type: RecordType,
        target: String,
        ttl: i64,
    },
    Update {
        id: String,
        name: String,
        target: String,
        ttl: i64,
    },
    Delete {
        id: String,
    },
}

/// Scripted answer for one kind of call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Reply {
    #[default]
    Ok,
    NotFound,
    Status(u16),
    Transport,
}

impl Reply {
    fn check(self, what: &str) -> Result<(), ClientError> {
        match self {
            Reply::Ok => Ok(()),
            Reply::NotFound => Err(ClientError::not_found(what.to_string())),
            Reply::Status(status) => Err(ClientError::status(status, format!("error in {what}"))),
            Reply::Transport => Err(anyhow::anyhow!("connection reset during {what}").into()),
        }
    }
}

#[derive(Default)]
struct FakeState {
    records: Vec<ResourceRecord>,
    calls: Vec<Call>,
    list_reply: Reply,
    create_reply: Reply,
    update_reply: Reply,
    delete_reply: Reply,
    next_id: usize,
}

/// A zone client that records calls and replays scripted replies
///
/// Clones share state, so a test can keep one handle while the provider
/// owns another.
#[derive(Clone, Default)]
pub struct FakeZoneClient {
    state: Arc<Mutex<FakeState>>,
}

impl FakeZoneClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an A record
    pub fn with_a_record(self, id: &str, name: &str, ip: &str) -> Self {
        self.with_raw_record(id, name, "A", serde_json::json!({ "ip": ip }))
    }

    /// Seed a CNAME record
    pub fn with_cname_record(self, id: &str, name: &str, cname: &str) -> Self {
        self.with_raw_record(id, name, "CNAME", serde_json::json!({ "cname": cname }))
    }

    /// Seed a record with an arbitrary payload
    pub fn with_raw_record(
        self,
        id: &str,
        name: &str,
        record_type: &str,
        rdata: serde_json::Value,
    ) -> Self {
        self.state.lock().unwrap().records.push(ResourceRecord {
            id: id.to_string(),
            name: name.to_string(),
            record_type: record_type.to_string(),
            rdata,
            ttl: 60,
            created_on: None,
            modified_on: None,
        });
        self
    }

    pub fn list_reply(self, reply: Reply) -> Self {
        self.state.lock().unwrap().list_reply = reply;
        self
    }

    pub fn create_reply(self, reply: Reply) -> Self {
        self.state.lock().unwrap().create_reply = reply;
        self
    }

    pub fn update_reply(self, reply: Reply) -> Self {
        self.state.lock().unwrap().update_reply = reply;
        self
    }

    pub fn delete_reply(self, reply: Reply) -> Self {
        self.state.lock().unwrap().delete_reply = reply;
        self
    }

    /// Every call received, in order
    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Calls that would modify the zone
    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::List | Call::Get { .. }))
            .collect()
    }

    pub fn create_count(&self) -> usize {
        self.count(|c| matches!(c, Call::Create { .. }))
    }

    pub fn update_count(&self) -> usize {
        self.count(|c| matches!(c, Call::Update { .. }))
    }

    pub fn delete_count(&self) -> usize {
        self.count(|c| matches!(c, Call::Delete { .. }))
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.state.lock().unwrap().calls.iter().filter(|c| pred(c)).count()
    }

    /// Wrap this fake in a provider serving [`ZONE_ID`]
    pub fn provider(&self) -> DnsSvcsProvider {
        let client: Arc<dyn ZoneClient> = Arc::new(self.clone());
        DnsSvcsProvider::with_registry(INSTANCE_ID, ZoneRegistry::from_clients([(ZONE_ID, client)]))
    }
}

#[async_trait::async_trait]
impl ZoneClient for FakeZoneClient {
    async fn list_records(
        &self,
        _instance_id: &str,
        _zone_id: &str,
    ) -> Result<Vec<ResourceRecord>, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::List);
        state.list_reply.check("ListResourceRecords")?;
        Ok(state.records.clone())
    }

    async fn get_record(
        &self,
        _instance_id: &str,
        _zone_id: &str,
        name: &str,
    ) -> Result<Option<ResourceRecord>, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Get {
            name: name.to_string(),
        });
        state.list_reply.check("GetResourceRecord")?;
        Ok(state.records.iter().find(|r| r.name == name).cloned())
    }

    async fn create_record(
        &self,
        _instance_id: &str,
        _zone_id: &str,
        name: &str,
        record_type: RecordType,
        rdata: &RecordData,
        ttl: i64,
    ) -> Result<String, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Create {
            name: name.to_string(),
            record_type,
            target: rdata.target().to_string(),
            ttl,
        });
        state.create_reply.check("CreateResourceRecord")?;

        state.next_id += 1;
        let id = format!("created-{}", state.next_id);
        state.records.push(ResourceRecord::new(&id, name, rdata, ttl));
        Ok(id)
    }

    async fn update_record(
        &self,
        _instance_id: &str,
        _zone_id: &str,
        record_id: &str,
        name: &str,
        rdata: &RecordData,
        ttl: i64,
    ) -> Result<ResourceRecord, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Update {
            id: record_id.to_string(),
            name: name.to_string(),
            target: rdata.target().to_string(),
            ttl,
        });
        state.update_reply.check("UpdateResourceRecord")?;
        Ok(ResourceRecord::new(record_id, name, rdata, ttl))
    }

    async fn delete_record(
        &self,
        _instance_id: &str,
        _zone_id: &str,
        record_id: &str,
    ) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Delete {
            id: record_id.to_string(),
        });
        state.delete_reply.check("DeleteResourceRecord")?;
        state.records.retain(|r| r.id != record_id);
        Ok(())
    }
}
