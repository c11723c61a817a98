//! Record and zone types
//!
//! [`DesiredRecord`] and [`Zone`] come from the caller. [`ResourceRecord`] is
//! the loosely typed shape a zone client returns; [`RemoteRecord`] is the same
//! record after its payload has been parsed into a [`RecordData`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// DNS record type supported by the reconciler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// A record (IPv4 address)
    A,
    /// CNAME record (canonical name)
    Cname,
}

impl RecordType {
    /// Wire name of the type
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Cname => "CNAME",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("A") {
            Ok(RecordType::A)
        } else if s.eq_ignore_ascii_case("CNAME") {
            Ok(RecordType::Cname)
        } else {
            Err(format!("unsupported record type: {s:?}"))
        }
    }
}

/// The record state an operator asked for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredRecord {
    /// Record name; may carry a trailing "." (wildcard/FQDN form)
    pub dns_name: String,

    /// Record type as supplied by the controller ("A", "CNAME")
    pub record_type: String,

    /// Values the record should point to, each reconciled independently
    pub targets: Vec<String>,

    /// Requested TTL in seconds
    #[serde(default = "default_ttl")]
    pub ttl: i64,
}

fn default_ttl() -> i64 {
    crate::normalize::DEFAULT_TTL
}

impl DesiredRecord {
    /// Create a desired record with the default TTL
    pub fn new(
        dns_name: impl Into<String>,
        record_type: impl Into<String>,
        targets: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            dns_name: dns_name.into(),
            record_type: record_type.into(),
            targets: targets.into_iter().map(Into::into).collect(),
            ttl: default_ttl(),
        }
    }

    /// Set the requested TTL
    pub fn with_ttl(mut self, ttl: i64) -> Self {
        self.ttl = ttl;
        self
    }
}

/// A remote DNS zone, identified by an opaque id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
}

impl Zone {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// A record exactly as the remote service lists it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// Opaque id assigned by the remote service
    pub id: String,

    pub name: String,

    #[serde(rename = "type")]
    pub record_type: String,

    /// Type-specific payload, e.g. `{"ip": "1.2.3.4"}` or `{"cname": "host"}`
    pub rdata: serde_json::Value,

    pub ttl: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<DateTime<Utc>>,
}

impl ResourceRecord {
    /// Build a resource record from a parsed payload
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        data: &RecordData,
        ttl: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            record_type: data.record_type().as_str().to_string(),
            rdata: data.to_rdata(),
            ttl,
            created_on: None,
            modified_on: None,
        }
    }
}

#[derive(Deserialize)]
struct ARdata {
    ip: String,
}

#[derive(Deserialize)]
struct CnameRdata {
    cname: String,
}

/// Type-specific record payload
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordData {
    A { ip: String },
    Cname { cname: String },
}

impl RecordData {
    /// Payload of the given type pointing at `target`
    pub fn new(record_type: RecordType, target: impl Into<String>) -> Self {
        match record_type {
            RecordType::A => RecordData::A { ip: target.into() },
            RecordType::Cname => RecordData::Cname {
                cname: target.into(),
            },
        }
    }

    /// Parse a loosely typed payload, tagged by its record type string
    ///
    /// The payload must be a JSON object carrying the type's field.
    pub fn from_rdata(
        record_type: &str,
        rdata: &serde_json::Value,
    ) -> std::result::Result<Self, String> {
        let record_type: RecordType = record_type.parse()?;
        // derived struct deserializers also accept sequences
        if !rdata.is_object() {
            return Err(format!("{record_type} record - resource data is not an object: {rdata}"));
        }

        match record_type {
            RecordType::A => serde_json::from_value::<ARdata>(rdata.clone())
                .map(|data| RecordData::A { ip: data.ip })
                .map_err(|e| format!("A record - failed to get resource data {rdata}: {e}")),
            RecordType::Cname => serde_json::from_value::<CnameRdata>(rdata.clone())
                .map(|data| RecordData::Cname { cname: data.cname })
                .map_err(|e| format!("CNAME record - failed to get resource data {rdata}: {e}")),
        }
    }

    /// Payload in the remote service's JSON shape
    pub fn to_rdata(&self) -> serde_json::Value {
        match self {
            RecordData::A { ip } => serde_json::json!({ "ip": ip }),
            RecordData::Cname { cname } => serde_json::json!({ "cname": cname }),
        }
    }

    pub fn record_type(&self) -> RecordType {
        match self {
            RecordData::A { .. } => RecordType::A,
            RecordData::Cname { .. } => RecordType::Cname,
        }
    }

    /// The value compared against desired targets
    pub fn target(&self) -> &str {
        match self {
            RecordData::A { ip } => ip,
            RecordData::Cname { cname } => cname,
        }
    }
}

/// A remote record with a parsed payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRecord {
    pub id: String,
    pub name: String,
    pub data: RecordData,
    pub ttl: i64,
}

impl RemoteRecord {
    pub fn record_type(&self) -> RecordType {
        self.data.record_type()
    }

    pub fn target(&self) -> &str {
        self.data.target()
    }

    /// Exact match on normalized name and target
    pub fn matches(&self, dns_name: &str, target: &str) -> bool {
        self.name == dns_name && self.target() == target
    }
}

impl TryFrom<ResourceRecord> for RemoteRecord {
    type Error = Error;

    fn try_from(record: ResourceRecord) -> Result<Self> {
        let data = RecordData::from_rdata(&record.record_type, &record.rdata)
            .map_err(|reason| Error::malformed(&record.id, reason))?;

        Ok(Self {
            id: record.id,
            name: record.name,
            data,
            ttl: record.ttl,
        })
    }
}
