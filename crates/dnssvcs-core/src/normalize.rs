// # Input Normalizer
//
// Validates a desired record against its zone and turns it into the
// canonical form the matcher compares against remote records.
//
// - Names lose a single trailing "." (wildcard records are often written
//   as FQDNs, the remote service stores them without the dot)
// - TTLs snap to the discrete set the remote service accepts
// - Validation reports every problem at once, before any remote call

use tracing::warn;

use crate::error::{Error, Result, ValidationErrors};
use crate::types::{DesiredRecord, RecordType, Zone};

/// TTL values accepted by the remote service
pub const ALLOWED_TTLS: [i64; 11] = [1, 60, 120, 300, 600, 900, 1800, 3600, 7200, 18000, 43200];

/// TTL used when the requested one is not in [`ALLOWED_TTLS`]
pub const DEFAULT_TTL: i64 = 120;

/// Strip a single trailing "." from a record name
pub fn normalize_dns_name(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// Return `ttl` if the remote service accepts it, otherwise [`DEFAULT_TTL`]
pub fn normalize_ttl(ttl: i64) -> i64 {
    if ALLOWED_TTLS.contains(&ttl) {
        return ttl;
    }

    warn!(
        requested_ttl = ttl,
        default_ttl = DEFAULT_TTL,
        "TTL must be one of {:?}, using the default",
        ALLOWED_TTLS
    );
    DEFAULT_TTL
}

/// Check a desired record and its zone, collecting every problem found
pub fn validate_input(record: &DesiredRecord, zone: &Zone) -> Result<()> {
    let mut errors = ValidationErrors::default();

    if record.dns_name.is_empty() {
        errors.push("dns record name is empty");
    }

    if record.record_type.is_empty() {
        errors.push("dns record type is empty");
    } else if let Err(e) = record.record_type.parse::<RecordType>() {
        errors.push(e);
    }

    if record.targets.is_empty() {
        errors.push("dns record content is empty");
    } else if record.targets.iter().any(String::is_empty) {
        errors.push("dns record contains an empty target");
    }

    if zone.id.is_empty() {
        errors.push("dns zone id is empty");
    }

    errors.into_result()
}

/// A validated desired record in comparison form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    /// Name without the trailing "."
    pub dns_name: String,
    pub record_type: RecordType,
    /// Targets in request order, duplicates removed
    pub targets: Vec<String>,
    /// TTL from [`ALLOWED_TTLS`]; left as requested by [`NormalizedRecord::for_delete`]
    pub ttl: i64,
}

impl NormalizedRecord {
    /// Validate and normalize a desired record that will be written
    pub fn new(record: &DesiredRecord, zone: &Zone) -> Result<Self> {
        let mut normalized = Self::for_delete(record, zone)?;
        normalized.ttl = normalize_ttl(record.ttl);
        Ok(normalized)
    }

    /// Validate and normalize a desired record that will be removed
    ///
    /// Deletes never send a TTL, so it is not checked against [`ALLOWED_TTLS`].
    pub fn for_delete(record: &DesiredRecord, zone: &Zone) -> Result<Self> {
        validate_input(record, zone)?;

        let record_type = record.record_type.parse::<RecordType>().map_err(|e| {
            let mut errors = ValidationErrors::default();
            errors.push(e);
            Error::InvalidInput(errors)
        })?;

        let mut targets: Vec<String> = Vec::with_capacity(record.targets.len());
        for target in &record.targets {
            if !targets.contains(target) {
                targets.push(target.clone());
            }
        }

        Ok(Self {
            dns_name: normalize_dns_name(&record.dns_name).to_string(),
            record_type,
            targets,
            ttl: record.ttl,
        })
    }
}
