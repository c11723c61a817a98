//! Record matching
//!
//! Pure decision logic: given a [`NormalizedRecord`] and the records a zone
//! currently holds, decide what to create, update or delete. Nothing here
//! talks to the remote service; the provider applies the resulting actions.
//!
//! Matching is exact string equality on (normalized name, target). Every
//! desired target is matched independently against the full remote list,
//! which stays small because it is scoped to one zone.

use std::fmt;

use tracing::debug;

use crate::error::Result;
use crate::normalize::NormalizedRecord;
use crate::types::{RecordData, RemoteRecord, ResourceRecord};

/// A single intended change against the remote zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileAction {
    /// No remote record matches the target
    Create {
        name: String,
        data: RecordData,
        ttl: i64,
    },
    /// A remote record matches the target; rewrite it with the desired payload and TTL
    Update {
        id: String,
        name: String,
        data: RecordData,
        ttl: i64,
    },
    /// A remote record matches a target being removed
    Delete { id: String },
    /// Nothing to do for a target
    NoOp,
}

impl ReconcileAction {
    /// Whether applying the action issues a remote write
    pub fn is_mutation(&self) -> bool {
        !matches!(self, ReconcileAction::NoOp)
    }
}

impl fmt::Display for ReconcileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcileAction::Create { name, data, ttl } => write!(
                f,
                "create {name} {} {} (ttl {ttl})",
                data.record_type(),
                data.target()
            ),
            ReconcileAction::Update {
                id,
                name,
                data,
                ttl,
            } => write!(
                f,
                "update {id}: {name} {} {} (ttl {ttl})",
                data.record_type(),
                data.target()
            ),
            ReconcileAction::Delete { id } => write!(f, "delete {id}"),
            ReconcileAction::NoOp => f.write_str("no-op"),
        }
    }
}

/// Parse every listed record, failing on the first malformed payload
///
/// A record that cannot be parsed could be a duplicate of a desired target,
/// so it aborts the call instead of being skipped.
pub fn parse_remote_records(records: Vec<ResourceRecord>) -> Result<Vec<RemoteRecord>> {
    records.into_iter().map(RemoteRecord::try_from).collect()
}

/// Plan create-or-update actions for every desired target
///
/// Each remote record matching a target gets an update carrying its id; a
/// target with no match gets exactly one create.
pub fn plan_ensure(desired: &NormalizedRecord, remote: &[RemoteRecord]) -> Vec<ReconcileAction> {
    let mut actions = Vec::with_capacity(desired.targets.len());

    for target in &desired.targets {
        let before = actions.len();

        for record in remote.iter().filter(|r| r.matches(&desired.dns_name, target)) {
            actions.push(ReconcileAction::Update {
                id: record.id.clone(),
                name: desired.dns_name.clone(),
                data: RecordData::new(desired.record_type, target.clone()),
                ttl: desired.ttl,
            });
        }

        if actions.len() == before {
            actions.push(ReconcileAction::Create {
                name: desired.dns_name.clone(),
                data: RecordData::new(desired.record_type, target.clone()),
                ttl: desired.ttl,
            });
        }
    }

    debug!(name = %desired.dns_name, actions = actions.len(), "planned ensure");
    actions
}

/// Plan deletions for every remote record matching a desired target
///
/// Duplicates sharing (name, target) are all deleted. A target without any
/// match yields [`ReconcileAction::NoOp`].
pub fn plan_delete(desired: &NormalizedRecord, remote: &[RemoteRecord]) -> Vec<ReconcileAction> {
    let mut actions = Vec::with_capacity(desired.targets.len());

    for target in &desired.targets {
        let before = actions.len();

        actions.extend(
            remote
                .iter()
                .filter(|r| r.matches(&desired.dns_name, target))
                .map(|r| ReconcileAction::Delete { id: r.id.clone() }),
        );

        if actions.len() == before {
            actions.push(ReconcileAction::NoOp);
        }
    }

    debug!(name = %desired.dns_name, actions = actions.len(), "planned delete");
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DesiredRecord, RecordType, Zone};

    fn normalized(name: &str, targets: &[&str]) -> NormalizedRecord {
        let record = DesiredRecord::new(name, "A", targets.iter().copied()).with_ttl(300);
        NormalizedRecord::new(&record, &Zone::new("zone-1")).unwrap()
    }

    fn a_record(id: &str, name: &str, ip: &str) -> RemoteRecord {
        RemoteRecord {
            id: id.to_string(),
            name: name.to_string(),
            data: RecordData::A { ip: ip.to_string() },
            ttl: 60,
        }
    }

    #[test]
    fn test_plan_ensure_creates_on_empty_zone() {
        let actions = plan_ensure(&normalized("testCreate", &["11.22.33.44"]), &[]);
        assert_eq!(
            actions,
            [ReconcileAction::Create {
                name: "testCreate".to_string(),
                data: RecordData::new(RecordType::A, "11.22.33.44"),
                ttl: 300,
            }]
        );
    }

    #[test]
    fn test_plan_ensure_updates_matching_record() {
        let remote = [a_record("rr-1", "testUpdate", "11.22.33.44")];
        let actions = plan_ensure(&normalized("testUpdate.", &["11.22.33.44"]), &remote);
        assert_eq!(
            actions,
            [ReconcileAction::Update {
                id: "rr-1".to_string(),
                name: "testUpdate".to_string(),
                data: RecordData::new(RecordType::A, "11.22.33.44"),
                ttl: 300,
            }]
        );
    }

    #[test]
    fn test_plan_ensure_targets_are_independent() {
        let remote = [
            a_record("rr-1", "multi", "10.0.0.1"),
            a_record("rr-2", "other", "10.0.0.2"),
        ];
        let actions = plan_ensure(&normalized("multi", &["10.0.0.1", "10.0.0.2"]), &remote);

        assert_eq!(actions.len(), 2);
        assert!(matches!(&actions[0], ReconcileAction::Update { id, .. } if id == "rr-1"));
        assert!(matches!(
            &actions[1],
            ReconcileAction::Create { data, .. } if data.target() == "10.0.0.2"
        ));
    }

    #[test]
    fn test_plan_ensure_matching_is_exact() {
        let remote = [a_record("rr-1", "Host", "10.0.0.1")];
        let actions = plan_ensure(&normalized("host", &["10.0.0.1"]), &remote);
        assert!(matches!(actions.as_slice(), [ReconcileAction::Create { .. }]));
    }

    #[test]
    fn test_plan_delete_removes_all_duplicates() {
        let remote = [
            a_record("rr-1", "dup", "10.0.0.1"),
            a_record("rr-2", "dup", "10.0.0.1"),
            a_record("rr-3", "dup", "10.0.0.9"),
        ];
        let actions = plan_delete(&normalized("dup", &["10.0.0.1"]), &remote);
        assert_eq!(
            actions,
            [
                ReconcileAction::Delete { id: "rr-1".to_string() },
                ReconcileAction::Delete { id: "rr-2".to_string() },
            ]
        );
    }

    #[test]
    fn test_plan_delete_without_match_is_noop() {
        let remote = [a_record("rr-1", "dup", "10.0.0.1")];
        let actions = plan_delete(&normalized("dup", &["10.0.0.2"]), &remote);
        assert_eq!(actions, [ReconcileAction::NoOp]);
        assert!(!actions[0].is_mutation());
    }

    #[test]
    fn test_action_display() {
        let action = ReconcileAction::Create {
            name: "www".to_string(),
            data: RecordData::new(RecordType::Cname, "lb.example.com"),
            ttl: 60,
        };
        assert!(action.is_mutation());
        assert_eq!(action.to_string(), "create www CNAME lb.example.com (ttl 60)");
        assert_eq!(
            ReconcileAction::Delete {
                id: "rr-1".to_string()
            }
            .to_string(),
            "delete rr-1"
        );
    }
}
