//! Data shapes published by a distributed configuration service.
//!
//! Machines that drive high-availability roles usually carry a snapshot of
//! the cluster's leader, members and pending switchover in their context,
//! and derive guards and recovery decisions from it. Only the shapes live
//! here; reading and writing them is the embedder's concern.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Snapshot of one replicated component as seen through the DCS.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub cluster_comp_name: String,
    pub replicas: i32,
    pub ha_config: Option<HaConfig>,
    pub leader: Option<Leader>,
    pub op_time: i64,
    pub members: Vec<Member>,
    pub switchover: Option<Switchover>,
    #[serde(default)]
    pub extra: HashMap<String, String>,
}

impl Cluster {
    pub fn has_member(&self, name: &str) -> bool {
        self.members.iter().any(|m| m.name == name)
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }

    pub fn member_names(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.name.as_str()).collect()
    }

    /// The leader lock is held when a leader with a non-empty name exists.
    pub fn is_locked(&self) -> bool {
        self.leader.as_ref().is_some_and(|l| !l.name.is_empty())
    }

    /// Whether `name` currently holds the leader lock.
    pub fn is_leader(&self, name: &str) -> bool {
        self.is_locked() && self.leader.as_ref().is_some_and(|l| l.name == name)
    }
}

/// HA tuning shared by all members.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HaConfig {
    /// Leader lease length in seconds
    pub ttl: i64,
    /// Largest replication lag a switchover candidate may have
    pub max_lag_on_switchover: i64,
}

/// Holder of the leader lease. Times are unix seconds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leader {
    pub name: String,
    pub acquire_time: i64,
    pub renew_time: i64,
    pub ttl: i64,
}

impl Leader {
    /// End of the current lease, or `None` when the timestamp is out of range.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.renew_time.saturating_add(self.ttl), 0)
            .single()
    }

    /// A lease with an unrepresentable expiry counts as expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().map_or(true, |at| at <= now)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub role: String,
    pub pod_ip: String,
    pub db_port: String,
    pub sql_channel_port: String,
}

/// Requested leadership handover.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Switchover {
    pub leader: String,
    /// Empty when any healthy member may take over
    pub candidate: String,
    pub scheduled_at: i64,
}

impl Switchover {
    pub fn has_candidate(&self) -> bool {
        !self.candidate.is_empty()
    }
}
