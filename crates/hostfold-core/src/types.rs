//! Inventory type definitions

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::aggregate::{aggregate, merge_host_vars};

/// Per-host variables, keyed by host name
pub type HostVars = BTreeMap<String, BTreeMap<String, String>>;

// ============================================================================
// Host Records
// ============================================================================

/// A single host extracted from the state document
///
/// Fields are private so a record can only be built through [`HostRecord::new`],
/// which rejects empty names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostRecord {
    name: String,
    groups: Vec<String>,
    variables: BTreeMap<String, String>,
}

impl HostRecord {
    /// Build a host record
    ///
    /// Returns `None` when `name` is empty.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        groups: Vec<String>,
        variables: BTreeMap<String, String>,
    ) -> Option<Self> {
        let name = name.into();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name,
            groups,
            variables,
        })
    }

    /// Host name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Groups in document order
    #[must_use]
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Host variables
    #[must_use]
    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }
}

// ============================================================================
// Groups
// ============================================================================

/// Members of one group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupMembership {
    hosts: BTreeSet<String>,
}

impl GroupMembership {
    /// Add a host, returning `false` if it was already a member
    pub fn insert(&mut self, host: impl Into<String>) -> bool {
        self.hosts.insert(host.into())
    }

    /// Check membership
    #[must_use]
    pub fn contains(&self, host: &str) -> bool {
        self.hosts.contains(host)
    }

    /// Member host names in sorted order
    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.hosts.iter().map(String::as_str)
    }

    /// Number of members
    #[must_use]
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    /// Check if the group has no members
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

/// Group name to membership mapping
///
/// Serializes as `{"<group>": {"hosts": [...]}}`, the dynamic inventory shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GroupInventory {
    groups: BTreeMap<String, GroupMembership>,
}

impl GroupInventory {
    /// Create an empty inventory
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `host` to `group`, creating the group on first use
    ///
    /// Returns `false` if the host was already a member.
    pub fn add_host(&mut self, group: &str, host: &str) -> bool {
        self.groups
            .entry(group.to_string())
            .or_default()
            .insert(host)
    }

    /// Look up a group
    #[must_use]
    pub fn get(&self, group: &str) -> Option<&GroupMembership> {
        self.groups.get(group)
    }

    /// Check whether `host` is a member of `group`
    #[must_use]
    pub fn contains(&self, group: &str, host: &str) -> bool {
        self.get(group).is_some_and(|m| m.contains(host))
    }

    /// Iterate groups in sorted order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GroupMembership)> {
        self.groups.iter().map(|(name, m)| (name.as_str(), m))
    }

    /// Number of groups
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if there are no groups
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Union `other` into `self`
    pub fn merge(&mut self, other: &GroupInventory) {
        for (group, membership) in other.iter() {
            for host in membership.hosts() {
                self.add_host(group, host);
            }
        }
    }
}

// ============================================================================
// Full Inventory
// ============================================================================

/// Extracted hosts together with their aggregated groups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Inventory {
    /// Host records in document order, duplicates included
    hosts: Vec<HostRecord>,
    /// Group membership
    groups: GroupInventory,
}

impl Inventory {
    /// Aggregate `records` into an inventory
    #[must_use]
    pub fn from_records(records: Vec<HostRecord>) -> Self {
        let groups = aggregate(&records);
        Self {
            hosts: records,
            groups,
        }
    }

    /// Host records in document order
    #[must_use]
    pub fn hosts(&self) -> &[HostRecord] {
        &self.hosts
    }

    /// Group membership
    #[must_use]
    pub fn groups(&self) -> &GroupInventory {
        &self.groups
    }

    /// Distinct host names in sorted order
    #[must_use]
    pub fn host_names(&self) -> BTreeSet<&str> {
        self.hosts.iter().map(HostRecord::name).collect()
    }

    /// Variables for every host, merged across duplicate records
    #[must_use]
    pub fn host_vars(&self) -> HostVars {
        merge_host_vars(&self.hosts)
    }

    /// Merged variables for a single host, `None` if the host is unknown
    #[must_use]
    pub fn vars_for(&self, host: &str) -> Option<BTreeMap<String, String>> {
        merge_host_vars(self.hosts.iter().filter(|r| r.name() == host)).remove(host)
    }
}
