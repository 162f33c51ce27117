//! Group aggregation over extracted host records

use tracing::debug;

use crate::types::{GroupInventory, HostRecord, HostVars};

/// Fold host records into group membership
///
/// Every host is added to each group it declares; repeated records only add
/// a host once. Hosts without groups do not appear in the result, there is no
/// implicit "ungrouped" bucket.
pub fn aggregate<'a, I>(records: I) -> GroupInventory
where
    I: IntoIterator<Item = &'a HostRecord>,
{
    let mut inventory = GroupInventory::new();
    let mut ungrouped = 0usize;

    for record in records {
        if record.groups().is_empty() {
            ungrouped += 1;
            continue;
        }
        for group in record.groups() {
            inventory.add_host(group, record.name());
        }
    }

    debug!(
        groups = inventory.len(),
        ungrouped = ungrouped,
        "aggregated host groups"
    );

    inventory
}

/// Collect variables per host name
///
/// Records sharing a name are merged key by key; on conflicting keys the
/// later record wins. Hosts without variables still get an empty entry.
pub fn merge_host_vars<'a, I>(records: I) -> HostVars
where
    I: IntoIterator<Item = &'a HostRecord>,
{
    let mut vars = HostVars::new();
    for record in records {
        let entry = vars.entry(record.name().to_string()).or_default();
        for (key, value) in record.variables() {
            entry.insert(key.clone(), value.clone());
        }
    }
    vars
}
