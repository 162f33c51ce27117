//! Dynamic inventory output

use std::fmt::Write;

use hostfold_core::Inventory;
use serde_json::{Map, Value, json};
use tracing::warn;

/// Reserved top-level key holding per-host variables
const META_KEY: &str = "_meta";

/// Full inventory: one entry per group plus `_meta.hostvars`
#[must_use]
pub fn render_list(inventory: &Inventory) -> Value {
    let mut root = Map::new();
    for (group, members) in inventory.groups().iter() {
        if group == META_KEY {
            warn!(group, "group name collides with the reserved meta key, skipping");
            continue;
        }
        root.insert(
            group.to_string(),
            json!({ "hosts": members.hosts().collect::<Vec<_>>() }),
        );
    }
    root.insert(
        META_KEY.to_string(),
        json!({ "hostvars": inventory.host_vars() }),
    );
    Value::Object(root)
}

/// Variables of one host, `{}` if the host is unknown
#[must_use]
pub fn render_host(inventory: &Inventory, name: &str) -> Value {
    json!(inventory.vars_for(name).unwrap_or_default())
}

/// One `group: host, host` line per group
#[must_use]
pub fn render_groups(inventory: &Inventory) -> String {
    let mut out = String::new();
    for (group, members) in inventory.groups().iter() {
        let hosts: Vec<&str> = members.hosts().collect();
        let _ = writeln!(out, "{group}: {}", hosts.join(", "));
    }
    out
}

/// Serialize for stdout
///
/// # Errors
/// Returns error if serialization fails
pub fn to_output(value: &Value, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
