//! Host record extraction from state documents
//!
//! The state document is walked as an untyped [`Value`]. Anything that does
//! not have the expected shape is skipped rather than reported, so a single
//! drifted entry never hides the rest of the document.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::{debug, instrument, trace};

use crate::error::Result;
use crate::types::HostRecord;

/// Resource `type` marking host entries
pub const HOST_RESOURCE_TYPE: &str = "ansible_host";

/// Parse `body` and extract every host record in document order
///
/// # Errors
/// Returns [`InventoryError::MalformedDocument`](crate::InventoryError::MalformedDocument)
/// if `body` is not valid JSON. Structural mismatches inside valid JSON are
/// skipped, never reported.
#[instrument(skip(body), fields(bytes = body.len()))]
pub fn extract_hosts(body: &[u8]) -> Result<Vec<HostRecord>> {
    let document: Value = serde_json::from_slice(body)?;
    let hosts = hosts_from_document(&document);
    debug!(hosts = hosts.len(), "extracted host records");
    Ok(hosts)
}

/// Extract host records from an already parsed document
#[must_use]
pub fn hosts_from_document(document: &Value) -> Vec<HostRecord> {
    let Some(resources) = document.get("resources").and_then(Value::as_array) else {
        debug!("state document has no resources array");
        return Vec::new();
    };

    let mut hosts = Vec::new();
    for (index, resource) in resources.iter().enumerate() {
        let Some(resource) = resource.as_object() else {
            trace!(index, "skipping non-object resource");
            continue;
        };
        if resource.get("type").and_then(Value::as_str) != Some(HOST_RESOURCE_TYPE) {
            continue;
        }
        let Some(instances) = resource.get("instances").and_then(Value::as_array) else {
            debug!(index, "host resource has no instances array");
            continue;
        };
        hosts.extend(instances.iter().filter_map(host_from_instance));
    }
    hosts
}

fn host_from_instance(instance: &Value) -> Option<HostRecord> {
    let Some(attributes) = instance.get("attributes").and_then(Value::as_object) else {
        trace!("skipping instance without attributes object");
        return None;
    };

    let name = attributes.get("name").and_then(Value::as_str).unwrap_or("");
    if name.is_empty() {
        debug!("skipping host instance without a name");
        return None;
    }

    HostRecord::new(
        name,
        string_list(attributes, "groups"),
        string_map(attributes, "variables"),
    )
}

/// Strings of an optional array field; other elements are dropped
fn string_list(attributes: &Map<String, Value>, field: &str) -> Vec<String> {
    let Some(items) = attributes.get(field).and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item.as_str() {
            Some(s) if !s.is_empty() => Some(s.to_string()),
            _ => {
                trace!(field, value = %item, "skipping non-string list element");
                None
            }
        })
        .collect()
}

/// String entries of an optional object field; other values are dropped
fn string_map(attributes: &Map<String, Value>, field: &str) -> BTreeMap<String, String> {
    let Some(entries) = attributes.get(field).and_then(Value::as_object) else {
        return BTreeMap::new();
    };
    entries
        .iter()
        .filter_map(|(key, value)| match value.as_str() {
            Some(s) => Some((key.clone(), s.to_string())),
            None => {
                trace!(field, key = %key, "skipping non-string value");
                None
            }
        })
        .collect()
}
