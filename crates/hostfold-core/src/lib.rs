//! hostfold-core: state document to inventory transformation
//!
//! Extracts `ansible_host` records from a loosely-typed infrastructure state
//! document and folds them into a group inventory.
//!
//! ```
//! use hostfold_core::{Inventory, extract_hosts};
//!
//! let body = br#"{"resources":[{"type":"ansible_host","instances":[
//!     {"attributes":{"name":"web1","groups":["webservers"],"variables":{"env":"prod"}}}
//! ]}]}"#;
//!
//! let hosts = extract_hosts(body)?;
//! let inventory = Inventory::from_records(hosts);
//! assert!(inventory.groups().contains("webservers", "web1"));
//! # Ok::<(), hostfold_core::InventoryError>(())
//! ```

pub mod aggregate;
pub mod error;
pub mod extract;
pub mod types;

pub use aggregate::{aggregate, merge_host_vars};
pub use error::{InventoryError, Result};
pub use extract::{HOST_RESOURCE_TYPE, extract_hosts, hosts_from_document};
pub use types::{GroupInventory, GroupMembership, HostRecord, HostVars, Inventory};
