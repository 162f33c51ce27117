//! Fetch, extract and aggregate in one call

use hostfold_core::{Inventory, extract_hosts};
use tracing::{info, instrument};

use crate::error::Result;
use crate::traits::StateSource;

/// Fetch the state document at `endpoint` and turn it into an inventory
///
/// Every call fetches afresh; nothing is cached between calls.
///
/// # Errors
/// Returns the source's error if fetching fails, or
/// [`ClientError::MalformedDocument`](crate::ClientError::MalformedDocument)
/// if the body is not JSON. No partial inventory is returned.
#[instrument(skip(source), fields(source_type = source.source_type()))]
pub async fn read_inventory(source: &dyn StateSource, endpoint: Option<&str>) -> Result<Inventory> {
    let body = source.fetch(endpoint).await?;
    let hosts = extract_hosts(&body)?;
    let inventory = Inventory::from_records(hosts);

    info!(
        hosts = inventory.hosts().len(),
        groups = inventory.groups().len(),
        "inventory built"
    );

    Ok(inventory)
}
