//! hostfold-client: state endpoint client
//!
//! Fetches an infrastructure state document over HTTP and builds a
//! [`hostfold_core::Inventory`] from it.
//!
//! # Example
//!
//! ```no_run
//! use hostfold_client::{ConnectionConfig, Credentials, StateFetcher, read_inventory};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConnectionConfig::new("https://controller.example.com")?
//!     .with_credentials(Credentials::from_parts(
//!         Some("admin".to_string()),
//!         Some("secret".to_string()),
//!     ));
//! let fetcher = StateFetcher::new(config)?;
//!
//! let inventory = read_inventory(&fetcher, Some("/api/v2/state")).await?;
//! for (group, members) in inventory.groups().iter() {
//!     println!("{group}: {}", members.hosts().collect::<Vec<_>>().join(", "));
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod inventory;
pub mod traits;

pub use config::{ConnectionConfig, Credentials};
pub use error::{ClientError, Result};
pub use http::StateFetcher;
pub use inventory::read_inventory;
pub use traits::StateSource;
