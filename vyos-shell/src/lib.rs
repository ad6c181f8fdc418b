//! # vyos-shell
//!
//! Shell driver for VyOS routers managed by an orchestration platform.
//!
//! ## Features
//!
//! - Inventory autoload from `IF-MIB::ifXTable` over SNMP v2c (snmp2)
//! - Async SSH CLI sessions via russh with VyOS prompt and failure detection
//! - Operation dispatch by name against a per-driver capability table
//! - Flat autoload result (resources + attributes) serializable to JSON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vyos_shell::shell::{PlaintextCredentials, ResourceCommandContext, ResourceDriver};
//! use vyos_shell::{CommandOutcome, VyosDriver};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), vyos_shell::Error> {
//!     let driver = VyosDriver::new(PlaintextCredentials)?;
//!     let context = ResourceCommandContext::new("edge-1", "192.0.2.10")
//!         .with_attribute("SNMP Read Community", "public")
//!         .with_attribute("User", "vyos")
//!         .with_attribute("Password", "vyos");
//!
//!     if let CommandOutcome::Text(output) = driver.execute("show_interfaces", &context).await? {
//!         println!("{output}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod autoload;
pub mod cli;
pub mod error;
pub mod shell;
pub mod snmp;
pub mod transport;

#[cfg(test)]
mod testing;

// Re-export main types for convenience
pub use autoload::{AutoLoadDetails, ResourceTree};
pub use error::{Error, Result};
pub use shell::{CommandOutcome, Operation, ResourceCommandContext, ResourceDriver, VyosDriver};
pub use transport::{AuthMethod, SshConfig};
