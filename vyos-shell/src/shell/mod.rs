//! Resource driver contract and the VyOS driver.
//!
//! The orchestration platform invokes operations by name. [`ResourceDriver::execute`]
//! resolves the name, checks the driver's capability table and dispatches to
//! the matching method. Operations a driver does not implement come back as
//! [`CommandOutcome::NotSupported`] rather than as an error.

mod capability;
mod config;
mod context;
mod credentials;
mod vyos;

pub use capability::{Capability, CapabilityTable, CommandOutcome, Operation};
pub use config::ShellConfig;
pub use context::{
    DEFAULT_SHELL_MODEL, PASSWORD, ReservationDetails, ResourceCommandContext, ResourceDetails,
    SNMP_READ_COMMUNITY, USER,
};
pub use credentials::{CredentialStore, PlaintextCredentials};
pub use vyos::{SHOW_INTERFACES, VYOS_CAPABILITIES, VyosDriver};

use std::future::Future;

use log::info;

use crate::autoload::AutoLoadDetails;
use crate::error::Result;

/// A shell driver for one kind of resource.
pub trait ResourceDriver: Send + Sync {
    /// Whether the driver implements `operation`.
    fn capability(&self, operation: Operation) -> Capability;

    fn initialize(&self, context: &ResourceCommandContext) -> impl Future<Output = Result<()>> + Send;

    /// Discover the resource's structure.
    fn get_inventory(
        &self,
        context: &ResourceCommandContext,
    ) -> impl Future<Output = Result<AutoLoadDetails>> + Send;

    /// Output of `show interfaces` on the resource.
    fn show_interfaces(&self, context: &ResourceCommandContext) -> impl Future<Output = Result<String>> + Send;

    fn cleanup(&self) -> impl Future<Output = Result<()>> + Send;

    /// Run the operation the platform called `name`.
    fn execute(
        &self,
        name: &str,
        context: &ResourceCommandContext,
    ) -> impl Future<Output = Result<CommandOutcome>> + Send {
        async move {
            let operation = Operation::from_name(name)?;
            if self.capability(operation) == Capability::NotSupported {
                info!("{} is not supported for {}", operation, context.describe());
                return Ok(CommandOutcome::NotSupported(operation));
            }

            match operation {
                Operation::Initialize => {
                    self.initialize(context).await?;
                    Ok(CommandOutcome::Completed)
                }
                Operation::GetInventory => Ok(CommandOutcome::Inventory(self.get_inventory(context).await?)),
                Operation::ShowInterfaces => Ok(CommandOutcome::Text(self.show_interfaces(context).await?)),
                Operation::Cleanup => {
                    self.cleanup().await?;
                    Ok(CommandOutcome::Completed)
                }
                other => Ok(CommandOutcome::NotSupported(other)),
            }
        }
    }
}
