//! Operations the orchestration platform can invoke and whether a driver
//! implements them.

use std::fmt;

use crate::autoload::AutoLoadDetails;
use crate::error::{DriverError, Result};

/// Every operation of the driver contract, by the name the platform uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Initialize,
    Restore,
    Save,
    LoadFirmware,
    RunCustomCommand,
    RunCustomConfigCommand,
    Shutdown,
    OrchestrationSave,
    OrchestrationRestore,
    ApplyConnectivityChanges,
    GetInventory,
    HealthCheck,
    ShowInterfaces,
    Cleanup,
}

impl Operation {
    pub const ALL: [Operation; 14] = [
        Operation::Initialize,
        Operation::Restore,
        Operation::Save,
        Operation::LoadFirmware,
        Operation::RunCustomCommand,
        Operation::RunCustomConfigCommand,
        Operation::Shutdown,
        Operation::OrchestrationSave,
        Operation::OrchestrationRestore,
        Operation::ApplyConnectivityChanges,
        Operation::GetInventory,
        Operation::HealthCheck,
        Operation::ShowInterfaces,
        Operation::Cleanup,
    ];

    /// Name the platform calls the operation by.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Initialize => "initialize",
            Operation::Restore => "restore",
            Operation::Save => "save",
            Operation::LoadFirmware => "load_firmware",
            Operation::RunCustomCommand => "run_custom_command",
            Operation::RunCustomConfigCommand => "run_custom_config_command",
            Operation::Shutdown => "shutdown",
            Operation::OrchestrationSave => "orchestration_save",
            Operation::OrchestrationRestore => "orchestration_restore",
            Operation::ApplyConnectivityChanges => "ApplyConnectivityChanges",
            Operation::GetInventory => "get_inventory",
            Operation::HealthCheck => "health_check",
            Operation::ShowInterfaces => "show_interfaces",
            Operation::Cleanup => "cleanup",
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == name)
            .ok_or_else(|| {
                DriverError::UnknownOperation {
                    name: name.to_string(),
                }
                .into()
            })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Supported,
    NotSupported,
}

/// Static operation → capability table.
#[derive(Debug, Clone, Copy)]
pub struct CapabilityTable {
    entries: &'static [(Operation, Capability)],
}

impl CapabilityTable {
    pub const fn new(entries: &'static [(Operation, Capability)]) -> Self {
        Self { entries }
    }

    /// Capability of `operation`; operations missing from the table are not supported.
    pub fn get(&self, operation: Operation) -> Capability {
        self.entries
            .iter()
            .find(|(op, _)| *op == operation)
            .map(|(_, capability)| *capability)
            .unwrap_or(Capability::NotSupported)
    }

    pub fn supported(&self) -> impl Iterator<Item = Operation> + '_ {
        self.entries
            .iter()
            .filter(|(_, capability)| *capability == Capability::Supported)
            .map(|(op, _)| *op)
    }
}

/// What an executed operation produced.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// Ran, nothing to return.
    Completed,
    /// Autoload result.
    Inventory(AutoLoadDetails),
    /// Command output.
    Text(String),
    /// The driver does not implement this operation.
    NotSupported(Operation),
}
