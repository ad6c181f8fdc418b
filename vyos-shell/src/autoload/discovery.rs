//! Inventory discovery over SNMP.

use log::{debug, error, info};
use secrecy::SecretString;

use super::model::{Chassis, Device, Port, ResourceTree};
use crate::error::Result;
use crate::snmp::mib::{IF_ALIAS, IF_NAME};
use crate::snmp::{MibObject, SnmpConnector, SnmpParameters, SnmpService, SnmpTable};

/// Name of the single chassis every device gets.
pub const CHASSIS_NAME: &str = "Chassis 1";

/// Builds the device/chassis/port tree from `IF-MIB::ifXTable`.
///
/// # Example
///
/// ```rust,no_run
/// use secrecy::SecretString;
/// use vyos_shell::autoload::InventoryBuilder;
/// use vyos_shell::snmp::SnmpClient;
///
/// # async fn example() -> Result<(), vyos_shell::Error> {
/// let client = SnmpClient;
/// let tree = InventoryBuilder::new(&client)
///     .discover("192.0.2.10", SecretString::from("public".to_string()))
///     .await?;
/// println!("{} ports", tree.port_count());
/// # Ok(())
/// # }
/// ```
pub struct InventoryBuilder<'a, C> {
    connector: &'a C,
    snmp_port: u16,
    vendor: String,
    model: String,
}

impl<'a, C: SnmpConnector> InventoryBuilder<'a, C> {
    pub fn new(connector: &'a C) -> Self {
        Self {
            connector,
            snmp_port: 161,
            vendor: "VyOS".to_string(),
            model: crate::shell::DEFAULT_SHELL_MODEL.to_string(),
        }
    }

    pub fn snmp_port(mut self, port: u16) -> Self {
        self.snmp_port = port;
        self
    }

    pub fn vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = vendor.into();
        self
    }

    /// Shell model recorded on the device node.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Query the device and build its resource tree.
    ///
    /// The SNMP session is closed whether or not the table fetch succeeds.
    /// Any failure is logged and returned; no partial tree is produced.
    pub async fn discover(&self, address: &str, community: SecretString) -> Result<ResourceTree> {
        let params = SnmpParameters::v2c(address, community).with_port(self.snmp_port);

        let mut session = self.connector.open(&params).await.inspect_err(|e| {
            error!("Discovery of {} failed opening SNMP session: {}", params.target(), e);
        })?;

        let fetched = session.get_table(&MibObject::if_x_table()).await;
        session.close().await;

        let table = fetched.inspect_err(|e| {
            error!("Discovery of {} failed reading ifXTable: {}", params.target(), e);
        })?;
        debug!("ifXTable from {} has {} rows", address, table.len());

        let tree = self.build_tree(address, &table);
        info!("Discovered {} ports on {}", tree.port_count(), address);
        Ok(tree)
    }

    /// Fold table rows into a fresh tree.
    ///
    /// Rows without a non-empty `ifName` are skipped and do not use a slot.
    pub fn build_tree(&self, address: &str, table: &SnmpTable) -> ResourceTree {
        let mut device = Device::new(address, self.model.as_str(), address).with_vendor(self.vendor.as_str());
        let chassis = device.add_chassis(Chassis::new(CHASSIS_NAME));

        for (index, row) in table.iter() {
            let Some(name) = row.text(IF_NAME) else {
                debug!("Skipping interface index {} without ifName", index);
                continue;
            };

            let mut port = Port::new(name);
            if let Some(alias) = row.text(IF_ALIAS) {
                port = port.with_description(alias);
            }
            let slot = chassis.add_port(port);
            debug!("Interface index {} -> port slot {}", index, slot);
        }

        device
    }
}
