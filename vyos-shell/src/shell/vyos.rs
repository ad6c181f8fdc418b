//! VyOS router driver.

use log::{debug, error, info, warn};
use secrecy::SecretString;

use super::capability::{Capability, CapabilityTable, Operation};
use super::config::ShellConfig;
use super::context::{PASSWORD, ResourceCommandContext, SNMP_READ_COMMUNITY, USER};
use super::credentials::CredentialStore;
use super::ResourceDriver;
use crate::autoload::{AutoLoadDetails, InventoryBuilder};
use crate::cli::{CliConnector, CliService, CliSessionBuilder, SshCli};
use crate::error::{DriverError, Result};
use crate::snmp::{SnmpClient, SnmpConnector};

pub const SHOW_INTERFACES: &str = "show interfaces";

/// Operations the VyOS driver implements. Everything else is a stub.
pub const VYOS_CAPABILITIES: CapabilityTable = CapabilityTable::new(&[
    (Operation::Initialize, Capability::Supported),
    (Operation::Restore, Capability::NotSupported),
    (Operation::Save, Capability::NotSupported),
    (Operation::LoadFirmware, Capability::NotSupported),
    (Operation::RunCustomCommand, Capability::NotSupported),
    (Operation::RunCustomConfigCommand, Capability::NotSupported),
    (Operation::Shutdown, Capability::NotSupported),
    (Operation::OrchestrationSave, Capability::NotSupported),
    (Operation::OrchestrationRestore, Capability::NotSupported),
    (Operation::ApplyConnectivityChanges, Capability::NotSupported),
    (Operation::GetInventory, Capability::Supported),
    (Operation::HealthCheck, Capability::NotSupported),
    (Operation::ShowInterfaces, Capability::Supported),
    (Operation::Cleanup, Capability::Supported),
]);

/// Shell driver for VyOS routers.
///
/// Inventory comes from SNMP, `show interfaces` from an SSH CLI session.
/// Each operation opens its own sessions and closes them before returning.
///
/// # Example
///
/// ```rust,no_run
/// use vyos_shell::shell::{PlaintextCredentials, ResourceCommandContext, ResourceDriver, VyosDriver};
///
/// # async fn example() -> Result<(), vyos_shell::Error> {
/// let driver = VyosDriver::new(PlaintextCredentials)?;
/// let context = ResourceCommandContext::new("edge-1", "192.0.2.10")
///     .with_attribute("SNMP Read Community", "public");
///
/// let details = driver.get_inventory(&context).await?;
/// println!("{}", details.to_json_pretty()?);
/// # Ok(())
/// # }
/// ```
pub struct VyosDriver<K, S = SnmpClient, C = SshCli> {
    credentials: K,
    snmp: S,
    cli: C,
    config: ShellConfig,
}

impl<K: CredentialStore> VyosDriver<K> {
    /// Driver talking to real devices over SNMP and SSH.
    pub fn new(credentials: K) -> Result<Self> {
        Ok(Self::with_connectors(credentials, SnmpClient, SshCli::vyos()?))
    }
}

impl<K, S, C> VyosDriver<K, S, C>
where
    K: CredentialStore,
    S: SnmpConnector,
    C: CliConnector,
{
    pub fn with_connectors(credentials: K, snmp: S, cli: C) -> Self {
        Self {
            credentials,
            snmp,
            cli,
            config: ShellConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ShellConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Read an encrypted attribute from the context and decrypt it.
    async fn secret_attribute(&self, context: &ResourceCommandContext, name: &str) -> Result<SecretString> {
        let encrypted = context.attribute(name).inspect_err(|e| {
            error!("Cannot read secret for {}: {}", context.describe(), e);
        })?;
        self.credentials.decrypt(name, encrypted).await.inspect_err(|e| {
            error!("Decrypting '{}' for {} failed: {}", name, context.describe(), e);
        })
    }
}

impl<K, S, C> ResourceDriver for VyosDriver<K, S, C>
where
    K: CredentialStore,
    S: SnmpConnector,
    C: CliConnector,
{
    fn capability(&self, operation: Operation) -> Capability {
        VYOS_CAPABILITIES.get(operation)
    }

    async fn initialize(&self, context: &ResourceCommandContext) -> Result<()> {
        debug!("Driver initialized for {}", context.describe());
        Ok(())
    }

    async fn get_inventory(&self, context: &ResourceCommandContext) -> Result<AutoLoadDetails> {
        info!("Autoload started for {}", context.describe());
        let resource = &context.resource;

        let community = self.secret_attribute(context, SNMP_READ_COMMUNITY).await?;

        let mut tree = InventoryBuilder::new(&self.snmp)
            .snmp_port(self.config.snmp_port)
            .vendor(self.config.vendor.as_str())
            .model(resource.model.as_str())
            .discover(&resource.address, community)
            .await?;
        tree.name = resource.name.clone();

        let details = AutoLoadDetails::from(&tree);
        info!(
            "Autoload finished for {}: {} resources, {} attributes",
            resource.name,
            details.resources.len(),
            details.attributes.len()
        );
        Ok(details)
    }

    async fn show_interfaces(&self, context: &ResourceCommandContext) -> Result<String> {
        let address = context.resource.address.as_str();
        let user = context.attribute(USER).inspect_err(|e| {
            error!("Cannot log in to {}: {}", context.describe(), e);
        })?;
        let password = self.secret_attribute(context, PASSWORD).await?;
        info!("Reading interfaces from {} as {}", address, user);

        let ssh = CliSessionBuilder::new(address)
            .port(self.config.ssh_port)
            .username(user)
            .secret_password(password)
            .timeout(self.config.command_timeout)
            .host_key_verification(self.config.host_key_verification)
            .build()?;

        let mut session = self.cli.open(ssh).await.inspect_err(|e| {
            error!("Failed to open CLI session to {}: {}", address, e);
        })?;

        let sent = session.send_command(SHOW_INTERFACES).await;
        if let Err(e) = session.close().await {
            warn!("Failed to close CLI session to {}: {}", address, e);
        }

        let response = sent.inspect_err(|e| {
            error!("'{}' on {} failed: {}", SHOW_INTERFACES, address, e);
        })?;
        if let Some(message) = response.failure_message {
            error!("'{}' failed on {}: {}", SHOW_INTERFACES, address, message);
            return Err(DriverError::CommandFailed {
                command: SHOW_INTERFACES.to_string(),
                message,
            }
            .into());
        }
        debug!("'{}' on {} took {:?}", SHOW_INTERFACES, address, response.elapsed);
        Ok(response.result)
    }

    async fn cleanup(&self) -> Result<()> {
        debug!("Driver cleanup");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::CommandOutcome;
    use crate::testing::{FakeCli, FakeSnmp, PrefixCredentials, SnmpBehavior, if_x_table};

    const INTERFACES: &str = "\
Interface        IP Address                        S/L  Description
---------        ----------                        ---  -----------
eth0             192.0.2.10/24                     u/u
lo               127.0.0.1/8                       u/u";

    fn context() -> ResourceCommandContext {
        ResourceCommandContext::new("vyos-dev4", "192.0.2.10")
            .with_attribute(SNMP_READ_COMMUNITY, "enc:public")
            .with_attribute(USER, "vyos")
            .with_attribute(PASSWORD, "enc:secret")
    }

    fn driver(snmp: FakeSnmp, cli: FakeCli) -> VyosDriver<PrefixCredentials, FakeSnmp, FakeCli> {
        VyosDriver::with_connectors(PrefixCredentials, snmp, cli)
    }

    #[test]
    fn test_capabilities() {
        let supported: Vec<Operation> = VYOS_CAPABILITIES.supported().collect();
        assert_eq!(
            supported,
            vec![
                Operation::Initialize,
                Operation::GetInventory,
                Operation::ShowInterfaces,
                Operation::Cleanup
            ]
        );
        for op in Operation::ALL {
            if !supported.contains(&op) {
                assert_eq!(VYOS_CAPABILITIES.get(op), Capability::NotSupported, "{op}");
            }
        }
    }

    #[tokio::test]
    async fn test_get_inventory() {
        let snmp = FakeSnmp::serving(if_x_table(&[Some("eth0"), None, Some("eth1")]));
        let driver = driver(snmp.clone(), FakeCli::answering(""));

        let details = driver.get_inventory(&context()).await.unwrap();

        let addresses: Vec<&str> = details
            .resources
            .iter()
            .map(|r| r.relative_address.as_str())
            .collect();
        assert_eq!(addresses, vec!["1", "1/1", "1/2"]);
        assert_eq!(details.resource("1/2").unwrap().name, "eth1");
        assert_eq!(details.attribute("", "Vyos.Vendor"), Some("VyOS"));
        assert_eq!(snmp.seen_community().as_deref(), Some("public"));
        assert!(snmp.was_closed());
    }

    #[tokio::test]
    async fn test_get_inventory_missing_community() {
        let driver = driver(FakeSnmp::serving(Default::default()), FakeCli::answering(""));
        let ctx = ResourceCommandContext::new("vyos-dev4", "192.0.2.10");

        let err = driver.get_inventory(&ctx).await.unwrap_err();
        assert!(err.to_string().contains("Vyos.SNMP Read Community"));
    }

    #[tokio::test]
    async fn test_get_inventory_bad_ciphertext() {
        let driver = driver(FakeSnmp::serving(Default::default()), FakeCli::answering(""));
        let ctx = ResourceCommandContext::new("vyos-dev4", "192.0.2.10")
            .with_attribute(SNMP_READ_COMMUNITY, "public");

        let err = driver.get_inventory(&ctx).await.unwrap_err();
        assert!(matches!(err, crate::Error::Credential(_)));
    }

    #[tokio::test]
    async fn test_get_inventory_snmp_failure() {
        let driver = driver(FakeSnmp::new(SnmpBehavior::OpenFails), FakeCli::answering(""));
        let err = driver.get_inventory(&context()).await.unwrap_err();
        assert!(matches!(err, crate::Error::Snmp(_)));
    }

    #[tokio::test]
    async fn test_show_interfaces() {
        let cli = FakeCli::answering(INTERFACES);
        let driver = driver(FakeSnmp::serving(Default::default()), cli.clone());

        let output = driver.show_interfaces(&context()).await.unwrap();

        assert!(output.contains("eth0             192.0.2.10/24"));
        assert_eq!(*cli.commands.lock().unwrap(), vec!["show interfaces".to_string()]);
        assert_eq!(
            cli.login.lock().unwrap().clone(),
            Some(("vyos".to_string(), "secret".to_string()))
        );
        assert!(cli.was_closed());
    }

    #[tokio::test]
    async fn test_show_interfaces_failure_pattern() {
        let cli = FakeCli::answering("  Invalid command: show [interfaces]");
        let driver = driver(FakeSnmp::serving(Default::default()), cli.clone());

        let err = driver.show_interfaces(&context()).await.unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Driver(DriverError::CommandFailed { .. })
        ));
        assert!(cli.was_closed());
    }

    #[tokio::test]
    async fn test_show_interfaces_bad_password_never_connects() {
        let cli = FakeCli::answering(INTERFACES);
        let driver = driver(FakeSnmp::serving(Default::default()), cli.clone());
        let ctx = ResourceCommandContext::new("vyos-dev4", "192.0.2.10")
            .with_attribute(USER, "vyos")
            .with_attribute(PASSWORD, "secret");

        let err = driver.show_interfaces(&ctx).await.unwrap_err();

        assert!(err.to_string().contains("Failed to decrypt 'Password'"));
        assert!(cli.login.lock().unwrap().is_none());
        assert!(cli.commands.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_show_interfaces_missing_user() {
        let cli = FakeCli::answering(INTERFACES);
        let driver = driver(FakeSnmp::serving(Default::default()), cli.clone());
        let ctx = ResourceCommandContext::new("vyos-dev4", "192.0.2.10")
            .with_attribute(PASSWORD, "enc:secret");

        let err = driver.show_interfaces(&ctx).await.unwrap_err();

        assert!(err.to_string().contains("Vyos.User"));
        assert!(cli.login.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_show_interfaces_login_refused() {
        let driver = driver(FakeSnmp::serving(Default::default()), FakeCli::refusing());
        let err = driver.show_interfaces(&context()).await.unwrap_err();
        assert!(err.to_string().contains("Authentication failed for user 'vyos'"));
    }

    #[tokio::test]
    async fn test_execute_dispatch() {
        let snmp = FakeSnmp::serving(if_x_table(&[Some("eth0")]));
        let driver = driver(snmp, FakeCli::answering(INTERFACES));
        let ctx = context();

        match driver.execute("get_inventory", &ctx).await.unwrap() {
            CommandOutcome::Inventory(details) => assert_eq!(details.resources.len(), 2),
            other => panic!("unexpected outcome {other:?}"),
        }
        match driver.execute("show_interfaces", &ctx).await.unwrap() {
            CommandOutcome::Text(text) => assert!(text.contains("lo")),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(
            driver.execute("initialize", &ctx).await.unwrap(),
            CommandOutcome::Completed
        );
        assert_eq!(
            driver.execute("cleanup", &ctx).await.unwrap(),
            CommandOutcome::Completed
        );
    }

    #[tokio::test]
    async fn test_execute_stubs_report_not_supported() {
        let driver = driver(FakeSnmp::serving(Default::default()), FakeCli::answering(""));
        let ctx = context();

        for name in ["save", "restore", "load_firmware", "ApplyConnectivityChanges", "health_check"] {
            let outcome = driver.execute(name, &ctx).await.unwrap();
            let op = Operation::from_name(name).unwrap();
            assert_eq!(outcome, CommandOutcome::NotSupported(op));
        }
    }

    #[tokio::test]
    async fn test_execute_unknown_operation() {
        let driver = driver(FakeSnmp::serving(Default::default()), FakeCli::answering(""));
        let err = driver.execute("reboot", &context()).await.unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Driver(DriverError::UnknownOperation { .. })
        ));
    }
}
