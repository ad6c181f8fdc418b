//! VyOS driver example: autoload a router and read its interfaces
//!
//! Runs the same operations the orchestration platform would invoke,
//! by name, against a real VyOS device.
//!
//! # Prerequisites
//!
//! - VyOS router reachable over SSH and SNMP
//! - `service snmp community <name> authorization ro` configured
//!
//! # Usage
//!
//! ```bash
//! cargo run --example vyos_driver -- --host 192.0.2.10 --user vyos --password vyos --community public
//! ```
//!
//! Run a single operation:
//! ```bash
//! cargo run --example vyos_driver -- --host 192.0.2.10 --community public --op get_inventory
//! ```

use std::env;
use std::time::Duration;

use vyos_shell::shell::{
    PASSWORD, PlaintextCredentials, SNMP_READ_COMMUNITY, ShellConfig, USER,
};
use vyos_shell::{CommandOutcome, ResourceCommandContext, ResourceDriver, VyosDriver};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = ShellConfig::default()
        .with_ssh_port(args.ssh_port)
        .with_snmp_port(args.snmp_port)
        .with_command_timeout(Duration::from_secs(args.timeout));
    let driver = VyosDriver::new(PlaintextCredentials)?.with_config(config);

    let mut context = ResourceCommandContext::new(&args.name, &args.host)
        .with_attribute(SNMP_READ_COMMUNITY, &args.community)
        .with_attribute(USER, &args.user);
    if let Some(password) = &args.password {
        context = context.with_attribute(PASSWORD, password);
    }

    let operations = match &args.op {
        Some(op) => vec![op.clone()],
        None => vec!["get_inventory".to_string(), "show_interfaces".to_string(), "save".to_string()],
    };

    for op in &operations {
        println!("\n=== {} ===", op);
        match driver.execute(op, &context).await? {
            CommandOutcome::Inventory(details) => println!("{}", details.to_json_pretty()?),
            CommandOutcome::Text(text) => println!("{}", text),
            CommandOutcome::Completed => println!("done"),
            CommandOutcome::NotSupported(op) => println!("{} is not supported by this driver", op),
        }
    }

    Ok(())
}

/// Simple argument parser (avoiding external dependencies)
struct Args {
    host: String,
    name: String,
    ssh_port: u16,
    snmp_port: u16,
    user: String,
    password: Option<String>,
    community: String,
    op: Option<String>,
    timeout: u64,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut host = "192.0.2.10".to_string();
        let mut name = None;
        let mut ssh_port = 22u16;
        let mut snmp_port = 161u16;
        let mut user = "vyos".to_string();
        let mut password = None;
        let mut community = "public".to_string();
        let mut op = None;
        let mut timeout = 30u64;

        let mut i = 1;
        while i < args.len() {
            let value = args.get(i + 1).cloned();
            match args[i].as_str() {
                "--host" | "-h" => host = value.unwrap_or(host),
                "--name" | "-n" => name = value,
                "--ssh-port" => ssh_port = value.and_then(|v| v.parse().ok()).unwrap_or(22),
                "--snmp-port" => snmp_port = value.and_then(|v| v.parse().ok()).unwrap_or(161),
                "--user" | "-u" => user = value.unwrap_or(user),
                "--password" | "-P" => password = value,
                "--community" | "-c" => community = value.unwrap_or(community),
                "--op" | "-o" => op = value,
                "--timeout" | "-t" => timeout = value.and_then(|v| v.parse().ok()).unwrap_or(30),
                "--help" => {
                    Self::print_help();
                    std::process::exit(0);
                }
                other => {
                    eprintln!("Unknown argument: {}", other);
                    i += 1;
                    continue;
                }
            }
            i += 2;
        }

        Self {
            name: name.unwrap_or_else(|| host.clone()),
            host,
            ssh_port,
            snmp_port,
            user,
            password,
            community,
            op,
            timeout,
        }
    }

    fn print_help() {
        println!(
            r#"vyos-shell driver example

USAGE:
    cargo run --example vyos_driver -- [OPTIONS]

OPTIONS:
    -h, --host <HOST>          Router address [default: 192.0.2.10]
    -n, --name <NAME>          Resource name [default: host]
        --ssh-port <PORT>      SSH port [default: 22]
        --snmp-port <PORT>     SNMP port [default: 161]
    -u, --user <USER>          SSH username [default: vyos]
    -P, --password <PASS>      SSH password
    -c, --community <NAME>     SNMP read community [default: public]
    -o, --op <OPERATION>       Run one operation (get_inventory, show_interfaces, ...)
    -t, --timeout <SECS>       CLI timeout [default: 30]
    --help                     Print this help message
"#
        );
    }
}
