use acme_zonefile_domain::{AddressFamily, CliOverrides};
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::debug;

mod bootstrap;
mod commands;
mod di;

#[derive(Parser)]
#[command(name = "acme-zonefile")]
#[command(version)]
#[command(about = "Publish ACME DNS-01 challenges in zone files and wait for them to propagate")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Only use IPv4 nameserver addresses
    #[arg(short = '4', long, global = true, conflicts_with = "ipv6")]
    ipv4: bool,

    /// Only use IPv6 nameserver addresses
    #[arg(short = '6', long, global = true)]
    ipv6: bool,

    /// Set the DNSSEC OK bit on queries
    #[arg(long, global = true)]
    dnssec: bool,

    /// Log every DNS exchange
    #[arg(long, global = true)]
    debug_dns: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the challenge, bump the SOA serial, reload and wait for propagation
    Deploy {
        fqdn: String,
        /// TXT value to publish
        value: String,
    },
    /// Wait until every authoritative nameserver serves VALUE
    Wait {
        fqdn: String,
        value: String,
        /// Nameserver to check (hostname or address); repeatable
        #[arg(short = 'n', long = "nameserver", value_name = "NS")]
        nameservers: Vec<String>,
        /// Deadline in seconds
        #[arg(short = 't', long)]
        timeout: Option<u64>,
    },
    /// Print the addresses of the authoritative nameservers
    Nameservers { fqdn: String },
    /// Print the challenge record name and the encoded token
    Encode { fqdn: String, token: String },
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        let address_family = if self.ipv4 {
            Some(AddressFamily::V4Only)
        } else if self.ipv6 {
            Some(AddressFamily::V6Only)
        } else {
            None
        };
        CliOverrides {
            log_level: self.log_level.clone(),
            address_family,
            dnssec: self.dnssec,
            debug_dns: self.debug_dns,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;
    bootstrap::init_logging(&config, cli.config.as_deref());
    debug!(version = env!("CARGO_PKG_VERSION"), "acme-zonefile starting");

    let services = di::Services::new(&config);

    match cli.command {
        Command::Deploy { fqdn, value } => {
            commands::deploy(&config, &services, &fqdn, &value).await
        }
        Command::Wait {
            fqdn,
            value,
            nameservers,
            timeout,
        } => commands::wait(&config, &services, &fqdn, &value, nameservers, timeout).await,
        Command::Nameservers { fqdn } => commands::nameservers(&services, &fqdn).await,
        Command::Encode { fqdn, token } => commands::encode(&fqdn, &token),
    }
}
