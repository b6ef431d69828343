use clap::Parser;
use std::path::PathBuf;

use crate::peer::{ProvisionOptions, DEFAULT_KEEPALIVE};
use crate::platform::{DEFAULT_QRENCODE, DEFAULT_WG};

#[derive(Parser, Debug)]
#[command(
    name = "wg-addpeer",
    about = "Create keys and configuration for a new WireGuard peer",
    version
)]
pub struct Cli {
    /// Name of the server configuration file
    pub config: PathBuf,

    /// Name of the new device
    pub device: String,

    /// Don't show the peer config as a QR code
    #[arg(long = "noqr", visible_alias = "no-qr")]
    pub noqr: bool,

    /// Public IP or hostname of the server
    #[arg(long = "public_ip", visible_alias = "public-ip", value_name = "HOST")]
    pub public_ip: Option<String>,

    /// Seconds between the peer's keepalive packets (0 = off)
    #[arg(
        long = "keep_alive",
        visible_alias = "keep-alive",
        value_name = "SECONDS",
        default_value_t = DEFAULT_KEEPALIVE
    )]
    pub keep_alive: u16,

    /// DNS setting for the peer's [Interface] section
    #[arg(long)]
    pub dns: Option<String>,

    /// Route all of the peer's traffic through the tunnel
    #[arg(long = "route_all", visible_alias = "route-all")]
    pub route_all: bool,

    /// Directory in which the peer directory is created
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// WireGuard tool used for key generation
    #[arg(long, value_name = "PROGRAM", env = "WG_ADDPEER_WG", default_value = DEFAULT_WG)]
    pub wg: String,

    /// QR encoder used to render the peer config
    #[arg(
        long,
        value_name = "PROGRAM",
        env = "WG_ADDPEER_QRENCODE",
        default_value = DEFAULT_QRENCODE
    )]
    pub qrencode: String,

    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    /// Provisioning switches selected on the command line
    pub fn provision_options(&self) -> ProvisionOptions {
        ProvisionOptions {
            endpoint_override: self.public_ip.clone(),
            keep_alive: self.keep_alive,
            dns: self.dns.clone(),
            route_all: self.route_all,
            show_qr: !self.noqr,
            out_dir: self.out_dir.clone(),
        }
    }
}
