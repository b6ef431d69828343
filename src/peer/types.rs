use std::net::Ipv4Addr;
use std::path::PathBuf;

/// File holding the peer's private key
pub const PRIVATE_KEY_FILE: &str = "private.key";
/// File holding the peer's public key
pub const PUBLIC_KEY_FILE: &str = "public.key";
/// File holding the preshared key shared with the server
pub const PRESHARED_KEY_FILE: &str = "psk.key";
/// File holding the rendered peer-side configuration
pub const CONFIG_FILE: &str = "config.txt";

/// Keepalive interval written into new peer configs unless overridden
pub const DEFAULT_KEEPALIVE: u16 = 25;

/// Key material for a new peer, exactly as produced by the key tool
///
/// The bytes are never decoded; they are written to disk verbatim and
/// interpolated into configs with trailing whitespace removed.
#[derive(Clone)]
pub struct PeerMaterial {
    pub private_key: Vec<u8>,
    pub public_key: Vec<u8>,
    pub preshared_key: Vec<u8>,
}

impl std::fmt::Debug for PeerMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeerMaterial")
            .field("public_key", &key_text(&self.public_key))
            .finish_non_exhaustive()
    }
}

/// Key bytes as config text: UTF-8 with the generator's trailing newline removed
pub fn key_text(key: &[u8]) -> String {
    String::from_utf8_lossy(key).trim_end().to_string()
}

/// Run-time switches for provisioning a peer
#[derive(Debug, Clone)]
pub struct ProvisionOptions {
    /// Server host that overrides `public_ip` from the server config
    pub endpoint_override: Option<String>,
    /// PersistentKeepalive for the peer (0 = omit)
    pub keep_alive: u16,
    /// Optional DNS line for the peer's `[Interface]`
    pub dns: Option<String>,
    /// Route all of the peer's traffic through the tunnel
    pub route_all: bool,
    /// Render the peer config as a QR code
    pub show_qr: bool,
    /// Directory in which the peer directory is created
    pub out_dir: PathBuf,
}

impl Default for ProvisionOptions {
    fn default() -> Self {
        Self {
            endpoint_override: None,
            keep_alive: DEFAULT_KEEPALIVE,
            dns: None,
            route_all: false,
            show_qr: true,
            out_dir: PathBuf::from("."),
        }
    }
}

/// Outcome of a successful provisioning run
#[derive(Debug, Clone)]
pub struct ProvisionedPeer {
    /// Directory holding the peer's keys and config
    pub directory: PathBuf,
    /// Tunnel address handed to the peer
    pub address: Ipv4Addr,
    /// Endpoint written into the peer config
    pub endpoint: String,
    /// Peer-side configuration text
    pub config_text: String,
    /// Rendered QR code, when requested
    pub qr_code: Option<String>,
}
