use std::net::Ipv4Addr;

/// Listen port assumed when `[Interface]` has no `ListenPort`
pub const DEFAULT_LISTEN_PORT: &str = "51820";

/// Facts extracted from a server configuration file
///
/// Built once per run by the scanner and never modified afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct ServerConfigSnapshot {
    /// First IPv4 address of the `[Interface]` section
    pub interface_address: Ipv4Addr,
    /// UDP listen port, kept verbatim as written in the file
    pub listen_port: String,
    /// Raw `PrivateKey` value of the `[Interface]` section
    pub interface_private_key: Vec<u8>,
    /// Resolved `host:port` peers use to reach the server
    pub endpoint: Option<String>,
    /// Addresses found in `AllowedIPs` of existing `[Peer]` sections, in file order
    pub allocated_peers: Vec<Ipv4Addr>,
}

impl std::fmt::Debug for ServerConfigSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfigSnapshot")
            .field("interface_address", &self.interface_address)
            .field("listen_port", &self.listen_port)
            .field("interface_private_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("allocated_peers", &self.allocated_peers)
            .finish()
    }
}

/// Section of the configuration file the scanner is currently inside
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Section {
    /// Lines before the first section header
    #[default]
    Preamble,
    Interface,
    Peer,
    /// Any other section; tracked but its keys are ignored
    Other(String),
}

impl Section {
    pub fn from_header(name: &str) -> Self {
        match name {
            "Interface" => Section::Interface,
            "Peer" => Section::Peer,
            other => Section::Other(other.to_string()),
        }
    }
}
