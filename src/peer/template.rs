use std::fmt::Write;
use std::net::Ipv4Addr;

use super::types::{key_text, PeerMaterial, ProvisionOptions};

/// AllowedIPs used when the peer routes everything through the tunnel
pub const ROUTE_ALL: &str = "0.0.0.0/0";

/// Inputs for the peer-side configuration
pub struct PeerConfigTemplate<'a> {
    pub address: Ipv4Addr,
    pub server_address: Ipv4Addr,
    pub server_public_key: &'a [u8],
    pub endpoint: &'a str,
    pub material: &'a PeerMaterial,
    pub options: &'a ProvisionOptions,
}

impl PeerConfigTemplate<'_> {
    /// Render the configuration the new device imports
    pub fn render(&self) -> String {
        let mut out = String::new();

        // Writing into a String cannot fail
        let _ = writeln!(out, "[Interface]");
        let _ = writeln!(out, "Address = {}/32", self.address);
        let _ = writeln!(out, "PrivateKey = {}", key_text(&self.material.private_key));
        if let Some(dns) = &self.options.dns {
            let _ = writeln!(out, "DNS = {}", dns);
        }

        let allowed_ips = if self.options.route_all {
            ROUTE_ALL.to_string()
        } else {
            format!("{}/32", self.server_address)
        };

        let _ = writeln!(out);
        let _ = writeln!(out, "[Peer]");
        let _ = writeln!(out, "PublicKey = {}", key_text(self.server_public_key));
        let _ = writeln!(out, "PresharedKey = {}", key_text(&self.material.preshared_key));
        let _ = writeln!(out, "AllowedIPs = {}", allowed_ips);
        let _ = writeln!(out, "Endpoint = {}", self.endpoint);
        if self.options.keep_alive != 0 {
            let _ = writeln!(out, "PersistentKeepalive = {}", self.options.keep_alive);
        }

        out
    }
}

/// Stanza appended to the server configuration for the new peer
pub fn server_peer_stanza(peer_name: &str, address: Ipv4Addr, material: &PeerMaterial) -> String {
    format!(
        "\n# {name}\n[Peer]\nPublicKey = {public}\nPresharedKey = {psk}\nAllowedIPs = {address}/32\n",
        name = peer_name,
        public = key_text(&material.public_key),
        psk = key_text(&material.preshared_key),
        address = address,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material() -> PeerMaterial {
        PeerMaterial {
            private_key: b"cGVlci1wcml2YXRl\n".to_vec(),
            public_key: b"cGVlci1wdWJsaWM=\n".to_vec(),
            preshared_key: b"cHJlc2hhcmVk\n".to_vec(),
        }
    }

    fn render(options: &ProvisionOptions) -> String {
        let material = material();
        PeerConfigTemplate {
            address: Ipv4Addr::new(10, 0, 0, 6),
            server_address: Ipv4Addr::new(10, 0, 0, 1),
            server_public_key: b"c2VydmVy\n",
            endpoint: "vpn.example.org:51820",
            material: &material,
            options,
        }
        .render()
    }

    #[test]
    fn test_default_peer_config() {
        let text = render(&ProvisionOptions::default());
        assert_eq!(
            text,
            "[Interface]
Address = 10.0.0.6/32
PrivateKey = cGVlci1wcml2YXRl

[Peer]
PublicKey = c2VydmVy
PresharedKey = cHJlc2hhcmVk
AllowedIPs = 10.0.0.1/32
Endpoint = vpn.example.org:51820
PersistentKeepalive = 25
"
        );
    }

    #[test]
    fn test_no_dns_line_without_option() {
        let text = render(&ProvisionOptions::default());
        assert!(!text.contains("DNS"));
    }

    #[test]
    fn test_dns_in_interface_section() {
        let options = ProvisionOptions {
            dns: Some("10.0.0.1, 1.1.1.1".to_string()),
            ..ProvisionOptions::default()
        };
        let text = render(&options);
        assert!(text.starts_with(
            "[Interface]\nAddress = 10.0.0.6/32\nPrivateKey = cGVlci1wcml2YXRl\nDNS = 10.0.0.1, 1.1.1.1\n\n[Peer]\n"
        ));
    }

    #[test]
    fn test_route_all() {
        let options = ProvisionOptions {
            route_all: true,
            ..ProvisionOptions::default()
        };
        assert!(render(&options).contains("AllowedIPs = 0.0.0.0/0\n"));
        assert!(render(&ProvisionOptions::default()).contains("AllowedIPs = 10.0.0.1/32\n"));
    }

    #[test]
    fn test_keepalive_disabled() {
        let options = ProvisionOptions {
            keep_alive: 0,
            ..ProvisionOptions::default()
        };
        let text = render(&options);
        assert!(!text.contains("PersistentKeepalive"));
        assert!(text.ends_with("Endpoint = vpn.example.org:51820\n"));
    }

    #[test]
    fn test_custom_keepalive() {
        let options = ProvisionOptions {
            keep_alive: 60,
            ..ProvisionOptions::default()
        };
        assert!(render(&options).ends_with("PersistentKeepalive = 60\n"));
    }

    #[test]
    fn test_server_stanza() {
        let stanza = server_peer_stanza("phone", Ipv4Addr::new(10, 0, 0, 6), &material());
        assert_eq!(
            stanza,
            "\n# phone\n[Peer]\nPublicKey = cGVlci1wdWJsaWM=\nPresharedKey = cHJlc2hhcmVk\nAllowedIPs = 10.0.0.6/32\n"
        );
    }
}
