use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::net::Ipv4Addr;
use std::path::Path;

use super::types::{Section, ServerConfigSnapshot, DEFAULT_LISTEN_PORT};
use crate::error::{ConfigError, Result};

lazy_static! {
    // Only bare IPv4 addresses, with or without a /32 suffix
    static ref SINGLE_IPV4: Regex =
        Regex::new(r"([0-9]+)\.([0-9]+)\.([0-9]+)\.([0-9]+)(?:/32)?(?:\s|,|$)").unwrap();
}

/// Commented-out directive that is still honoured by the scanner
const PUBLIC_IP_DIRECTIVE: &str = "# public_ip";

/// Scan a WireGuard server configuration file
///
/// `endpoint_override` takes precedence over a `public_ip` entry found in the
/// `[Interface]` section.
pub fn scan<P: AsRef<Path>>(
    path: P,
    endpoint_override: Option<&str>,
) -> Result<ServerConfigSnapshot> {
    let path = path.as_ref();
    tracing::debug!("Scanning server config {}", path.display());

    let file = File::open(path).map_err(ConfigError::File)?;
    scan_lines(BufReader::new(file).lines(), endpoint_override)
}

/// Scan configuration text already held in memory
pub fn parse_server_config(
    text: &str,
    endpoint_override: Option<&str>,
) -> Result<ServerConfigSnapshot> {
    scan_lines(text.lines().map(|l| Ok(l.to_string())), endpoint_override)
}

fn scan_lines<I>(lines: I, endpoint_override: Option<&str>) -> Result<ServerConfigSnapshot>
where
    I: Iterator<Item = io::Result<String>>,
{
    let state = lines
        .enumerate()
        .try_fold(ScanState::default(), |state, (idx, line)| {
            let line = line.map_err(ConfigError::File)?;
            state.feed(idx + 1, &line)
        })?;

    state.finish(endpoint_override)
}

/// Values collected while walking the file
#[derive(Default)]
struct ScanState {
    section: Section,
    interface_address: Option<Ipv4Addr>,
    listen_port: Option<String>,
    private_key: Option<Vec<u8>>,
    public_ip: Option<String>,
    allocated_peers: Vec<Ipv4Addr>,
}

impl ScanState {
    fn feed(mut self, line_no: usize, raw: &str) -> Result<Self> {
        let mut line = raw.trim_end();
        if line.is_empty() {
            return Ok(self);
        }

        if is_public_ip_directive(line) {
            line = line[1..].trim();
        }

        if line.starts_with('#') {
            return Ok(self);
        }

        if let Some(name) = section_header(line) {
            self.section = Section::from_header(name);
            return Ok(self);
        }

        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| ConfigError::MalformedLine {
                line_no,
                line: line.to_string(),
            })?;
        let key = key.trim().to_lowercase();
        let value = value.trim();

        match (&self.section, key.as_str()) {
            (Section::Interface, "address") => {
                if let Some(addr) = first_ipv4(value) {
                    self.interface_address = Some(addr);
                }
            }
            (Section::Interface, "listenport") => {
                self.listen_port = Some(value.to_string());
            }
            (Section::Interface, "privatekey") => {
                self.private_key = Some(value.as_bytes().to_vec());
            }
            (Section::Interface, "public_ip") => {
                self.public_ip = Some(value.to_string());
            }
            (Section::Peer, "allowedips") => {
                let before = self.allocated_peers.len();
                self.allocated_peers.extend(all_ipv4(value));
                tracing::trace!(
                    "Line {}: {} peer address(es) in use",
                    line_no,
                    self.allocated_peers.len() - before
                );
            }
            _ => {}
        }

        Ok(self)
    }

    fn finish(self, endpoint_override: Option<&str>) -> Result<ServerConfigSnapshot> {
        let interface_address = self
            .interface_address
            .ok_or(ConfigError::MissingInterfaceAddress)?;
        let interface_private_key = self.private_key.ok_or(ConfigError::MissingPrivateKey)?;
        let listen_port = self
            .listen_port
            .unwrap_or_else(|| DEFAULT_LISTEN_PORT.to_string());

        let endpoint = endpoint_override
            .map(str::to_string)
            .or(self.public_ip)
            .map(|host| format!("{}:{}", host, listen_port));

        tracing::debug!(
            "Interface {} with {} allocated peer address(es), endpoint {:?}",
            interface_address,
            self.allocated_peers.len(),
            endpoint
        );

        Ok(ServerConfigSnapshot {
            interface_address,
            listen_port,
            interface_private_key,
            endpoint,
            allocated_peers: self.allocated_peers,
        })
    }
}

fn is_public_ip_directive(line: &str) -> bool {
    line.get(..PUBLIC_IP_DIRECTIVE.len())
        .map_or(false, |prefix| prefix.eq_ignore_ascii_case(PUBLIC_IP_DIRECTIVE))
}

fn section_header(line: &str) -> Option<&str> {
    line.strip_prefix('[')?.strip_suffix(']')
}

fn first_ipv4(value: &str) -> Option<Ipv4Addr> {
    SINGLE_IPV4.captures(value).and_then(|caps| octets(&caps))
}

fn all_ipv4(value: &str) -> impl Iterator<Item = Ipv4Addr> + '_ {
    SINGLE_IPV4.captures_iter(value).filter_map(|caps| octets(&caps))
}

/// Groups larger than 255 are not octets; such matches are skipped
fn octets(caps: &Captures<'_>) -> Option<Ipv4Addr> {
    let mut out = [0u8; 4];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = caps.get(i + 1)?.as_str().parse().ok()?;
    }
    Some(Ipv4Addr::from(out))
}
