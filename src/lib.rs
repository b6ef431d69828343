//! wg-addpeer - provision new WireGuard peers
//!
//! Reads an existing server configuration, hands out the next free tunnel
//! address, asks the `wg` tool for fresh key material and writes both sides
//! of the new peer relationship.
//!
//! # Features
//!
//! - Line-oriented scan of `wg-quick` style server configs
//! - Next-address allocation from the peers already listed
//! - Peer directory with keys and a ready-to-import config
//! - Optional QR code of the peer config via `qrencode`
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use wg_addpeer::peer::{provision, ProvisionOptions};
//! use wg_addpeer::platform::{QrencodeRenderer, WgKeyTool};
//!
//! let peer = provision(
//!     Path::new("/etc/wireguard/wg0.conf"),
//!     "phone",
//!     &ProvisionOptions::default(),
//!     &WgKeyTool::default(),
//!     &QrencodeRenderer::default(),
//! )
//! .unwrap();
//! println!("phone gets {}", peer.address);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod peer;
pub mod platform;

pub use error::{AddPeerError, Result};
