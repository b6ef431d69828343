use std::fs::{self, DirBuilder, OpenOptions};
use std::io::{self, Write};
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

use super::allocator::allocate;
use super::template::{server_peer_stanza, PeerConfigTemplate};
use super::types::{
    PeerMaterial, ProvisionOptions, ProvisionedPeer, CONFIG_FILE, PRESHARED_KEY_FILE,
    PRIVATE_KEY_FILE, PUBLIC_KEY_FILE,
};
use crate::config::scan;
use crate::error::{AddPeerError, Result};
use crate::platform::{CodeRenderer, KeyTool};

/// Provision a new peer named `peer_name` against the server config at `server_config`
///
/// Steps run strictly in order and the first failure aborts the run:
/// the peer directory must not exist, the server config is scanned, an
/// address is allocated, the endpoint must be known, and only then is the
/// key tool invoked. Nothing is written before all key material exists.
pub fn provision(
    server_config: &Path,
    peer_name: &str,
    options: &ProvisionOptions,
    keys: &dyn KeyTool,
    renderer: &dyn CodeRenderer,
) -> Result<ProvisionedPeer> {
    let directory = options.out_dir.join(peer_name);
    if fs::symlink_metadata(&directory).is_ok() {
        return Err(AddPeerError::PeerDirectoryExists(directory));
    }

    let snapshot = scan(server_config, options.endpoint_override.as_deref())?;
    let address = allocate(snapshot.interface_address, &snapshot.allocated_peers)?;
    let endpoint = snapshot.endpoint.ok_or(AddPeerError::EndpointUnresolved)?;

    tracing::info!(
        "Provisioning peer {} at {} (server endpoint {})",
        peer_name,
        address,
        endpoint
    );

    let server_public_key = keys.public_key(&snapshot.interface_private_key)?;
    let material = generate_material(keys)?;

    let config_text = PeerConfigTemplate {
        address,
        server_address: snapshot.interface_address,
        server_public_key: &server_public_key,
        endpoint: &endpoint,
        material: &material,
        options,
    }
    .render();

    create_peer_directory(&directory)?;
    if let Err(e) = persist(&directory, server_config, peer_name, address, &material, &config_text) {
        if let Err(cleanup) = fs::remove_dir_all(&directory) {
            tracing::warn!(
                "Failed to remove incomplete peer directory {}: {}",
                directory.display(),
                cleanup
            );
        }
        return Err(e);
    }

    tracing::info!(
        "Wrote peer files to {} and appended peer to {}",
        directory.display(),
        server_config.display()
    );

    let qr_code = if options.show_qr {
        Some(renderer.render(&config_text)?)
    } else {
        None
    };

    Ok(ProvisionedPeer {
        directory,
        address,
        endpoint,
        config_text,
        qr_code,
    })
}

fn generate_material(keys: &dyn KeyTool) -> Result<PeerMaterial> {
    let private_key = keys.generate_private_key()?;
    let public_key = keys.public_key(&private_key)?;
    let preshared_key = keys.generate_preshared_key()?;

    Ok(PeerMaterial {
        private_key,
        public_key,
        preshared_key,
    })
}

/// Write the peer's files and register it with the server
fn persist(
    directory: &Path,
    server_config: &Path,
    peer_name: &str,
    address: Ipv4Addr,
    material: &PeerMaterial,
    config_text: &str,
) -> Result<()> {
    write_private_file(&directory.join(PRIVATE_KEY_FILE), &material.private_key)?;
    write_private_file(&directory.join(PUBLIC_KEY_FILE), &material.public_key)?;
    write_private_file(&directory.join(PRESHARED_KEY_FILE), &material.preshared_key)?;
    write_private_file(&directory.join(CONFIG_FILE), config_text.as_bytes())?;

    let mut server = OpenOptions::new().append(true).open(server_config)?;
    server.write_all(server_peer_stanza(peer_name, address, material).as_bytes())?;
    server.flush()?;

    Ok(())
}

/// Create the peer directory, readable by the owner only
fn create_peer_directory(directory: &Path) -> Result<()> {
    let mut builder = DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }

    builder.create(directory).map_err(|e| match e.kind() {
        io::ErrorKind::AlreadyExists => AddPeerError::PeerDirectoryExists(PathBuf::from(directory)),
        _ => AddPeerError::Io(e),
    })
}

fn write_private_file(path: &Path, contents: &[u8]) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(contents)?;
    Ok(())
}
