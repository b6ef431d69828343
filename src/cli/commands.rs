use crate::cli::Cli;
use crate::error::Result;
use crate::peer::provision;
use crate::platform::{QrencodeRenderer, WgKeyTool};

/// Provision the peer named on the command line
pub fn cmd_add_peer(cli: &Cli) -> Result<()> {
    let options = cli.provision_options();
    let keys = WgKeyTool::new(cli.wg.as_str());
    let renderer = QrencodeRenderer::new(cli.qrencode.as_str());

    let peer = provision(&cli.config, &cli.device, &options, &keys, &renderer)?;

    tracing::info!(
        "Peer {} provisioned with address {} in {}",
        cli.device,
        peer.address,
        peer.directory.display()
    );

    if let Some(code) = peer.qr_code {
        println!("{}", code);
    }

    Ok(())
}
