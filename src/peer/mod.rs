pub mod allocator;
pub mod provision;
pub mod template;
pub mod types;

pub use allocator::allocate;
pub use provision::provision;
pub use template::{server_peer_stanza, PeerConfigTemplate, ROUTE_ALL};
pub use types::{PeerMaterial, ProvisionOptions, ProvisionedPeer, DEFAULT_KEEPALIVE};
