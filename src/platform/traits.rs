use crate::error::Result;

/// Source of WireGuard key material
///
/// Keys are opaque byte strings in whatever encoding the tool emits
/// (base64 text with a trailing newline for `wg`).
pub trait KeyTool {
    /// Generate a fresh private key
    fn generate_private_key(&self) -> Result<Vec<u8>>;

    /// Derive the public key belonging to `private_key`
    fn public_key(&self, private_key: &[u8]) -> Result<Vec<u8>>;

    /// Generate a fresh preshared key
    fn generate_preshared_key(&self) -> Result<Vec<u8>>;
}

/// Turns configuration text into something a device can scan
pub trait CodeRenderer {
    /// Render `text` for display on a terminal
    fn render(&self, text: &str) -> Result<String>;
}
