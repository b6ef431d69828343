pub mod scanner;
pub mod types;

pub use scanner::{parse_server_config, scan};
pub use types::{Section, ServerConfigSnapshot, DEFAULT_LISTEN_PORT};
