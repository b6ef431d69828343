use std::io;
use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AddPeerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Allocation error: {0}")]
    Allocation(#[from] AllocationError),

    #[error("Folder {} already exists", .0.display())]
    PeerDirectoryExists(PathBuf),

    #[error("Endpoint for server could not be determined")]
    EndpointUnresolved,

    #[error("External tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl AddPeerError {
    /// Process exit status reported for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            AddPeerError::Config(ConfigError::MalformedLine { .. }) => 1,
            AddPeerError::Config(ConfigError::MissingInterfaceAddress) => 2,
            AddPeerError::Config(ConfigError::MissingPrivateKey) => 3,
            AddPeerError::Allocation(AllocationError::SubnetExhausted { .. }) => 4,
            AddPeerError::PeerDirectoryExists(_) => 5,
            AddPeerError::EndpointUnresolved => 6,
            AddPeerError::Config(ConfigError::File(_))
            | AddPeerError::Tool(_)
            | AddPeerError::Io(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Incorrect key/value format on line {line_no}: {line}")]
    MalformedLine { line_no: usize, line: String },

    #[error("No address found in section [Interface]")]
    MissingInterfaceAddress,

    #[error("No private key found in section [Interface]")]
    MissingPrivateKey,

    #[error("File error: {0}")]
    File(#[from] io::Error),
}

#[derive(Error, Debug)]
pub enum AllocationError {
    #[error("next available address after {interface} would be > 255")]
    SubnetExhausted { interface: Ipv4Addr },
}

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("{program} produced no output")]
    EmptyOutput { program: String },

    #[error("Pipe error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, AddPeerError>;
