// Configuration module
// Builds the immutable server configuration from the command line

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Port used when no argument is given
pub const DEFAULT_PORT: u16 = 8000;

/// Immutable server configuration, built once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory tree served over HTTP
    pub root: PathBuf,
}

impl ServerConfig {
    pub fn new(port: u16, root: impl Into<PathBuf>) -> Self {
        Self {
            port,
            root: root.into(),
        }
    }

    /// Load configuration from command-line arguments (program name excluded).
    ///
    /// Only the first argument is considered; anything after it is ignored.
    /// The serving root is the directory containing the running executable.
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let port = match args.into_iter().next() {
            Some(arg) => parse_port(arg.as_ref())?,
            None => DEFAULT_PORT,
        };

        Ok(Self::new(port, executable_dir()?))
    }

    /// Listen on all IPv4 interfaces
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(std::net::IpAddr::V4(Ipv4Addr::UNSPECIFIED), self.port)
    }
}

/// Parse a port argument, rejecting zero and anything outside `u16`
pub fn parse_port(value: &str) -> Result<u16, ConfigError> {
    match value.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ConfigError::InvalidPort(value.to_string())),
    }
}

fn executable_dir() -> Result<PathBuf, ConfigError> {
    let exe = std::env::current_exe().map_err(ConfigError::Root)?;
    let exe = exe.canonicalize().map_err(ConfigError::Root)?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        ConfigError::Root(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "executable has no parent directory",
        ))
    })
}
