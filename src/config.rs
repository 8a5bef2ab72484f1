//! Node connection parameters

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: &str = "8232";
pub const TESTNET_PORT: &str = "18232";

/// Endpoint and credentials used to reach the full node over RPC.
///
/// Values are kept as the strings they were read as; an empty string means
/// the source did not provide the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: String,
    pub rpcuser: String,
    pub rpcpassword: String,
}

impl Config {
    pub fn new(
        host: impl Into<String>,
        port: impl Into<String>,
        rpcuser: impl Into<String>,
        rpcpassword: impl Into<String>,
    ) -> Self {
        Config {
            host: host.into(),
            port: port.into(),
            rpcuser: rpcuser.into(),
            rpcpassword: rpcpassword.into(),
        }
    }

    /// Local node on the mainnet RPC port, no credentials
    pub fn defaults() -> Self {
        Config::new(DEFAULT_HOST, DEFAULT_PORT, "", "")
    }

    /// `user:password`, as sent in the RPC basic-auth header
    pub fn username_password(&self) -> String {
        format!("{}:{}", self.rpcuser, self.rpcpassword)
    }

    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which of the three sources the active config came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSource {
    Defaults,
    UiSettings,
    ZcashConf,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigSource::Defaults => write!(f, "defaults"),
            ConfigSource::UiSettings => write!(f, "UI settings"),
            ConfigSource::ZcashConf => write!(f, "zcash.conf"),
        }
    }
}
