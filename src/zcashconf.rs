//! Reader for the node's own `zcash.conf`
//!
//! The file belongs to the node and is only ever read here. Only the RPC
//! connection keys are interpreted; everything else is ignored.

use crate::config::{Config, TESTNET_PORT};
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable that points at an explicit conf file
pub const CONF_ENV: &str = "ZECWALLET_ZCASH_CONF";

/// Platform location of `zcash.conf`, relative to the home directory on unix
/// and to the roaming app-data directory on Windows.
pub fn default_path() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        dirs::home_dir().map(|home| {
            home.join("Library")
                .join("Application Support")
                .join("Zcash")
                .join("zcash.conf")
        })
    }
    #[cfg(target_os = "windows")]
    {
        dirs::config_dir().map(|appdata| appdata.join("Zcash").join("zcash.conf"))
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        dirs::home_dir().map(|home| home.join(".zcash").join("zcash.conf"))
    }
}

/// Find an existing conf file, honouring [`CONF_ENV`] before the platform path.
pub fn locate() -> Option<PathBuf> {
    let candidate = match std::env::var_os(CONF_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => default_path()?,
    };

    if candidate.is_file() {
        Some(candidate)
    } else {
        debug!("No zcash.conf at {}", candidate.display());
        None
    }
}

/// Parse conf text into a connection config.
///
/// The host always comes from `defaults`. `testnet=1` only selects the testnet
/// port when no `rpcport` has been seen yet, and a missing port falls back to
/// the default one.
pub fn parse(text: &str, defaults: &Config) -> Config {
    let mut conf = Config {
        host: defaults.host.clone(),
        ..Config::default()
    };

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((name, value)) = line.split_once('=') else {
            continue;
        };
        let name = name.trim().to_lowercase();
        let value = value.trim();

        match name.as_str() {
            "rpcuser" => conf.rpcuser = value.to_string(),
            "rpcpassword" => conf.rpcpassword = value.to_string(),
            "rpcport" => conf.port = value.to_string(),
            "testnet" if value == "1" && conf.port.is_empty() => {
                conf.port = TESTNET_PORT.to_string();
            }
            _ => {}
        }
    }

    if conf.port.is_empty() {
        conf.port = defaults.port.clone();
    }

    conf
}

/// Read and parse the conf file at `path`.
pub fn load(path: &Path, defaults: &Config) -> Result<Config> {
    let text = fs::read_to_string(path)?;
    Ok(parse(&text, defaults))
}
