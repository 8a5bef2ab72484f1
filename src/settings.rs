//! Connection settings resolution and wallet session state
//!
//! Three configurations are considered, in priority order:
//!
//! 1. the node's `zcash.conf`, when one was found and could be read;
//! 2. the wallet's saved UI settings, when they name an RPC user;
//! 3. the built-in defaults.
//!
//! Saving new UI settings re-runs the resolution, so a present `zcash.conf`
//! keeps winning over anything entered in the wallet.

use crate::address;
use crate::config::{Config, ConfigSource};
use crate::error::Result;
use crate::format;
use crate::store::{
    FileStore, SettingsStore, KEY_HOST, KEY_PORT, KEY_RPCPASSWORD, KEY_RPCUSER, KEY_SAVE_SENT_TX,
};
use crate::zcashconf;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

static INSTANCE: OnceCell<RwLock<Settings>> = OnceCell::new();

/// Where to look for `zcash.conf` each time the settings are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfLocation {
    /// Search the platform location (and [`zcashconf::CONF_ENV`]) on every
    /// reload, so a conf file created or removed later is noticed.
    Auto,
    Fixed(PathBuf),
    Disabled,
}

/// State learned from the node while the wallet runs. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Session {
    pub testnet: bool,
    pub syncing: bool,
    pub block_number: u32,
    pub zec_price: f64,
}

pub struct Settings {
    store: Box<dyn SettingsStore>,
    conf_mode: ConfLocation,
    conf_location: Option<PathBuf>,
    defaults: Config,
    uisettings: Config,
    zcashconf: Option<Config>,
    source: ConfigSource,
    session: Session,
}

impl Settings {
    /// Resolve the active config from `store` and the conf file found
    /// through `conf`.
    pub fn init(store: impl SettingsStore + 'static, conf: ConfLocation) -> Self {
        let mut settings = Settings {
            store: Box::new(store),
            conf_mode: conf,
            conf_location: None,
            defaults: Config::defaults(),
            uisettings: Config::default(),
            zcashconf: None,
            source: ConfigSource::Defaults,
            session: Session::default(),
        };
        settings.reload();
        settings
    }

    /// Settings backed by the default settings file and the platform's
    /// `zcash.conf`.
    pub fn init_default() -> Result<Self> {
        let store = FileStore::open_default()?;
        debug!("Using settings file {}", store.path().display());
        Ok(Self::init(store, ConfLocation::Auto))
    }

    /// Re-read both sources and pick the active config again. Session state
    /// is kept.
    pub fn reload(&mut self) {
        let settings_found = self.load_from_settings();
        let conf_found = self.load_from_file();

        self.source = if conf_found {
            ConfigSource::ZcashConf
        } else if settings_found {
            ConfigSource::UiSettings
        } else {
            ConfigSource::Defaults
        };

        info!(
            "Using node at {} (from {})",
            self.current().endpoint(),
            self.source
        );
    }

    /// UI settings only count as found when they carry an RPC user.
    fn load_from_settings(&mut self) -> bool {
        self.uisettings = Config {
            host: self.store.get_or_empty(KEY_HOST),
            port: self.store.get_or_empty(KEY_PORT),
            rpcuser: self.store.get_or_empty(KEY_RPCUSER),
            rpcpassword: self.store.get_or_empty(KEY_RPCPASSWORD),
        };
        !self.uisettings.rpcuser.is_empty()
    }

    fn load_from_file(&mut self) -> bool {
        self.zcashconf = None;
        self.conf_location = None;

        let candidate = match &self.conf_mode {
            ConfLocation::Auto => zcashconf::locate(),
            ConfLocation::Fixed(path) => Some(path.clone()),
            ConfLocation::Disabled => None,
        };
        let Some(path) = candidate else {
            debug!("No zcash.conf location, skipping");
            return false;
        };

        match zcashconf::load(&path, &self.defaults) {
            Ok(conf) => {
                debug!("Loaded zcash.conf from {}", path.display());
                self.zcashconf = Some(conf);
                self.conf_location = Some(path);
                true
            }
            Err(e) => {
                debug!("Could not read {}: {}", path.display(), e);
                false
            }
        }
    }

    /// The config chosen by the last resolution
    pub fn current(&self) -> &Config {
        match self.source {
            ConfigSource::ZcashConf => self.zcashconf.as_ref().unwrap_or(&self.defaults),
            ConfigSource::UiSettings => &self.uisettings,
            ConfigSource::Defaults => &self.defaults,
        }
    }

    pub fn source(&self) -> ConfigSource {
        self.source
    }

    pub fn defaults(&self) -> &Config {
        &self.defaults
    }

    pub fn ui_settings(&self) -> &Config {
        &self.uisettings
    }

    pub fn zcash_conf(&self) -> Option<&Config> {
        self.zcashconf.as_ref()
    }

    /// Path of the conf file used by the last resolution, if one was read
    pub fn conf_location(&self) -> Option<&Path> {
        self.conf_location.as_deref()
    }

    pub fn host(&self) -> &str {
        &self.current().host
    }

    pub fn port(&self) -> &str {
        &self.current().port
    }

    pub fn username_password(&self) -> String {
        self.current().username_password()
    }

    /// Persist connection details entered in the wallet, then resolve again.
    ///
    /// The resolution is redone even when the store fails to sync, so the
    /// active config always reflects what the store holds.
    pub fn save_settings(
        &mut self,
        host: &str,
        port: &str,
        username: &str,
        password: &str,
    ) -> Result<()> {
        self.store.set(KEY_HOST, host);
        self.store.set(KEY_PORT, port);
        self.store.set(KEY_RPCUSER, username);
        self.store.set(KEY_RPCPASSWORD, password);
        let synced = self.store.sync();
        self.reload();
        synced?;

        info!("Saved connection settings for {}:{}", host, port);
        Ok(())
    }

    /// Whether sent shielded transactions are recorded locally. Defaults to on.
    pub fn save_ztxs(&self) -> bool {
        self.store.get_bool(KEY_SAVE_SENT_TX, true)
    }

    pub fn set_save_ztxs(&mut self, save: bool) -> Result<()> {
        self.store
            .set(KEY_SAVE_SENT_TX, if save { "true" } else { "false" });
        self.store.sync()
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn is_testnet(&self) -> bool {
        self.session.testnet
    }

    pub fn set_testnet(&mut self, testnet: bool) {
        self.session.testnet = testnet;
    }

    pub fn is_syncing(&self) -> bool {
        self.session.syncing
    }

    pub fn set_syncing(&mut self, syncing: bool) {
        self.session.syncing = syncing;
    }

    pub fn block_number(&self) -> u32 {
        self.session.block_number
    }

    pub fn set_block_number(&mut self, number: u32) {
        self.session.block_number = number;
    }

    pub fn zec_price(&self) -> f64 {
        self.session.zec_price
    }

    pub fn set_zec_price(&mut self, price: f64) {
        self.session.zec_price = price;
    }

    pub fn is_z_address(&self, addr: &str) -> bool {
        address::is_z_address(addr)
    }

    pub fn is_sapling_address(&self, addr: &str) -> bool {
        address::is_sapling_address(addr, self.is_testnet())
    }

    pub fn is_sprout_address(&self, addr: &str) -> bool {
        address::is_sprout_address(addr, self.is_testnet())
    }

    pub fn is_sapling_active(&self) -> bool {
        address::is_sapling_active(self.block_number(), self.is_testnet())
    }

    pub fn token_name(&self) -> &'static str {
        format::token_name(self.is_testnet())
    }

    pub fn usd_format(&self, balance: f64) -> Option<String> {
        format::usd_display(balance, self.zec_price(), self.is_testnet())
    }

    pub fn zec_display_format(&self, balance: f64) -> String {
        format::zec_display(balance, self.is_testnet())
    }

    pub fn zec_usd_display_format(&self, balance: f64) -> String {
        format::zec_usd_display(balance, self.zec_price(), self.is_testnet())
    }

    /// Make these settings the process-wide instance.
    ///
    /// Installing again replaces the previous instance in place, so handles
    /// returned earlier see the new settings.
    pub fn install(self) -> &'static RwLock<Settings> {
        match INSTANCE.try_insert(RwLock::new(self)) {
            Ok(lock) => lock,
            Err((lock, settings)) => {
                *lock.write() = settings.into_inner();
                lock
            }
        }
    }

    /// The installed instance, if [`Settings::install`] has been called
    pub fn instance() -> Option<&'static RwLock<Settings>> {
        INSTANCE.get()
    }
}
