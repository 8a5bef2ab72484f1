#![forbid(unsafe_code)]
//! Inspect and edit the wallet's node connection settings

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color as TableColor, ContentArrangement, Table};
use serde::Serialize;
use std::path::PathBuf;
use zecwallet::address::{self, AddressKind};
use zecwallet::{format, logging, ConfLocation, Config, ConfigSource, FileStore, Settings};

#[derive(Parser)]
#[command(name = "zec-settings", version, about = "Zcash wallet connection settings")]
struct Cli {
    /// UI settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// zcash.conf to read instead of the platform location
    #[arg(long, global = true, conflicts_with = "no_conf")]
    conf: Option<PathBuf>,

    /// Ignore any zcash.conf
    #[arg(long, global = true)]
    no_conf: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the resolved node connection
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Save connection details to the UI settings
    Save {
        #[arg(long, default_value = zecwallet::config::DEFAULT_HOST)]
        host: String,
        #[arg(long, default_value = zecwallet::config::DEFAULT_PORT)]
        port: String,
        #[arg(long)]
        user: String,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Classify a shielded or transparent address
    Classify {
        address: String,
        #[arg(long)]
        testnet: bool,
    },
    /// Format a balance for display
    Format {
        amount: f64,
        /// ZEC price in USD
        #[arg(long, default_value_t = 0.0)]
        price: f64,
        #[arg(long)]
        testnet: bool,
    },
    /// Show or change whether sent shielded transactions are saved
    SaveZtxs { value: Option<Toggle> },
}

#[derive(Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

#[derive(Serialize)]
struct ConnectionReport<'a> {
    source: ConfigSource,
    endpoint: String,
    conf_location: Option<String>,
    current: &'a Config,
    defaults: &'a Config,
    ui_settings: &'a Config,
    zcash_conf: Option<&'a Config>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    let cli = Cli::parse();

    match &cli.command {
        Command::Classify { address, testnet } => {
            classify(address, *testnet);
            return Ok(());
        }
        Command::Format {
            amount,
            price,
            testnet,
        } => {
            println!("{}", format::zec_usd_display(*amount, *price, *testnet));
            return Ok(());
        }
        _ => {}
    }

    let store = match &cli.settings {
        Some(path) => FileStore::open(path)?,
        None => FileStore::open_default()?,
    };
    let conf = match (cli.no_conf, cli.conf.clone()) {
        (true, _) => ConfLocation::Disabled,
        (false, Some(path)) => ConfLocation::Fixed(path),
        (false, None) => ConfLocation::Auto,
    };
    let mut settings = Settings::init(store, conf);

    match cli.command {
        Command::Show { json } => show(&settings, json)?,
        Command::Save {
            host,
            port,
            user,
            password,
        } => {
            let password = match password {
                Some(p) => p,
                None => rpassword::prompt_password("RPC password: ")?,
            };
            settings.save_settings(&host, &port, &user, &password)?;
            println!("{} Connection settings saved", "✅".green());
            if settings.source() == ConfigSource::ZcashConf {
                println!(
                    "{}",
                    "⚠️  zcash.conf is present and still takes priority".yellow()
                );
            }
            show(&settings, false)?;
        }
        Command::SaveZtxs { value } => {
            if let Some(toggle) = value {
                settings.set_save_ztxs(matches!(toggle, Toggle::On))?;
            }
            let state = if settings.save_ztxs() {
                "on".bright_green()
            } else {
                "off".bright_red()
            };
            println!("Save sent shielded transactions: {}", state);
        }
        Command::Classify { .. } | Command::Format { .. } => {}
    }

    Ok(())
}

fn show(settings: &Settings, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let report = ConnectionReport {
            source: settings.source(),
            endpoint: settings.current().endpoint(),
            conf_location: settings.conf_location().map(|p| p.display().to_string()),
            current: settings.current(),
            defaults: settings.defaults(),
            ui_settings: settings.ui_settings(),
            zcash_conf: settings.zcash_conf(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} {}",
        "🔌 Node:".bright_cyan().bold(),
        settings.current().endpoint().bright_white(),
        format!("(from {})", settings.source()).dimmed()
    );
    if let Some(path) = settings.conf_location() {
        println!("{} {}", "📄 zcash.conf:".bright_cyan(), path.display());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Source").add_attribute(Attribute::Bold),
            Cell::new("Host").add_attribute(Attribute::Bold),
            Cell::new("Port").add_attribute(Attribute::Bold),
            Cell::new("RPC user").add_attribute(Attribute::Bold),
            Cell::new("RPC password").add_attribute(Attribute::Bold),
        ]);

    let rows = [
        (ConfigSource::ZcashConf, settings.zcash_conf()),
        (ConfigSource::UiSettings, Some(settings.ui_settings())),
        (ConfigSource::Defaults, Some(settings.defaults())),
    ];
    for (source, config) in rows {
        let Some(config) = config else {
            table.add_row(vec![
                Cell::new(source).fg(TableColor::DarkGrey),
                Cell::new("not found"),
            ]);
            continue;
        };
        let color = if source == settings.source() {
            TableColor::Green
        } else {
            TableColor::White
        };
        table.add_row(vec![
            Cell::new(source).fg(color),
            Cell::new(&config.host),
            Cell::new(&config.port),
            Cell::new(&config.rpcuser),
            Cell::new(mask(&config.rpcpassword)),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn classify(addr: &str, testnet: bool) {
    let kind = address::classify(addr, testnet);
    let label = match kind {
        AddressKind::Sapling => kind.to_string().bright_green(),
        AddressKind::Sprout => kind.to_string().yellow(),
        AddressKind::Transparent => kind.to_string().bright_white(),
    };
    let network = if testnet { "testnet" } else { "mainnet" };
    println!("{} ({})", label, network.dimmed());
}

fn mask(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        "*".repeat(secret.chars().count().min(12))
    }
}
