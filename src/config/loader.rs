//! Configuration file loading with precedence handling.

use crate::model::{
    AccountAddress, AddressBook, Contact, LinkTemplate, NetworkLinks, OwnerAuthorization,
};
use crate::source::DEFAULT_PREVIEW_BASE_URL;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Default collectibles gateway.
pub const DEFAULT_GATEWAY_URL: &str = "https://safe-client.safe.global";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A configured address is not `0x` + 40 hex digits.
    #[error("Invalid address for {field}: {value}")]
    InvalidAddress {
        /// Config key holding the address.
        field: String,
        /// Offending value.
        value: String,
    },

    /// Gateway mode needs the wallet whose holdings are listed.
    #[error("No safe address configured; pass --safe or set safe_address")]
    MissingSafeAddress,
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/nftdeck/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Collectibles gateway base URL.
    #[serde(default)]
    pub gateway_url: Option<String>,

    /// EVM chain id of the wallet.
    #[serde(default)]
    pub chain_id: Option<u64>,

    /// Wallet whose holdings are listed.
    #[serde(default)]
    pub safe_address: Option<String>,

    /// Connected signer address.
    #[serde(default)]
    pub signer: Option<String>,

    /// Owners allowed to send from the wallet.
    #[serde(default)]
    pub owners: Option<Vec<String>>,

    /// Show one page at a time instead of one growing list.
    #[serde(default)]
    pub enable_pagination: Option<bool>,

    /// Show the checkbox column and batch send.
    #[serde(default)]
    pub enable_batch_select: Option<bool>,

    /// Fetch marketplace previews for the highlighted row.
    #[serde(default)]
    pub enable_preview: Option<bool>,

    /// Marketplace API key. Previews stay disabled without one.
    #[serde(default)]
    pub preview_api_key: Option<String>,

    /// Marketplace API base URL.
    #[serde(default)]
    pub preview_base_url: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// File receiving one JSON line per transfer intent.
    #[serde(default)]
    pub intent_output_path: Option<PathBuf>,

    /// Contacts: address → display name.
    #[serde(default)]
    pub address_book: Option<BTreeMap<String, String>>,

    /// Explorer/marketplace link templates keyed by chain id.
    #[serde(default)]
    pub links: Option<BTreeMap<String, Vec<LinkSection>>>,
}

/// One link template from TOML.
///
/// ```toml
/// [[links.1]]
/// title = "OpenSea"
/// url = "https://opensea.io/assets/ethereum/{address}/{id}"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LinkSection {
    /// Column title.
    pub title: String,
    /// URL with `{address}`, `{id}` and `{chain_id}` placeholders.
    pub url: String,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Gateway base URL.
    pub gateway_url: String,
    /// Chain id.
    pub chain_id: u64,
    /// Wallet address, required for gateway mode.
    pub safe_address: Option<String>,
    /// Connected signer.
    pub signer: Option<String>,
    /// Wallet owners.
    pub owners: Vec<String>,
    /// Pagination mode.
    pub enable_pagination: bool,
    /// Batch selection.
    pub enable_batch_select: bool,
    /// Previews.
    pub enable_preview: bool,
    /// Marketplace API key.
    pub preview_api_key: Option<String>,
    /// Marketplace API base URL.
    pub preview_base_url: String,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Intent log path.
    pub intent_output_path: PathBuf,
    /// Contacts keyed by address.
    pub address_book: BTreeMap<String, String>,
    /// Link templates keyed by chain id. Empty means built-in defaults.
    pub links: BTreeMap<u64, Vec<LinkSection>>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            chain_id: 1,
            safe_address: None,
            signer: None,
            owners: Vec::new(),
            enable_pagination: false,
            enable_batch_select: true,
            enable_preview: false,
            preview_api_key: None,
            preview_base_url: DEFAULT_PREVIEW_BASE_URL.to_string(),
            log_file_path: default_log_path(),
            intent_output_path: default_intent_path(),
            address_book: BTreeMap::new(),
            links: BTreeMap::new(),
        }
    }
}

impl ResolvedConfig {
    /// Build the signer/owner check.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidAddress` for a malformed signer or owner.
    pub fn authorization(&self) -> Result<OwnerAuthorization, ConfigError> {
        let signer = self
            .signer
            .as_deref()
            .map(|raw| parse_address("signer", raw))
            .transpose()?;
        let owners = self
            .owners
            .iter()
            .map(|raw| parse_address("owners", raw))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(OwnerAuthorization::new(signer, owners))
    }

    /// Build the contact list. Malformed addresses are skipped with a warning.
    pub fn contacts(&self) -> AddressBook {
        let mut book = AddressBook::new();
        for (raw, name) in &self.address_book {
            match AccountAddress::parse(raw) {
                Ok(address) => book.insert(Contact::new(address, name.clone())),
                Err(err) => warn!(address = %raw, error = %err, "Skipping address book entry"),
            }
        }
        book
    }

    /// Link templates: built-in defaults, replaced per chain by configured ones.
    pub fn network_links(&self) -> NetworkLinks {
        let mut links = NetworkLinks::default();
        for (chain_id, sections) in &self.links {
            let templates = sections
                .iter()
                .map(|s| LinkTemplate::new(s.title.clone(), s.url.clone()))
                .collect();
            links.set(*chain_id, templates);
        }
        links
    }
}

fn parse_address(field: &str, raw: &str) -> Result<AccountAddress, ConfigError> {
    AccountAddress::parse(raw).map_err(|_| ConfigError::InvalidAddress {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/nftdeck/nftdeck.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("nftdeck").join("nftdeck.log")
    } else {
        PathBuf::from("nftdeck.log")
    }
}

/// Resolve default intent log path (`~/.local/state/nftdeck/intents.jsonl`).
pub fn default_intent_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("nftdeck").join("intents.jsonl")
    } else {
        PathBuf::from("intents.jsonl")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/nftdeck/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("nftdeck").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `NFTDECK_CONFIG` environment variable
/// 3. Default path `~/.config/nftdeck/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("NFTDECK_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `NFTDECK_GATEWAY_URL`: gateway base URL
/// - `NFTDECK_PREVIEW_API_KEY`: marketplace API key
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(url) = std::env::var("NFTDECK_GATEWAY_URL") {
        config.gateway_url = url;
    }

    if let Ok(key) = std::env::var("NFTDECK_PREVIEW_API_KEY") {
        if !key.is_empty() {
            config.preview_api_key = Some(key);
        }
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
/// Link sections under a key that is not a chain id are skipped.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let links = config
        .links
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(chain, sections)| match chain.parse::<u64>() {
            Ok(chain_id) => Some((chain_id, sections)),
            Err(_) => {
                warn!(chain = %chain, "Ignoring links for non-numeric chain id");
                None
            }
        })
        .collect();

    ResolvedConfig {
        gateway_url: config.gateway_url.unwrap_or(defaults.gateway_url),
        chain_id: config.chain_id.unwrap_or(defaults.chain_id),
        safe_address: config.safe_address.or(defaults.safe_address),
        signer: config.signer.or(defaults.signer),
        owners: config.owners.unwrap_or(defaults.owners),
        enable_pagination: config
            .enable_pagination
            .unwrap_or(defaults.enable_pagination),
        enable_batch_select: config
            .enable_batch_select
            .unwrap_or(defaults.enable_batch_select),
        enable_preview: config.enable_preview.unwrap_or(defaults.enable_preview),
        preview_api_key: config.preview_api_key.or(defaults.preview_api_key),
        preview_base_url: config
            .preview_base_url
            .unwrap_or(defaults.preview_base_url),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        intent_output_path: config
            .intent_output_path
            .unwrap_or(defaults.intent_output_path),
        address_book: config.address_book.unwrap_or_default(),
        links,
    }
}

/// Flags the user set explicitly on the command line.
///
/// `None` / `false` means "not given" and leaves the config untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--gateway`
    pub gateway_url: Option<String>,
    /// `--chain-id`
    pub chain_id: Option<u64>,
    /// `--safe`
    pub safe_address: Option<String>,
    /// `--signer`
    pub signer: Option<String>,
    /// `--paginate`
    pub paginate: bool,
    /// `--no-batch`
    pub no_batch: bool,
    /// `--preview`
    pub preview: bool,
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(url) = cli.gateway_url {
        config.gateway_url = url;
    }
    if let Some(chain_id) = cli.chain_id {
        config.chain_id = chain_id;
    }
    if let Some(safe) = cli.safe_address {
        config.safe_address = Some(safe);
    }
    if let Some(signer) = cli.signer {
        config.signer = Some(signer);
    }
    if cli.paginate {
        config.enable_pagination = true;
    }
    if cli.no_batch {
        config.enable_batch_select = false;
    }
    if cli.preview {
        config.enable_preview = true;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
