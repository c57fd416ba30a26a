//! nftdeck - Entry Point

use clap::Parser;
use nftdeck::config::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
    CliOverrides, ConfigError, KeyBindings, ResolvedConfig,
};
use nftdeck::pipeline::JsonlPipeline;
use nftdeck::source::{
    open_source, DisabledPreview, HttpImageVerifier, ImageChecker, MarketplacePreview, PageFetcher,
    PreviewFetcher, PreviewProvider, SourceSpec,
};
use nftdeck::state::{AppState, ViewOptions};
use nftdeck::view::{self, system_opener, ColorConfig, Services, TableStyles};
use std::path::PathBuf;
use tracing::{info, warn};

/// nftdeck - browse a wallet's NFTs and hand off transfer intents
#[derive(Parser, Debug)]
#[command(name = "nftdeck")]
#[command(version)]
#[command(about = "TUI for browsing a wallet's NFT holdings and sending them")]
pub struct Args {
    /// Collectibles gateway base URL
    #[arg(long, conflicts_with = "fixture")]
    pub gateway: Option<String>,

    /// Serve pages from a JSON fixture file instead of the gateway
    #[arg(long)]
    pub fixture: Option<PathBuf>,

    /// Chain the wallet lives on
    #[arg(long)]
    pub chain_id: Option<u64>,

    /// Wallet whose holdings are listed
    #[arg(long)]
    pub safe: Option<String>,

    /// Connected signer address
    #[arg(long)]
    pub signer: Option<String>,

    /// Show one page at a time instead of accumulating
    #[arg(long)]
    pub paginate: bool,

    /// Disable checkboxes and batch send
    #[arg(long)]
    pub no_batch: bool,

    /// Show the preview panel
    #[arg(long)]
    pub preview: bool,

    /// Start with a filter applied
    #[arg(long)]
    pub filter: Option<String>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    fn cli_overrides(&self) -> CliOverrides {
        CliOverrides {
            gateway_url: self.gateway.clone(),
            chain_id: self.chain_id,
            safe_address: self.safe.clone(),
            signer: self.signer.clone(),
            paginate: self.paginate,
            no_batch: self.no_batch,
            preview: self.preview,
        }
    }
}

/// Fixture if given, otherwise the gateway for the configured wallet.
fn source_spec(fixture: Option<PathBuf>, config: &ResolvedConfig) -> Result<SourceSpec, ConfigError> {
    if let Some(path) = fixture {
        return Ok(SourceSpec::Fixture(path));
    }
    let safe_address = config
        .safe_address
        .clone()
        .ok_or(ConfigError::MissingSafeAddress)?;
    Ok(SourceSpec::Gateway {
        base_url: config.gateway_url.clone(),
        chain_id: config.chain_id,
        safe_address,
    })
}

fn preview_provider(config: &ResolvedConfig) -> Box<dyn PreviewProvider> {
    match &config.preview_api_key {
        Some(key) => match MarketplacePreview::new(&config.preview_base_url, key.clone(), config.chain_id) {
            Ok(provider) => Box::new(provider),
            Err(err) => {
                warn!(error = %err, "Preview provider unavailable");
                Box::new(DisabledPreview)
            }
        },
        None => {
            warn!("Preview enabled without an API key");
            Box::new(DisabledPreview)
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = load_config_with_precedence(args.config.clone())?;
        let merged = merge_config(config_file);
        let with_env = apply_env_overrides(merged);
        apply_cli_overrides(with_env, args.cli_overrides())
    };

    nftdeck::logging::init(&config.log_file_path)?;
    info!(
        gateway = %config.gateway_url,
        chain_id = config.chain_id,
        pagination = config.enable_pagination,
        preview = config.enable_preview,
        "Configuration loaded and resolved"
    );

    let spec = source_spec(args.fixture.clone(), &config)?;
    let source = open_source(&spec)?;
    info!(source = %source.describe(), "Opened page source");

    let options = ViewOptions {
        enable_pagination: config.enable_pagination,
        enable_batch_select: config.enable_batch_select,
        enable_preview: config.enable_preview,
    };
    let mut state = AppState::new(options, Box::new(config.authorization()?))
        .with_address_book(config.contacts())
        .with_links(config.network_links(), config.chain_id)
        .with_owner_label(config.safe_address.clone().unwrap_or_default());
    if let Some(needle) = &args.filter {
        state = state.with_filter(needle.clone());
    }

    let previews = if config.enable_preview {
        Some(PreviewFetcher::spawn(preview_provider(&config))?)
    } else {
        None
    };
    let images = match HttpImageVerifier::new() {
        Ok(verifier) => Some(ImageChecker::spawn(Box::new(verifier))?),
        Err(err) => {
            warn!(error = %err, "Image checks unavailable");
            None
        }
    };
    let services = Services {
        fetcher: PageFetcher::spawn(source)?,
        previews,
        images,
        pipeline: Box::new(JsonlPipeline::new(config.intent_output_path.clone())),
        open_link: system_opener(),
    };
    let styles = TableStyles::with_color_config(ColorConfig::from_env_and_args(args.no_color));

    view::run(state, services, KeyBindings::default(), styles)?;
    Ok(())
}
