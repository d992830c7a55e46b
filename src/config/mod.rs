pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "listing-form")]
#[command(about = "Validate and submit a listing draft through the ad form rules")]
pub struct CliConfig {
    /// Path to the TOML form configuration
    #[arg(short, long)]
    pub config: Option<String>,

    /// Path to the TOML listing draft
    #[arg(short, long, default_value = "listing.toml")]
    pub draft: String,

    /// Override transport.endpoint from the configuration
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Validate only, do not submit
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}
