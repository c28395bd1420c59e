use std::net::IpAddr;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;

use cloud_ip_lookup::config::{Config, Sources, DEFAULT_TIMEOUT_SECS};
use cloud_ip_lookup::fetch::Fetcher;
use cloud_ip_lookup::{logging, matcher, Provider};

/// Checks if IP addresses exist in the published IP ranges for AWS, Google
/// Services, Google Cloud, Cloudflare or Azure.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The IP addresses to look up
    #[arg(required = true)]
    addresses: Vec<IpAddr>,

    /// Only check these providers (repeatable, default: all)
    #[arg(long, short, value_enum)]
    provider: Vec<ProviderArg>,

    /// Request timeout in seconds
    #[arg(long, short, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Azure service tag document, published under a new name every week
    #[arg(long)]
    azure_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProviderArg {
    Aws,
    GoogleServices,
    GoogleCloud,
    Cloudflare,
    Azure,
}

impl From<ProviderArg> for Provider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Aws => Provider::Aws,
            ProviderArg::GoogleServices => Provider::GoogleServices,
            ProviderArg::GoogleCloud => Provider::GoogleCloud,
            ProviderArg::Cloudflare => Provider::Cloudflare,
            ProviderArg::Azure => Provider::Azure,
        }
    }
}

impl Cli {
    fn config(&self) -> Config {
        let mut sources = Sources::default();
        if let Some(url) = &self.azure_url {
            sources.azure = url.clone();
        }
        let providers = self.provider.iter().copied().map(Provider::from).collect();
        Config::new(Duration::from_secs(self.timeout), providers, sources)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init();

    let config = cli.config();
    let fetcher = Fetcher::new(&config).context("failed to build HTTP client")?;
    let datasets = fetcher
        .load_datasets(&config.providers)
        .await
        .context("failed to load published IP ranges")?;

    let results = matcher::search_ip_addresses(&datasets, &cli.addresses);
    for result in &results {
        for found in &result.matches {
            println!("{} {}", result.address, found);
        }
        if !result.found() {
            info!("{} is not in any published range", result.address);
        }
    }

    Ok(ExitCode::from(matcher::exit_status(&results)))
}
