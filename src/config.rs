use std::time::Duration;

use crate::model::Provider;
use crate::providers::{aws, azure, cloudflare, google};

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub struct Config {
    /// Per-request timeout, covering connect and body download.
    pub timeout: Duration,
    /// Providers to check, deduplicated and in report order.
    pub providers: Vec<Provider>,
    pub sources: Sources,
}

impl Config {
    pub fn new(timeout: Duration, mut providers: Vec<Provider>, sources: Sources) -> Self {
        if providers.is_empty() {
            providers = Provider::ALL.to_vec();
        }
        providers.sort();
        providers.dedup();
        Config {
            timeout,
            providers,
            sources,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS), Vec::new(), Sources::default())
    }
}

/// Where each provider publishes its ranges.
#[derive(Debug, Clone)]
pub struct Sources {
    pub aws: String,
    pub google_services: String,
    pub google_cloud: String,
    pub cloudflare_v4: String,
    pub cloudflare_v6: String,
    pub azure: String,
}

impl Default for Sources {
    fn default() -> Self {
        Sources {
            aws: aws::URL.to_string(),
            google_services: google::SERVICES_URL.to_string(),
            google_cloud: google::CLOUD_URL.to_string(),
            cloudflare_v4: cloudflare::IPV4_URL.to_string(),
            cloudflare_v6: cloudflare::IPV6_URL.to_string(),
            azure: azure::URL.to_string(),
        }
    }
}
