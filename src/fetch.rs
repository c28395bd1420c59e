use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::config::{Config, Sources};
use crate::error::{LookupError, Result};
use crate::model::{Provider, ProviderDataset};
use crate::providers::{aws, azure, cloudflare, google};

/// Downloads and parses provider documents. Cloning shares the connection pool.
#[derive(Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    sources: Arc<Sources>,
}

impl Fetcher {
    pub fn new(config: &Config) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Fetcher {
            client,
            sources: Arc::new(config.sources.clone()),
        })
    }

    async fn get_text(&self, provider: Provider, url: &str) -> Result<String> {
        let http_error = |source| LookupError::Http {
            provider,
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(http_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                provider,
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(http_error)
    }

    async fn get_json<T: DeserializeOwned>(&self, provider: Provider, url: &str) -> Result<T> {
        let body = self.get_text(provider, url).await?;
        serde_json::from_str(&body).map_err(|source| LookupError::Decode {
            provider,
            url: url.to_string(),
            source,
        })
    }

    /// Fetches and parses one provider's published ranges.
    pub async fn fetch(&self, provider: Provider) -> Result<ProviderDataset> {
        let sources = &self.sources;
        match provider {
            Provider::Aws => aws::parse(self.get_json(provider, &sources.aws).await?),
            Provider::GoogleServices => {
                google::parse(provider, self.get_json(provider, &sources.google_services).await?)
            }
            Provider::GoogleCloud => {
                google::parse(provider, self.get_json(provider, &sources.google_cloud).await?)
            }
            Provider::Cloudflare => {
                let ipv4_list = self.get_text(provider, &sources.cloudflare_v4).await?;
                let ipv6_list = self.get_text(provider, &sources.cloudflare_v6).await?;
                cloudflare::parse(&ipv4_list, &ipv6_list)
            }
            Provider::Azure => azure::parse(self.get_json(provider, &sources.azure).await?),
        }
    }

    /// Fetches every provider concurrently and returns the datasets in provider order.
    ///
    /// An optional provider whose document can't be downloaded is logged and
    /// left out. Bad entries inside a downloaded document are fatal for every
    /// provider; they abort the remaining downloads and are returned.
    pub async fn load_datasets(&self, providers: &[Provider]) -> Result<Vec<ProviderDataset>> {
        let mut tasks = JoinSet::new();
        for &provider in providers {
            let fetcher = self.clone();
            tasks.spawn(async move { (provider, fetcher.fetch(provider).await) });
        }

        let mut datasets = Vec::with_capacity(providers.len());
        while let Some(joined) = tasks.join_next().await {
            let (provider, result) = match joined {
                Ok(outcome) => outcome,
                Err(err) => std::panic::resume_unwind(err.into_panic()),
            };
            match result {
                Ok(dataset) => {
                    debug!(
                        "{}: loaded {} prefixes (sync token {:?}, published {:?})",
                        provider,
                        dataset.entries.len(),
                        dataset.sync_token,
                        dataset.published
                    );
                    datasets.push(dataset);
                }
                Err(err) if provider.is_optional() && err.is_fetch_failure() => {
                    warn!("skipping {}: {}", err.provider(), err);
                }
                Err(err) => return Err(err),
            }
        }

        datasets.sort_by_key(|dataset| dataset.provider);
        Ok(datasets)
    }
}
