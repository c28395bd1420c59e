use serde::Deserialize;

use crate::error::{LookupError, Result};
use crate::model::{Family, Prefix, PrefixEntry, Provider, ProviderDataset};
use crate::providers::parse_published;

pub const SERVICES_URL: &str = "https://www.gstatic.com/ipranges/goog.json";
pub const CLOUD_URL: &str = "https://www.gstatic.com/ipranges/cloud.json";

const CREATION_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Shared by `goog.json` (Google Services) and `cloud.json` (Google Cloud).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleIpRanges {
    pub sync_token: Option<String>,
    pub creation_time: Option<String>,
    pub prefixes: Vec<GooglePrefix>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GooglePrefix {
    pub ipv4_prefix: Option<String>,
    pub ipv6_prefix: Option<String>,
    pub service: Option<String>,
    pub scope: Option<String>,
}

impl GooglePrefix {
    /// A record names exactly one network; anything else breaks the published contract.
    fn prefix(&self, provider: Provider) -> Result<Prefix> {
        match (&self.ipv4_prefix, &self.ipv6_prefix) {
            (Some(v4), None) => Prefix::parse(provider, v4, Some(Family::V4)),
            (None, Some(v6)) => Prefix::parse(provider, v6, Some(Family::V6)),
            (Some(v4), Some(v6)) => Err(LookupError::ConflictingPrefixes {
                provider,
                ipv4: v4.clone(),
                ipv6: v6.clone(),
            }),
            (None, None) => Err(LookupError::MissingPrefix { provider }),
        }
    }
}

pub fn parse(provider: Provider, document: GoogleIpRanges) -> Result<ProviderDataset> {
    let entries = document
        .prefixes
        .into_iter()
        .map(|record| {
            let prefix = record.prefix(provider)?;
            Ok(PrefixEntry::new(prefix)
                .with("service", record.service)
                .with("scope", record.scope))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut dataset = ProviderDataset::new(provider, entries);
    dataset.published = parse_published(provider, document.creation_time.as_deref(), CREATION_TIME_FORMAT);
    dataset.sync_token = document.sync_token;
    Ok(dataset)
}
