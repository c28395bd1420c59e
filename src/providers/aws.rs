use serde::Deserialize;

use crate::error::Result;
use crate::model::{Family, Prefix, PrefixEntry, Provider, ProviderDataset};
use crate::providers::parse_published;

pub const URL: &str = "https://ip-ranges.amazonaws.com/ip-ranges.json";

const CREATE_DATE_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

#[derive(Debug, Deserialize)]
pub struct AwsIpRanges {
    #[serde(rename = "syncToken")]
    pub sync_token: Option<String>,
    #[serde(rename = "createDate")]
    pub create_date: Option<String>,
    pub prefixes: Vec<AwsPrefix>,
    #[serde(default)]
    pub ipv6_prefixes: Vec<AwsIpv6Prefix>,
}

#[derive(Debug, Deserialize)]
pub struct AwsPrefix {
    pub ip_prefix: String,
    pub region: Option<String>,
    pub service: Option<String>,
    pub network_border_group: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AwsIpv6Prefix {
    pub ipv6_prefix: String,
    pub region: Option<String>,
    pub service: Option<String>,
    pub network_border_group: Option<String>,
}

/// `prefixes` come first, then `ipv6_prefixes`. The same network appears once
/// per service using it, so duplicates are kept.
pub fn parse(document: AwsIpRanges) -> Result<ProviderDataset> {
    let mut entries = Vec::with_capacity(document.prefixes.len() + document.ipv6_prefixes.len());

    for record in document.prefixes {
        let prefix = Prefix::parse(Provider::Aws, &record.ip_prefix, None)?;
        entries.push(
            PrefixEntry::new(prefix)
                .with("region", record.region)
                .with("service", record.service)
                .with("network_border_group", record.network_border_group),
        );
    }

    for record in document.ipv6_prefixes {
        let prefix = Prefix::parse(Provider::Aws, &record.ipv6_prefix, Some(Family::V6))?;
        entries.push(
            PrefixEntry::new(prefix)
                .with("region", record.region)
                .with("service", record.service)
                .with("network_border_group", record.network_border_group),
        );
    }

    let mut dataset = ProviderDataset::new(Provider::Aws, entries);
    dataset.published = parse_published(Provider::Aws, document.create_date.as_deref(), CREATE_DATE_FORMAT);
    dataset.sync_token = document.sync_token;
    Ok(dataset)
}
