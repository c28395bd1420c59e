use serde::Deserialize;

use crate::error::Result;
use crate::model::{Prefix, PrefixEntry, Provider, ProviderDataset};

/// Microsoft republishes the service tag file under a new dated name every
/// week, so this default goes stale; override it with `--azure-url`.
pub const URL: &str = "https://download.microsoft.com/download/7/1/D/71D86715-5596-4529-9B13-DA13A5DE5B63/ServiceTags_Public_20240318.json";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureServiceTags {
    pub change_number: Option<u64>,
    pub values: Vec<AzureServiceTag>,
}

#[derive(Debug, Deserialize)]
pub struct AzureServiceTag {
    pub name: Option<String>,
    pub properties: AzureServiceTagProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureServiceTagProperties {
    pub region: Option<String>,
    pub region_id: Option<u32>,
    pub platform: Option<String>,
    pub system_service: Option<String>,
    #[serde(default)]
    pub address_prefixes: Vec<String>,
}

/// Every prefix of a service tag carries that tag's descriptive fields.
pub fn parse(document: AzureServiceTags) -> Result<ProviderDataset> {
    let mut entries = Vec::new();
    for tag in document.values {
        let properties = tag.properties;
        for value in &properties.address_prefixes {
            let prefix = Prefix::parse(Provider::Azure, value, None)?;
            entries.push(
                PrefixEntry::new(prefix)
                    .with("name", tag.name.clone())
                    .with("platform", properties.platform.clone())
                    .with("systemService", properties.system_service.clone())
                    .with("region", properties.region.clone())
                    .with("regionId", properties.region_id.map(|id| id.to_string())),
            );
        }
    }

    let mut dataset = ProviderDataset::new(Provider::Azure, entries);
    dataset.sync_token = document.change_number.map(|change| change.to_string());
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookupError;

    const SAMPLE: &str = r#"{
        "changeNumber": 283,
        "cloud": "Public",
        "values": [
            {
                "name": "AzureFrontDoor.Frontend.WestEurope",
                "id": "AzureFrontDoor.Frontend.WestEurope",
                "properties": {
                    "changeNumber": 4,
                    "region": "westeurope",
                    "regionId": 18,
                    "platform": "Azure",
                    "systemService": "AzureFrontDoor",
                    "addressPrefixes": ["13.73.248.8/29", "2603:1020:200::/46"],
                    "networkFeatures": ["API", "NSG"]
                }
            },
            {
                "name": "ActionGroup",
                "id": "ActionGroup",
                "properties": {
                    "changeNumber": 9,
                    "region": "",
                    "regionId": 0,
                    "platform": "Azure",
                    "systemService": "ActionGroup",
                    "addressPrefixes": ["4.145.74.52/30"]
                }
            }
        ]
    }"#;

    #[test]
    fn flattens_tags_with_metadata() {
        let dataset = parse(serde_json::from_str(SAMPLE).unwrap()).unwrap();
        assert_eq!(dataset.provider, Provider::Azure);
        assert_eq!(dataset.sync_token.as_deref(), Some("283"));
        assert_eq!(dataset.entries.len(), 3);
        assert_eq!(dataset.entries[1].prefix.to_string(), "2603:1020:200::/46");
        assert_eq!(
            dataset.entries[0].metadata,
            vec![
                ("name", "AzureFrontDoor.Frontend.WestEurope".to_string()),
                ("platform", "Azure".to_string()),
                ("systemService", "AzureFrontDoor".to_string()),
                ("region", "westeurope".to_string()),
                ("regionId", "18".to_string()),
            ]
        );
        // empty region is not echoed
        assert!(dataset.entries[2].metadata.iter().all(|(key, _)| *key != "region"));
    }

    #[test]
    fn malformed_prefix_fails_dataset() {
        let document = r#"{"values":[{"name":"x","properties":{"addressPrefixes":["300.0.0.0/8"]}}]}"#;
        let err = parse(serde_json::from_str(document).unwrap()).unwrap_err();
        assert!(matches!(err, LookupError::InvalidPrefix { provider: Provider::Azure, .. }));
    }
}
