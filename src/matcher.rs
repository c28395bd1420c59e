use std::net::IpAddr;

use crate::model::{Match, MatchResult, ProviderDataset};

/// Every prefix of `dataset` containing `address`, in dataset order.
pub fn check(dataset: &ProviderDataset, address: IpAddr) -> Vec<Match> {
    dataset
        .entries
        .iter()
        .filter(|entry| entry.prefix.contains(address))
        .map(|entry| Match {
            provider: dataset.provider,
            prefix: entry.prefix,
            metadata: entry.metadata.clone(),
        })
        .collect()
}

pub fn lookup(datasets: &[ProviderDataset], address: IpAddr) -> MatchResult {
    MatchResult {
        address,
        matches: datasets
            .iter()
            .flat_map(|dataset| check(dataset, address))
            .collect(),
    }
}

pub fn search_ip_addresses(datasets: &[ProviderDataset], addresses: &[IpAddr]) -> Vec<MatchResult> {
    addresses
        .iter()
        .map(|&address| lookup(datasets, address))
        .collect()
}

pub fn all_found(results: &[MatchResult]) -> bool {
    results.iter().all(MatchResult::found)
}

/// 0 when every address was found in at least one provider, 1 otherwise.
pub fn exit_status(results: &[MatchResult]) -> u8 {
    if all_found(results) {
        0
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Prefix, PrefixEntry, Provider};

    fn dataset(provider: Provider, prefixes: &[&str]) -> ProviderDataset {
        let entries = prefixes
            .iter()
            .map(|p| PrefixEntry::new(Prefix::parse(provider, p, None).unwrap()))
            .collect();
        ProviderDataset::new(provider, entries)
    }

    #[test]
    fn collects_every_overlapping_prefix() {
        let aws = dataset(Provider::Aws, &["10.0.0.0/8", "172.16.0.0/12", "10.1.0.0/16", "10.1.2.0/24"]);
        let matches = check(&aws, "10.1.2.3".parse().unwrap());
        let prefixes: Vec<_> = matches.iter().map(|m| m.prefix.to_string()).collect();
        assert_eq!(prefixes, vec!["10.0.0.0/8", "10.1.0.0/16", "10.1.2.0/24"]);
    }

    #[test]
    fn duplicate_prefixes_match_once_each() {
        let aws = dataset(Provider::Aws, &["10.0.0.0/8", "10.0.0.0/8"]);
        assert_eq!(check(&aws, "10.9.9.9".parse().unwrap()).len(), 2);
    }

    #[test]
    fn families_never_cross() {
        let mixed = dataset(Provider::Cloudflare, &["0.0.0.0/0", "::/0"]);
        let v4 = check(&mixed, "192.0.2.1".parse().unwrap());
        let v6 = check(&mixed, "2001:db8::1".parse().unwrap());
        assert_eq!(v4.len(), 1);
        assert_eq!(v4[0].prefix.to_string(), "0.0.0.0/0");
        assert_eq!(v6.len(), 1);
        assert_eq!(v6[0].prefix.to_string(), "::/0");
    }

    #[test]
    fn lookup_spans_providers() {
        let datasets = vec![
            dataset(Provider::Aws, &["10.0.0.0/8"]),
            dataset(Provider::GoogleCloud, &["192.168.0.0/16"]),
            dataset(Provider::Cloudflare, &["10.1.0.0/16"]),
        ];
        let result = lookup(&datasets, "10.1.2.3".parse().unwrap());
        assert!(result.found());
        let providers: Vec<_> = result.matches.iter().map(|m| m.provider).collect();
        assert_eq!(providers, vec![Provider::Aws, Provider::Cloudflare]);
    }

    #[test]
    fn exit_status_requires_every_address() {
        let datasets = vec![dataset(Provider::Aws, &["10.0.0.0/8"])];
        let one = search_ip_addresses(&datasets, &["10.0.0.1".parse().unwrap()]);
        let both = search_ip_addresses(
            &datasets,
            &["10.0.0.1".parse().unwrap(), "192.168.1.1".parse().unwrap()],
        );
        assert_eq!(exit_status(&one), 0);
        assert_eq!(exit_status(&both), 1);
        assert!(both[0].found());
        assert!(!both[1].found());
    }

    #[test]
    fn empty_datasets_find_nothing() {
        let results = search_ip_addresses(&[], &["10.0.0.1".parse().unwrap()]);
        assert!(!all_found(&results));
    }
}
