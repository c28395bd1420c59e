use std::fmt;
use std::net::IpAddr;

use chrono::NaiveDateTime;
use ip_network::{IpNetwork, Ipv4Network, Ipv6Network};

use crate::error::{LookupError, Result};

/// Publishers of IP range documents, in the order they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Provider {
    Aws,
    GoogleServices,
    GoogleCloud,
    Cloudflare,
    Azure,
}

impl Provider {
    pub const ALL: [Provider; 5] = [
        Provider::Aws,
        Provider::GoogleServices,
        Provider::GoogleCloud,
        Provider::Cloudflare,
        Provider::Azure,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Provider::Aws => "AWS",
            Provider::GoogleServices => "Google Services",
            Provider::GoogleCloud => "Google Cloud",
            Provider::Cloudflare => "Cloudflare",
            Provider::Azure => "Azure",
        }
    }

    /// Optional providers are skipped with a warning when their data can't be loaded.
    pub fn is_optional(self) -> bool {
        matches!(self, Provider::Azure)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    V4,
    V6,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::V4 => f.write_str("IPv4"),
            Family::V6 => f.write_str("IPv6"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    V4(Ipv4Network),
    V6(Ipv6Network),
}

impl Prefix {
    /// Parses `value` as a network published by `provider`.
    ///
    /// When `expected` is set the network must belong to that family, otherwise
    /// the family is taken from the notation. Host bits past the mask are rejected.
    pub fn parse(provider: Provider, value: &str, expected: Option<Family>) -> Result<Prefix> {
        let network = value
            .parse::<IpNetwork>()
            .map_err(|err| LookupError::InvalidPrefix {
                provider,
                value: value.to_string(),
                reason: err.to_string(),
            })?;

        let prefix = match network {
            IpNetwork::V4(network) => Prefix::V4(network),
            IpNetwork::V6(network) => Prefix::V6(network),
        };

        match expected {
            Some(family) if family != prefix.family() => Err(LookupError::WrongFamily {
                provider,
                value: value.to_string(),
                expected: family,
            }),
            _ => Ok(prefix),
        }
    }

    pub fn family(&self) -> Family {
        match self {
            Prefix::V4(_) => Family::V4,
            Prefix::V6(_) => Family::V6,
        }
    }

    /// Mismatched families never contain each other.
    pub fn contains(&self, address: IpAddr) -> bool {
        match (self, address) {
            (Prefix::V4(network), IpAddr::V4(address)) => network.contains(address),
            (Prefix::V6(network), IpAddr::V6(address)) => network.contains(address),
            _ => false,
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prefix::V4(network) => fmt::Display::fmt(network, f),
            Prefix::V6(network) => fmt::Display::fmt(network, f),
        }
    }
}

/// Descriptive fields published alongside a prefix, e.g. `("region", "us-east-1")`.
pub type Metadata = Vec<(&'static str, String)>;

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixEntry {
    pub prefix: Prefix,
    pub metadata: Metadata,
}

impl PrefixEntry {
    pub fn new(prefix: Prefix) -> Self {
        PrefixEntry {
            prefix,
            metadata: Vec::new(),
        }
    }

    /// Adds `key=value` to the metadata when the document published a non-empty value.
    pub fn with(mut self, key: &'static str, value: Option<String>) -> Self {
        if let Some(value) = value.filter(|value| !value.is_empty()) {
            self.metadata.push((key, value));
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderDataset {
    pub provider: Provider,
    pub sync_token: Option<String>,
    pub published: Option<NaiveDateTime>,
    pub entries: Vec<PrefixEntry>,
}

impl ProviderDataset {
    pub fn new(provider: Provider, entries: Vec<PrefixEntry>) -> Self {
        ProviderDataset {
            provider,
            sync_token: None,
            published: None,
            entries,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub provider: Provider,
    pub prefix: Prefix,
    pub metadata: Metadata,
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.provider, self.prefix)?;
        for (key, value) in &self.metadata {
            write!(f, " {}={}", key, value)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub address: IpAddr,
    pub matches: Vec<Match>,
}

impl MatchResult {
    pub fn found(&self) -> bool {
        !self.matches.is_empty()
    }
}
