use thiserror::Error;

use crate::model::{Family, Provider};

pub type Result<T> = std::result::Result<T, LookupError>;

/// Errors raised while fetching or decoding a provider's published ranges.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Request could not be sent or the body could not be read/decoded
    #[error("{provider}: request to {url} failed: {source}")]
    Http {
        provider: Provider,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-2xx status
    #[error("{provider}: {url} returned HTTP {status}")]
    Status {
        provider: Provider,
        url: String,
        status: u16,
    },

    /// Body is not the JSON document the provider is known to publish
    #[error("{provider}: {url} returned an unexpected document: {source}")]
    Decode {
        provider: Provider,
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A published entry is not a valid network
    #[error("{provider}: invalid prefix {value:?}: {reason}")]
    InvalidPrefix {
        provider: Provider,
        value: String,
        reason: String,
    },

    /// A published entry parsed, but not in the family its field declares
    #[error("{provider}: prefix {value} is not {expected}")]
    WrongFamily {
        provider: Provider,
        value: String,
        expected: Family,
    },

    #[error("{provider}: record carries both ipv4Prefix {ipv4:?} and ipv6Prefix {ipv6:?}")]
    ConflictingPrefixes {
        provider: Provider,
        ipv4: String,
        ipv6: String,
    },

    #[error("{provider}: record carries neither ipv4Prefix nor ipv6Prefix")]
    MissingPrefix { provider: Provider },
}

impl LookupError {
    /// The document could not be retrieved in a usable shape, as opposed to
    /// a retrieved document carrying bad entries.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            LookupError::Http { .. } | LookupError::Status { .. } | LookupError::Decode { .. }
        )
    }


    pub fn provider(&self) -> Provider {
        match self {
            LookupError::Http { provider, .. }
            | LookupError::Status { provider, .. }
            | LookupError::Decode { provider, .. }
            | LookupError::InvalidPrefix { provider, .. }
            | LookupError::WrongFamily { provider, .. }
            | LookupError::ConflictingPrefixes { provider, .. }
            | LookupError::MissingPrefix { provider } => *provider,
        }
    }
}
