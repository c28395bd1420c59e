//! Published range documents, one module per provider.
//!
//! Each module holds the serde schema of the raw document and a `parse`
//! function turning it into a [`ProviderDataset`](crate::model::ProviderDataset).
//! Parsing is strict: one bad entry fails the whole dataset.

pub mod aws;
pub mod azure;
pub mod cloudflare;
pub mod google;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::model::Provider;

/// Parses a publication timestamp. An unreadable timestamp is not a range
/// error, so it is logged and dropped.
pub(crate) fn parse_published(provider: Provider, value: Option<&str>, format: &str) -> Option<NaiveDateTime> {
    let value = value?;
    match NaiveDateTime::parse_from_str(value, format) {
        Ok(published) => Some(published),
        Err(err) => {
            debug!("{}: ignoring publication time {:?}: {}", provider, value, err);
            None
        }
    }
}
