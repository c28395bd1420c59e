//! Checks whether IP addresses belong to the ranges that AWS, Google,
//! Cloudflare and Azure publish for their networks.

pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod matcher;
pub mod model;
pub mod providers;

pub use error::{LookupError, Result};
pub use model::{Match, MatchResult, Prefix, PrefixEntry, Provider, ProviderDataset};
