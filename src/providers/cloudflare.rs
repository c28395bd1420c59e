use crate::error::Result;
use crate::model::{Family, Prefix, PrefixEntry, Provider, ProviderDataset};

pub const IPV4_URL: &str = "https://www.cloudflare.com/ips-v4";
pub const IPV6_URL: &str = "https://www.cloudflare.com/ips-v6";

/// Concatenates the two line lists, v4 first. Blank lines are skipped.
pub fn parse(ipv4_list: &str, ipv6_list: &str) -> Result<ProviderDataset> {
    let mut entries = Vec::new();
    for (list, family) in [(ipv4_list, Family::V4), (ipv6_list, Family::V6)] {
        for line in list.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let prefix = Prefix::parse(Provider::Cloudflare, line, Some(family))?;
            entries.push(PrefixEntry::new(prefix));
        }
    }
    Ok(ProviderDataset::new(Provider::Cloudflare, entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookupError;

    #[test]
    fn v4_list_precedes_v6_list() {
        let dataset = parse("173.245.48.0/20\n103.21.244.0/22\n", "2400:cb00::/32\n").unwrap();
        let prefixes: Vec<_> = dataset.entries.iter().map(|e| e.prefix.to_string()).collect();
        assert_eq!(prefixes, vec!["173.245.48.0/20", "103.21.244.0/22", "2400:cb00::/32"]);
    }

    #[test]
    fn blank_lines_and_crlf_are_tolerated() {
        let dataset = parse("173.245.48.0/20\r\n\r\n", "\n2400:cb00::/32").unwrap();
        assert_eq!(dataset.entries.len(), 2);
    }

    #[test]
    fn garbage_line_fails_dataset() {
        let err = parse("173.245.48.0/20\n<html>\n", "").unwrap_err();
        assert!(matches!(err, LookupError::InvalidPrefix { provider: Provider::Cloudflare, .. }));
    }

    #[test]
    fn list_family_is_enforced() {
        let err = parse("2400:cb00::/32", "").unwrap_err();
        assert!(matches!(err, LookupError::WrongFamily { expected: Family::V4, .. }));
    }
}
