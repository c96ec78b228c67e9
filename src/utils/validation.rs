//! Input validation utilities.
//!
//! This module provides the checks applied to the input document before a
//! fabric is built.

use std::sync::LazyLock;

use ipnet::Ipv4Net;
use regex::Regex;

/// Match: "t<tier>-r<index>", e.g. "t1-r3"
static HOSTNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^t(\d+)-r(\d+)$").expect("Invalid hostname regex"));

/// Check whether `hostname` follows the generated `t<tier>-r<index>` scheme
///
/// # Examples
/// ```
/// use closgen::utils::validation::is_valid_hostname;
///
/// assert!(is_valid_hostname("t1-r12"));
/// assert!(!is_valid_hostname("leaf-1"));
/// ```
pub fn is_valid_hostname(hostname: &str) -> bool {
    parse_hostname(hostname).is_some()
}

/// Split a generated hostname into its tier number and 1-based index
pub fn parse_hostname(hostname: &str) -> Option<(u8, usize)> {
    let caps = HOSTNAME_PATTERN.captures(hostname)?;
    let tier = caps.get(1)?.as_str().parse().ok()?;
    let index = caps.get(2)?.as_str().parse().ok()?;
    if index == 0 {
        return None;
    }
    Some((tier, index))
}

/// Validate an external network key
///
/// # Returns
/// * `Ok(())` if `network` is an IPv4 CIDR with no host bits set
/// * `Err(String)` with an error message otherwise
pub fn validate_external_network(network: &str) -> Result<(), String> {
    let net: Ipv4Net = network
        .trim()
        .parse()
        .map_err(|e| format!("'{}' is not an IPv4 CIDR: {}", network, e))?;

    if net != net.trunc() {
        return Err(format!(
            "'{}' has host bits set (expected {})",
            network,
            net.trunc()
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hostname() {
        assert_eq!(parse_hostname("t1-r1"), Some((1, 1)));
        assert_eq!(parse_hostname("t2-r15"), Some((2, 15)));
        assert_eq!(parse_hostname("t1-r0"), None);
        assert_eq!(parse_hostname("t1-r1 "), None);
        assert_eq!(parse_hostname("spine-1"), None);
    }

    #[test]
    fn test_validate_external_network() {
        assert!(validate_external_network("8.8.8.0/24").is_ok());
        assert!(validate_external_network("0.0.0.0/0").is_ok());
        assert!(validate_external_network("8.8.8.8/24").is_err());
        assert!(validate_external_network("8.8.8.0").is_err());
        assert!(validate_external_network("2001:db8::/32").is_err());
    }
}
