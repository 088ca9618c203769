//! # UC Deck Gateway
//!
//! A small HTTP gateway over the Clash Royale ranking API that lists top
//! players and finds the latest Ultimate Champion deck played near a trophy
//! count.
//!
//! ## Architecture
//!
//! - **models**: Upstream API records and the region key enumeration
//! - **rankings**: Outbound client for the ranking API
//! - **resolver**: Region resolution, closest-player selection and deck lookup
//! - **enrich**: Concurrent clan/region enrichment of top players
//! - **api**: REST API endpoints and rate limiting
//! - **config**: Configuration loading and validation

pub mod api;
pub mod config;
pub mod enrich;
pub mod models;
pub mod rankings;
pub mod resolver;

pub use models::*;

use std::time::Duration;

/// Parse a human-friendly duration string (e.g., "6h", "30m", "90s").
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix('h') {
        (n, 3600)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, 1)
    } else {
        // Default to seconds
        (s, 1)
    };

    let num: u64 = num_str.parse().ok()?;
    Some(Duration::from_secs(num.checked_mul(multiplier)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_minutes() {
        assert_eq!(parse_duration("15m"), Some(Duration::from_secs(900)));
    }

    #[test]
    fn test_parse_duration_hours() {
        assert_eq!(parse_duration("1h"), Some(Duration::from_secs(3600)));
    }

    #[test]
    fn test_parse_duration_default_seconds() {
        assert_eq!(parse_duration("120"), Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_parse_duration_invalid() {
        assert_eq!(parse_duration("abc"), None);
        assert_eq!(parse_duration(""), None);
    }

    #[test]
    fn test_parse_duration_overflow() {
        assert_eq!(parse_duration("99999999999999999h"), None);
        assert_eq!(
            parse_duration("18446744073709551615s"),
            Some(Duration::from_secs(u64::MAX))
        );
    }
}
