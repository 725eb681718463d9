use regex::Regex;
use reqwest::header::USER_AGENT;

use crate::config::AppConfig;
use crate::models::{utc_now_string, TraderList};

/// Link path prefixes that denote a user profile on the leaderboard page.
const USER_PATH_PREFIXES: [&str; 2] = ["/leaderboard/user/", "/user/"];

/// The leaderboard blocks obvious bots; requests go out with a desktop
/// browser User-Agent.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Extract candidate wallet addresses from raw leaderboard HTML.
///
/// Every `href` is inspected; trailing path segments of profile links are
/// kept when they have the exact `0x` + 40 hex shape. Order of first
/// discovery is preserved, duplicates are dropped, and extraction stops once
/// `max` addresses are collected.
pub fn extract_trader_addresses(html: &str, max: usize) -> Vec<String> {
    let href_re = Regex::new(r#"href="([^"]*)""#).expect("Failed to compile href regex");
    let address_re = Regex::new(r"^0x[a-fA-F0-9]{40}$").expect("Failed to compile address regex");

    let mut addresses: Vec<String> = Vec::new();
    if max == 0 {
        return addresses;
    }

    for cap in href_re.captures_iter(html) {
        let href = &cap[1];
        if !USER_PATH_PREFIXES.iter().any(|p| href.starts_with(p)) {
            continue;
        }
        let candidate = href.rsplit('/').next().unwrap_or_default();
        if !address_re.is_match(candidate) {
            continue;
        }
        if addresses.iter().any(|a| a == candidate) {
            continue;
        }
        addresses.push(candidate.to_string());
        if addresses.len() >= max {
            break;
        }
    }

    addresses
}

/// Fetch the leaderboard page and extract trader addresses.
///
/// Best-effort by design: network errors, HTTP errors, and a page structure
/// that no longer matches all end the run with zero addresses and a logged
/// diagnosis. Nothing propagates to the caller.
pub async fn scrape_top_traders(http: &reqwest::Client, config: &AppConfig) -> Vec<String> {
    tracing::info!(url = %config.leaderboard_url, "Scraping top trader addresses");

    let resp = match http
        .get(&config.leaderboard_url)
        .header(USER_AGENT, BROWSER_USER_AGENT)
        .send()
        .await
    {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(error = %e, "Leaderboard request failed");
            return Vec::new();
        }
    };

    let status = resp.status();
    if !status.is_success() {
        if status == reqwest::StatusCode::FORBIDDEN {
            tracing::error!(
                %status,
                "Leaderboard returned 403 — the server is likely blocking scrapers; \
                 a browser User-Agent alone may not be enough"
            );
        } else {
            tracing::error!(%status, "Leaderboard returned non-success status");
        }
        return Vec::new();
    }

    let html = match resp.text().await {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read leaderboard response body");
            return Vec::new();
        }
    };

    let addresses = extract_trader_addresses(&html, config.max_traders_to_scrape);
    if addresses.is_empty() {
        tracing::warn!(
            "No trader addresses matched — the page structure may have changed, \
             or the content is rendered client-side"
        );
    } else {
        tracing::info!(count = addresses.len(), "Extracted trader addresses");
    }
    addresses
}

/// Assemble the persisted trader-list artifact. Full replacement each scrape,
/// no merge with any previous list.
pub fn build_trader_list(addresses: Vec<String>, source_url: &str) -> TraderList {
    TraderList {
        last_scraped_utc: utc_now_string(),
        source_url: source_url.to_string(),
        trader_addresses: addresses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR_A: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const ADDR_B: &str = "0xBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBB";

    fn page(links: &[&str]) -> String {
        links
            .iter()
            .map(|href| format!(r#"<a href="{href}">trader</a>"#))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_extracts_from_both_profile_prefixes() {
        let link_a = format!("/leaderboard/user/{ADDR_A}");
        let link_b = format!("/user/{ADDR_B}");
        let html = page(&[link_a.as_str(), link_b.as_str()]);
        let addresses = extract_trader_addresses(&html, 100);
        assert_eq!(addresses, vec![ADDR_A.to_string(), ADDR_B.to_string()]);
    }

    #[test]
    fn test_all_extracted_addresses_are_well_formed() {
        let link_a = format!("/user/{ADDR_A}");
        let html = page(&[
            link_a.as_str(),
            "/user/0xtooshort",
            "/user/0xgggggggggggggggggggggggggggggggggggggggg", // non-hex
            "/user/nothex",
            "/docs/faq",
        ]);
        let addresses = extract_trader_addresses(&html, 100);
        assert_eq!(addresses.len(), 1);
        for addr in &addresses {
            assert_eq!(addr.len(), 42);
            assert!(addr.starts_with("0x"));
        }
    }

    #[test]
    fn test_ignores_non_profile_links() {
        let link_a = format!("/markets/{ADDR_A}");
        let link_b = format!("/about/{ADDR_B}");
        let html = page(&[link_a.as_str(), link_b.as_str()]);
        assert!(extract_trader_addresses(&html, 100).is_empty());
    }

    #[test]
    fn test_deduplicates_preserving_discovery_order() {
        let first = format!("/user/{ADDR_B}");
        let second = format!("/user/{ADDR_A}");
        let repeat = format!("/leaderboard/user/{ADDR_B}");
        let html = page(&[first.as_str(), second.as_str(), repeat.as_str()]);
        let addresses = extract_trader_addresses(&html, 100);
        assert_eq!(addresses, vec![ADDR_B.to_string(), ADDR_A.to_string()]);
    }

    #[test]
    fn test_stops_at_max() {
        let link_a = format!("/user/{ADDR_A}");
        let link_b = format!("/user/{ADDR_B}");
        let html = page(&[
            link_a.as_str(),
            link_b.as_str(),
            "/user/0xcccccccccccccccccccccccccccccccccccccccc",
        ]);
        assert_eq!(extract_trader_addresses(&html, 2).len(), 2);
        assert!(extract_trader_addresses(&html, 0).is_empty());
    }

    #[test]
    fn test_empty_page_yields_no_addresses() {
        assert!(extract_trader_addresses("<html><body></body></html>", 100).is_empty());
    }

    #[test]
    fn test_build_trader_list_carries_source_url() {
        let list = build_trader_list(vec![ADDR_A.into()], "https://example.com/top-traders");
        assert_eq!(list.source_url, "https://example.com/top-traders");
        assert_eq!(list.trader_addresses.len(), 1);
        assert!(list.last_scraped_utc.ends_with('Z'));
    }
}
