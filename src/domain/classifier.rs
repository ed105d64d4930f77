//! Link classification over free-form message text.
//!
//! Scans a message (plain text plus rich-text link entities) for the four
//! link families the bot can act on and returns them as ordered,
//! deduplicated sequences. Classification is a pure function of its input:
//! the same `(text, entities)` pair always yields the same
//! [`ClassifiedLinks`], byte for byte.
//!
//! # Passes
//!
//! 1. **Entity pass** - URLs carried by literal-link entities are classified
//!    by prefix/domain test and trusted at face value.
//! 2. **Text pass** - each line of the message body is scanned for share
//!    URLs (with or without a scheme), magnet URIs, ed2k URIs, and plain
//!    `http(s)://` URLs, in that order. Candidate share links must yield a
//!    `(share_code, receive_code)` pair or they are dropped.
//!
//! Trailing punctuation from the set `,.;:"')]` is stripped from every
//! text-pass candidate before deduplication.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::entities::{ClassifiedLinks, Link, LinkKind, MessageEntity};

/// Share-domain markers. A URL containing one of these under the `/s/` path
/// belongs to the share family, never to the generic bucket.
pub const SHARE_DOMAIN_MARKERS: [&str; 3] = ["115.com/s/", "115cdn.com/s/", "anxia.com/s/"];

/// Cheap per-line gate before running the share regexes.
const SHARE_DOMAIN_KEYWORDS: [&str; 3] = ["115.com", "115cdn.com", "anxia.com"];

static SHARE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://(?:115\.com|115cdn\.com|anxia\.com)/s/\S+").unwrap()
});

static BARE_SHARE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:115\.com|115cdn\.com|anxia\.com)/s/\S+").unwrap());

static MAGNET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"magnet:\?xt=\S+").unwrap());

static ED2K_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"ed2k://\|\S+").unwrap());

static HTTP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").unwrap());

static SHARE_INFO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"s/(\w+)\?password=(\w+)").unwrap());

/// Strips trailing punctuation that commonly sticks to a pasted URL.
fn strip_trailing_punctuation(candidate: &str) -> &str {
    candidate.trim_end_matches([',', '.', ';', ':', '"', '\'', ']', ')'])
}

/// Extracts the `(share_code, receive_code)` pair from a share link.
///
/// The link is normalized first by removing every `#`, `&`, and space
/// character, then required to contain a recognized share-domain marker and
/// to match the `s/<code>?password=<code>` shape. Any other input yields
/// `None`; this function never panics.
pub fn extract_share_info(link: &str) -> Option<(String, String)> {
    let normalized: String = link.chars().filter(|c| !matches!(c, '#' | '&' | ' ')).collect();

    if !SHARE_DOMAIN_MARKERS
        .iter()
        .any(|marker| normalized.contains(marker))
    {
        return None;
    }

    let captures = SHARE_INFO_RE.captures(&normalized)?;
    Some((captures[1].to_string(), captures[2].to_string()))
}

/// True when the URL is a share link by domain marker alone.
fn is_share_url(url: &str) -> bool {
    SHARE_DOMAIN_MARKERS.iter().any(|marker| url.contains(marker))
}

/// Classifies a URL carried by a literal-link entity.
fn classify_entity_url(url: &str) -> LinkKind {
    if is_share_url(url) {
        LinkKind::Share
    } else if url.starts_with("magnet:?xt=") {
        LinkKind::Magnet
    } else if url.starts_with("ed2k://") {
        LinkKind::Ed2k
    } else {
        LinkKind::Generic
    }
}

/// Classifies a message into the four link families.
///
/// `text` may be empty and `entities` may be empty; both passes tolerate
/// arbitrary input. The entity pass runs first, so when the same link also
/// appears in the plain text its entity-pass position wins.
pub fn classify(text: &str, entities: &[MessageEntity]) -> ClassifiedLinks {
    let mut links = ClassifiedLinks::new();

    for entity in entities {
        if let Some(url) = entity.url() {
            links.push(Link::new(classify_entity_url(url), url));
        }
    }

    for line in text.lines() {
        collect_share_links(line, &mut links);
        collect_magnet_links(line, &mut links);
        collect_ed2k_links(line, &mut links);
        collect_generic_links(line, &mut links);
    }

    links
}

fn collect_share_links(line: &str, links: &mut ClassifiedLinks) {
    if !SHARE_DOMAIN_KEYWORDS
        .iter()
        .any(|keyword| line.contains(keyword))
    {
        return;
    }

    let mut candidates: Vec<String> = SHARE_URL_RE
        .find_iter(line)
        .map(|m| m.as_str().to_string())
        .collect();

    // No scheme in sight: take the bare domain fragment and synthesize one.
    if candidates.is_empty() {
        candidates = BARE_SHARE_RE
            .find_iter(line)
            .map(|m| format!("https://{}", m.as_str()))
            .collect();
    }

    for candidate in candidates {
        let url = strip_trailing_punctuation(&candidate);
        if extract_share_info(url).is_some() {
            links.push(Link::new(LinkKind::Share, url));
        }
    }
}

fn collect_magnet_links(line: &str, links: &mut ClassifiedLinks) {
    if !line.contains("magnet:") {
        return;
    }
    for m in MAGNET_RE.find_iter(line) {
        let url = strip_trailing_punctuation(m.as_str());
        links.push(Link::new(LinkKind::Magnet, url));
    }
}

fn collect_ed2k_links(line: &str, links: &mut ClassifiedLinks) {
    if !line.contains("ed2k:") {
        return;
    }
    for m in ED2K_RE.find_iter(line) {
        let url = strip_trailing_punctuation(m.as_str());
        links.push(Link::new(LinkKind::Ed2k, url));
    }
}

fn collect_generic_links(line: &str, links: &mut ClassifiedLinks) {
    for m in HTTP_RE.find_iter(line) {
        let url = strip_trailing_punctuation(m.as_str());
        // Share URLs were already routed to their own bucket.
        if !is_share_url(url) {
            links.push(Link::new(LinkKind::Generic, url));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_link(url: &str) -> MessageEntity {
        MessageEntity::TextLink(url.to_string())
    }

    #[test]
    fn test_classify_empty_input() {
        let links = classify("", &[]);
        assert!(links.is_empty());
    }

    #[test]
    fn test_classify_share_and_magnet_on_one_line() {
        let text = "看看这个 https://115.com/s/abc123?password=xyz9 还有 magnet:?xt=urn:btih:ABCDEF";
        let links = classify(text, &[]);

        assert_eq!(links.share, vec!["https://115.com/s/abc123?password=xyz9"]);
        assert_eq!(links.magnet, vec!["magnet:?xt=urn:btih:ABCDEF"]);
        assert!(links.generic.is_empty());
        assert!(links.ed2k.is_empty());
    }

    #[test]
    fn test_classify_synthesizes_scheme_for_bare_share_domain() {
        let links = classify("115cdn.com/s/qqq111?password=ww22", &[]);
        assert_eq!(links.share, vec!["https://115cdn.com/s/qqq111?password=ww22"]);
        assert_eq!(
            extract_share_info(&links.share[0]),
            Some(("qqq111".to_string(), "ww22".to_string()))
        );
    }

    #[test]
    fn test_classify_drops_share_candidate_without_password() {
        let links = classify("https://115.com/s/abc123", &[]);
        assert!(links.share.is_empty());
        // A share-domain URL never falls through to the generic bucket.
        assert!(links.generic.is_empty());
    }

    #[test]
    fn test_classify_strips_trailing_punctuation() {
        let links = classify("get it at http://example.com/file.zip),", &[]);
        assert_eq!(links.generic, vec!["http://example.com/file.zip"]);
    }

    #[test]
    fn test_classify_ed2k() {
        let text = "ed2k://|file|movie.mkv|123456|ABCDEF0123456789ABCDEF0123456789|/";
        let links = classify(text, &[]);
        assert_eq!(links.ed2k, vec![text]);
    }

    #[test]
    fn test_classify_deduplicates_within_text() {
        let text = "magnet:?xt=urn:btih:AA\nmagnet:?xt=urn:btih:AA\nmagnet:?xt=urn:btih:BB";
        let links = classify(text, &[]);
        assert_eq!(
            links.magnet,
            vec!["magnet:?xt=urn:btih:AA", "magnet:?xt=urn:btih:BB"]
        );
    }

    #[test]
    fn test_classify_deduplicates_across_entity_and_text() {
        let url = "https://115.com/s/abc123?password=xyz9";
        let links = classify(url, &[text_link(url)]);
        assert_eq!(links.share, vec![url]);
    }

    #[test]
    fn test_classify_entity_urls_by_prefix() {
        let entities = vec![
            text_link("https://115.com/s/abc?password=def"),
            text_link("magnet:?xt=urn:btih:CAFE"),
            text_link("ed2k://|file|x|1|0123456789ABCDEF0123456789ABCDEF|/"),
            text_link("ftp://mirror.example.com/iso"),
            MessageEntity::Other,
        ];
        let links = classify("", &entities);

        assert_eq!(links.share.len(), 1);
        assert_eq!(links.magnet.len(), 1);
        assert_eq!(links.ed2k.len(), 1);
        assert_eq!(links.generic, vec!["ftp://mirror.example.com/iso"]);
    }

    #[test]
    fn test_classify_entity_share_link_is_trusted() {
        // Entity URLs skip the shape check; they were literal links upstream.
        let links = classify("", &[text_link("https://115.com/s/no-password-here")]);
        assert_eq!(links.share, vec!["https://115.com/s/no-password-here"]);
    }

    #[test]
    fn test_classify_multiline_mixed_message() {
        let text = "https://115.com/s/abc123?password=xyz9\n\
                    http://example.com/a.zip http://example.com/b.zip\n\
                    magnet:?xt=urn:btih:ABC\n\
                    ed2k://|file|x|9|0123456789ABCDEF0123456789ABCDEF|/";
        let links = classify(text, &[]);

        assert_eq!(links.share.len(), 1);
        assert_eq!(
            links.generic,
            vec!["http://example.com/a.zip", "http://example.com/b.zip"]
        );
        assert_eq!(links.magnet.len(), 1);
        assert_eq!(links.ed2k.len(), 1);
        assert_eq!(links.len(), 5);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let text = "http://a.example\nmagnet:?xt=urn:btih:X\n115.com/s/q1?password=p2";
        let entities = vec![text_link("http://b.example")];
        assert_eq!(classify(text, &entities), classify(text, &entities));
    }

    #[test]
    fn test_extract_share_info_round_trip() {
        let link = "https://115.com/s/code42?password=pw7";
        assert_eq!(
            extract_share_info(link),
            Some(("code42".to_string(), "pw7".to_string()))
        );
    }

    #[test]
    fn test_extract_share_info_normalizes_separators() {
        // '#', '&', and spaces are removed before matching.
        assert_eq!(
            extract_share_info("https://115.com/s/abc# ?password=&def"),
            Some(("abc".to_string(), "def".to_string()))
        );
    }

    #[test]
    fn test_extract_share_info_rejects_foreign_domains() {
        assert_eq!(extract_share_info("https://example.com/s/abc?password=def"), None);
        assert_eq!(extract_share_info("not a url at all"), None);
        assert_eq!(extract_share_info(""), None);
    }

    #[test]
    fn test_extract_share_info_rejects_missing_receive_code() {
        assert_eq!(extract_share_info("https://115.com/s/abc123"), None);
        assert_eq!(extract_share_info("https://115.com/s/abc123?password="), None);
    }

    #[test]
    fn test_extract_share_info_all_three_domains() {
        for domain in ["115.com", "115cdn.com", "anxia.com"] {
            let link = format!("https://{domain}/s/c0de?password=pw");
            assert_eq!(
                extract_share_info(&link),
                Some(("c0de".to_string(), "pw".to_string())),
                "domain {domain}"
            );
        }
    }
}
