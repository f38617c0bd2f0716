//! Best-effort preview image resolution.
//!
//! Maps a content URL (plus an optional content-type hint) to a thumbnail
//! URL through an ordered fallback chain: domain rule, generic link-preview
//! service, favicon, generated placeholder. Resolution is pure and never
//! fails; the worst outcome is a placeholder. No network call happens here —
//! the returned URL is only fetched when a consumer displays it.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;
use url::Url;

use crate::cache::{Clock, PreviewCache};
use crate::models::ContentType;

/// One entry in the domain-rule table. Rules are evaluated in order; the
/// first rule whose domain matches and whose resolver produces a URL wins.
pub struct DomainRule {
    /// Hostnames this rule covers, without a `www.` prefix.
    pub domains: &'static [&'static str],
    pub resolve: fn(&Url) -> Option<String>,
}

/// Domain-specific resolvers, checked before the generic fallback.
pub static DOMAIN_RULES: &[DomainRule] = &[
    DomainRule {
        domains: &["youtube.com", "youtu.be"],
        resolve: youtube_thumbnail,
    },
    DomainRule {
        domains: &["vimeo.com"],
        resolve: vimeo_thumbnail,
    },
    DomainRule {
        domains: &["instagram.com"],
        resolve: instagram_thumbnail,
    },
    DomainRule {
        domains: &["github.com"],
        resolve: github_opengraph,
    },
    DomainRule {
        domains: &["twitter.com", "x.com"],
        resolve: link_preview_rule,
    },
    DomainRule {
        domains: &["tiktok.com"],
        resolve: link_preview_rule,
    },
    DomainRule {
        domains: &["medium.com"],
        resolve: link_preview_rule,
    },
];

/// Hosts treated as article sources when the content-type hint says so.
const ARTICLE_HOSTS: &[&str] = &[
    "nytimes.com",
    "theguardian.com",
    "bbc.com",
    "bbc.co.uk",
    "cnn.com",
    "medium.com",
];

fn youtube_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?:v=|/embed/|/shorts/|youtu\.be/)([A-Za-z0-9_-]{11})")
            .expect("invalid youtube id pattern")
    })
}

fn vimeo_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"vimeo\.com/(?:video/)?(\d+)").expect("invalid vimeo id pattern")
    })
}

fn youtube_thumbnail(url: &Url) -> Option<String> {
    let id = youtube_id_pattern()
        .captures(url.as_str())
        .and_then(|c| c.get(1))?;
    Some(format!(
        "https://img.youtube.com/vi/{}/hqdefault.jpg",
        id.as_str()
    ))
}

fn vimeo_thumbnail(url: &Url) -> Option<String> {
    let id = vimeo_id_pattern()
        .captures(url.as_str())
        .and_then(|c| c.get(1))?;
    Some(format!("https://vumbnail.com/{}.jpg", id.as_str()))
}

/// Instagram posts expose a media redirect at `/p/{shortcode}/media/`.
fn instagram_thumbnail(url: &Url) -> Option<String> {
    let mut segments = url.path_segments()?;
    if segments.next()? != "p" {
        return None;
    }
    let shortcode = segments.next().filter(|s| !s.is_empty())?;
    Some(format!(
        "https://www.instagram.com/p/{}/media/?size=l",
        shortcode
    ))
}

/// `github.com/{user}/{repo}` has a generated OpenGraph card.
fn github_opengraph(url: &Url) -> Option<String> {
    let mut segments = url.path_segments()?;
    let user = segments.next().filter(|s| !s.is_empty())?;
    let repo = segments.next().filter(|s| !s.is_empty())?;
    Some(format!(
        "https://opengraphassets.githubassets.com/{}/{}",
        user, repo
    ))
}

/// Rule body for domains with no dedicated thumbnail service; routes straight
/// to the link-preview microservice.
fn link_preview_rule(url: &Url) -> Option<String> {
    Some(link_preview_url(url.as_str()))
}

/// Generic fallback: the unkeyed microlink image-embed template.
pub fn link_preview_url(raw_url: &str) -> String {
    format!(
        "https://api.microlink.io/?url={}&embed=image.url",
        urlencoding::encode(raw_url)
    )
}

fn hostname(url: &Url) -> Option<&str> {
    url.host_str()
        .map(|h| h.strip_prefix("www.").unwrap_or(h))
}

/// Resolve a preview image URL for `raw_url`.
///
/// Returns `None` only for blank input; anything else resolves to at least
/// the generic link-preview URL. Hostname parse failures and rule misses
/// degrade to the next tier instead of erroring.
pub fn resolve(raw_url: &str, hint: ContentType) -> Option<String> {
    let raw_url = raw_url.trim();
    if raw_url.is_empty() {
        return None;
    }

    let parsed = match Url::parse(raw_url) {
        Ok(parsed) => parsed,
        Err(err) => {
            debug!("unparseable content url {:?}: {}", raw_url, err);
            return Some(link_preview_url(raw_url));
        }
    };

    if let Some(host) = hostname(&parsed) {
        // Exact domain match first.
        for rule in DOMAIN_RULES {
            if rule.domains.iter().any(|d| *d == host) {
                if let Some(image) = (rule.resolve)(&parsed) {
                    return Some(image);
                }
            }
        }
        // Subdomain tolerance: containment in either direction.
        for rule in DOMAIN_RULES {
            if rule
                .domains
                .iter()
                .any(|d| host.contains(d) || d.contains(host))
            {
                if let Some(image) = (rule.resolve)(&parsed) {
                    return Some(image);
                }
            }
        }
        if hint == ContentType::Article
            && ARTICLE_HOSTS
                .iter()
                .any(|a| host == *a || host.ends_with(&format!(".{}", a)))
        {
            return Some(link_preview_url(raw_url));
        }
    }

    Some(link_preview_url(raw_url))
}

/// Cache-aware resolution: consult the cache before resolving, populate it
/// after. Concurrent resolution for the same key is not de-duplicated; last
/// write wins, which is harmless because resolution is pure.
pub fn resolve_cached<C: Clock>(
    cache: &mut PreviewCache<C>,
    raw_url: &str,
    hint: ContentType,
) -> Option<String> {
    if let Some(cached) = cache.get(raw_url) {
        return Some(cached);
    }
    let resolved = resolve(raw_url, hint)?;
    cache.put(raw_url, resolved.clone());
    Some(resolved)
}

/// Favicon tier: a site icon for the URL's hostname.
pub fn favicon_url(raw_url: &str) -> Option<String> {
    let parsed = Url::parse(raw_url.trim()).ok()?;
    let host = parsed.host_str()?;
    Some(format!(
        "https://www.google.com/s2/favicons?domain={}&sz=128",
        host
    ))
}

/// Background color for generated placeholders, keyed by content type.
pub fn placeholder_color(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::Article => "E67E22",
        ContentType::Video => "E74C3C",
        ContentType::Audio => "9B59B6",
        ContentType::SocialMedia => "3498DB",
        ContentType::Image => "1ABC9C",
        ContentType::Web => "2980B9",
        ContentType::Pdf => "C0392B",
        ContentType::Text => "16A085",
        ContentType::Document => "8E44AD",
        ContentType::Default => "95A5A6",
    }
}

/// Placeholder tier: a generated avatar from the title's first letter and a
/// color keyed by content type.
pub fn placeholder_url(title: &str, content_type: ContentType) -> String {
    let letter = title
        .trim()
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "?".to_string());
    format!(
        "https://ui-avatars.com/api/?name={}&background={}&color=fff&size=256",
        urlencoding::encode(&letter),
        placeholder_color(content_type)
    )
}

/// Full fallback chain: resolver, then favicon, then placeholder. Always
/// produces a displayable URL.
pub fn resolve_with_fallback(raw_url: Option<&str>, title: &str, hint: ContentType) -> String {
    if let Some(raw_url) = raw_url {
        if let Some(image) = resolve(raw_url, hint) {
            return image;
        }
        if let Some(icon) = favicon_url(raw_url) {
            return icon;
        }
    }
    placeholder_url(title, hint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_watch_url() {
        let image = resolve(
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            ContentType::Video,
        );
        assert_eq!(
            image.as_deref(),
            Some("https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg")
        );
    }

    #[test]
    fn test_youtube_short_link_and_shorts_path() {
        assert_eq!(
            resolve("https://youtu.be/dQw4w9WgXcQ", ContentType::Default).as_deref(),
            Some("https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg")
        );
        assert_eq!(
            resolve(
                "https://youtube.com/shorts/abcdefghijk",
                ContentType::Default
            )
            .as_deref(),
            Some("https://img.youtube.com/vi/abcdefghijk/hqdefault.jpg")
        );
    }

    #[test]
    fn test_youtube_subdomain_tolerated() {
        assert_eq!(
            resolve(
                "https://m.youtube.com/watch?v=dQw4w9WgXcQ",
                ContentType::Default
            )
            .as_deref(),
            Some("https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg")
        );
    }

    #[test]
    fn test_youtube_without_video_id_falls_through() {
        let image = resolve("https://www.youtube.com/feed/history", ContentType::Default);
        assert_eq!(
            image.as_deref(),
            Some(link_preview_url("https://www.youtube.com/feed/history").as_str())
        );
    }

    #[test]
    fn test_vimeo_rule() {
        assert_eq!(
            resolve("https://vimeo.com/76979871", ContentType::Video).as_deref(),
            Some("https://vumbnail.com/76979871.jpg")
        );
    }

    #[test]
    fn test_instagram_post_path() {
        assert_eq!(
            resolve("https://www.instagram.com/p/CxYzAbCd/", ContentType::Default).as_deref(),
            Some("https://www.instagram.com/p/CxYzAbCd/media/?size=l")
        );
    }

    #[test]
    fn test_github_repo_opengraph() {
        assert_eq!(
            resolve("https://github.com/rust-lang/rust", ContentType::Default).as_deref(),
            Some("https://opengraphassets.githubassets.com/rust-lang/rust")
        );
    }

    #[test]
    fn test_unmatched_domain_uses_link_preview_and_is_idempotent() {
        let first = resolve("https://example.org/post/1", ContentType::Default);
        let second = resolve("https://example.org/post/1", ContentType::Default);
        assert_eq!(
            first.as_deref(),
            Some("https://api.microlink.io/?url=https%3A%2F%2Fexample.org%2Fpost%2F1&embed=image.url")
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_unparseable_url_degrades_to_link_preview() {
        let image = resolve("not a url at all", ContentType::Default);
        assert_eq!(
            image.as_deref(),
            Some(link_preview_url("not a url at all").as_str())
        );
    }

    #[test]
    fn test_blank_url_resolves_to_nothing() {
        assert_eq!(resolve("", ContentType::Default), None);
        assert_eq!(resolve("   ", ContentType::Default), None);
    }

    #[test]
    fn test_article_host_with_article_hint() {
        let image = resolve(
            "https://www.nytimes.com/2024/03/01/technology/story.html",
            ContentType::Article,
        );
        assert_eq!(
            image.as_deref(),
            Some(
                link_preview_url("https://www.nytimes.com/2024/03/01/technology/story.html")
                    .as_str()
            )
        );
    }

    #[test]
    fn test_favicon_url_uses_hostname() {
        assert_eq!(
            favicon_url("https://blog.example.com/post").as_deref(),
            Some("https://www.google.com/s2/favicons?domain=blog.example.com&sz=128")
        );
        assert_eq!(favicon_url("nope"), None);
    }

    #[test]
    fn test_placeholder_uses_first_letter_and_type_color() {
        let url = placeholder_url("rust notes", ContentType::Article);
        assert_eq!(
            url,
            "https://ui-avatars.com/api/?name=R&background=E67E22&color=fff&size=256"
        );
        let blank = placeholder_url("", ContentType::Default);
        assert!(blank.contains("name=%3F"));
        assert!(blank.contains("background=95A5A6"));
    }

    #[test]
    fn test_fallback_chain_always_produces_a_url() {
        assert!(!resolve_with_fallback(None, "Note", ContentType::Text).is_empty());
        assert!(!resolve_with_fallback(Some(""), "", ContentType::Default).is_empty());
        assert_eq!(
            resolve_with_fallback(
                Some("https://youtu.be/dQw4w9WgXcQ"),
                "Video",
                ContentType::Video
            ),
            "https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg"
        );
    }
}
