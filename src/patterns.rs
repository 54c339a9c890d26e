//! Compiled regex patterns for reader-view extraction.
//!
//! All patterns are compiled once at startup using `LazyLock`.
//! Patterns are organized by their stage in the extraction pipeline.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Candidate Filtering Patterns
// =============================================================================

/// Matches class/id tokens that suggest chrome, ads, navigation, or comments.
pub static UNLIKELY_CANDIDATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)-ad-|ai2html|banner|breadcrumbs|combx|comment|community|cover-wrap|disqus|extra|footer|gdpr|header|legends|menu|related|remark|replies|rss|shoutbox|sidebar|skyscraper|social|sponsor|supplemental|ad-break|agegate|pagination|pager|popup|yom-remote",
    )
    .expect("UNLIKELY_CANDIDATES regex")
});

/// Counter-pattern rescuing elements whose tokens also look content-like.
pub static OK_MAYBE_ITS_A_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)and|article|body|column|content|main|mathjax|shadow")
        .expect("OK_MAYBE_ITS_A_CANDIDATE regex")
});

/// ARIA roles that mark an element as non-content.
pub const UNLIKELY_ROLES: &[&str] = &[
    "menu",
    "menubar",
    "complementary",
    "navigation",
    "alert",
    "alertdialog",
    "dialog",
];

/// Class/id tokens that raise an element's weight.
pub static POSITIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)article|body|content|entry|hentry|h-entry|main|page|pagination|post|text|blog|story",
    )
    .expect("POSITIVE regex")
});

/// Class/id tokens that lower an element's weight.
pub static NEGATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)-ad-|hidden|^hid$| hid$| hid |^hid |banner|combx|comment|com-|contact|footer|gdpr|masthead|media|meta|outbrain|promo|related|scroll|share|shoutbox|sidebar|skyscraper|sponsor|shopping|tags|widget",
    )
    .expect("NEGATIVE regex")
});

/// Matches class/id/rel/itemprop tokens identifying an author byline element.
pub static BYLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)byline|author|dateline|writtenby|p-author").expect("BYLINE regex")
});

/// Share widgets removed from article children when their text is short.
pub static SHARE_ELEMENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\b|_)(share|sharedaddy)(\b|_)").expect("SHARE_ELEMENTS regex")
});

/// Embedded-video hosts that survive `<object>`/`<embed>`/`<iframe>` cleaning.
pub static VIDEOS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)//(www\.)?((dailymotion|youtube|youtube-nocookie|player\.vimeo|v\.qq)\.com|(archive|upload\.wikimedia)\.org|player\.twitch\.tv)",
    )
    .expect("VIDEOS regex")
});

// =============================================================================
// Text Measurement Patterns
// =============================================================================

/// Comma variants counted by the content scorer (Latin, Arabic, CJK forms).
pub static COMMAS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("[\u{002C}\u{060C}\u{FE50}\u{FE10}\u{FE11}\u{2E41}\u{2E34}\u{2E32}\u{FF0C}]")
        .expect("COMMAS regex")
});

/// Runs of whitespace collapsed during inner-text normalization.
pub static NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("NORMALIZE regex"));

/// Non-word separators used by the text similarity tokenizer.
pub static TOKENIZE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").expect("TOKENIZE regex"));

/// A sentence-final period: `.` followed by a space or end of text.
pub static SENTENCE_PERIOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.( |$)").expect("SENTENCE_PERIOD regex"));

/// HTML character references handled by the entity unescaper.
pub static HTML_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(quot|amp|apos|lt|gt|#(?:x[0-9a-fA-F]{1,8}|[0-9]{1,8}));")
        .expect("HTML_ENTITY regex")
});

// =============================================================================
// Title Patterns
// =============================================================================

/// Word-delimited separators appearing between a title and a site name.
pub static TITLE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r" [\|\-\\/>»–—] ").expect("TITLE_SEPARATOR regex")
});

/// The subset of separators implying a site hierarchy rather than a dash.
pub static TITLE_HIERARCHY_SEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" [\\/>»] ").expect("TITLE_HIERARCHY_SEP regex"));

/// Everything up to and including the last word-delimited separator.
pub static TITLE_BEFORE_LAST_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)(.*) [\|\-\\/>»–—] .*").expect("TITLE_BEFORE_LAST_SEPARATOR regex")
});

/// Everything before and including the first word-delimited separator.
pub static TITLE_AFTER_FIRST_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)[^\|\-\\/>»–—]*[\|\-\\/>»–—](.*)").expect("TITLE_AFTER_FIRST_SEPARATOR regex")
});

// =============================================================================
// Metadata Patterns
// =============================================================================

/// Schema.org article types accepted by the JSON-LD pass.
pub static JSONLD_ARTICLE_TYPES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(Article|AdvertiserContentArticle|NewsArticle|AnalysisNewsArticle|AskPublicNewsArticle|BackgroundNewsArticle|OpinionNewsArticle|ReportageNewsArticle|ReviewNewsArticle|Report|SatiricalArticle|ScholarlyArticle|MedicalScholarlyArticle|SocialMediaPosting|BlogPosting|LiveBlogPosting|DiscussionForumPosting|TechArticle|APIReference)$",
    )
    .expect("JSONLD_ARTICLE_TYPES regex")
});

/// Valid `@context` / `@vocab` values marking a Schema.org document.
pub static SCHEMA_DOT_ORG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://schema\.org/?$").expect("SCHEMA_DOT_ORG regex"));

/// CDATA wrapper stripped from JSON-LD script bodies before parsing.
pub static JSONLD_CDATA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*<!\[CDATA\[|\]\]>\s*$").expect("JSONLD_CDATA regex")
});

/// Recognized `<meta property>` keys.
pub static META_PROPERTY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\s*(article|dc|dcterm|og|twitter)\s*:\s*(author|creator|description|published_time|title|site_name)\s*",
    )
    .expect("META_PROPERTY regex")
});

/// Recognized `<meta name>` keys.
pub static META_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:(dc|dcterm|og|twitter|parsely|weibo:(article|webpage))\s*[-\.:]\s*)?(author|creator|pub-date|description|title|site_name)\s*$",
    )
    .expect("META_NAME regex")
});

// =============================================================================
// Image Patterns
// =============================================================================

/// A base64 data URL, capturing the media type.
pub static B64_DATA_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^data:\s*([^\s;,]+)\s*;\s*base64\s*,").expect("B64_DATA_URL regex")
});

/// An attribute value that is a bare image URL.
pub static IMG_EXT_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*\S+\.(jpg|jpeg|png|webp)\S*\s*$").expect("IMG_EXT_URL regex")
});

/// An attribute value that looks like a `srcset` (image URL plus descriptor).
pub static IMG_EXT_SRCSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(jpg|jpeg|png|webp)\s+\d").expect("IMG_EXT_SRCSET regex")
});

/// An image file extension anywhere in an attribute value.
pub static IMG_EXT_ANY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(jpg|jpeg|png|webp)").expect("IMG_EXT_ANY regex")
});

/// One entry of a `srcset` attribute: URL, optional density/width descriptor,
/// trailing comma or end.
pub static SRCSET_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\S+)(\s+[\d.]+[xw])?(\s*(?:,|$))").expect("SRCSET_URL regex")
});

/// A fragment-only URL left alone when the document has no distinct base.
pub static HASH_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#.+").expect("HASH_URL regex"));

// =============================================================================
// Inline Style Patterns
// =============================================================================

/// Inline style hiding an element via `display: none`.
pub static DISPLAY_NONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)display\s*:\s*none").expect("DISPLAY_NONE regex")
});

/// Inline style hiding an element via `visibility: hidden`.
pub static VISIBILITY_HIDDEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)visibility\s*:\s*hidden").expect("VISIBILITY_HIDDEN regex")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlikely_candidates_match_chrome_tokens() {
        assert!(UNLIKELY_CANDIDATES.is_match("sidebar-widget"));
        assert!(UNLIKELY_CANDIDATES.is_match("comment-list"));
        assert!(UNLIKELY_CANDIDATES.is_match("ad-break"));
        assert!(!UNLIKELY_CANDIDATES.is_match("article-text"));
    }

    #[test]
    fn ok_maybe_rescues_content_tokens() {
        assert!(OK_MAYBE_ITS_A_CANDIDATE.is_match("main-column"));
        assert!(OK_MAYBE_ITS_A_CANDIDATE.is_match("article-extra"));
        assert!(!OK_MAYBE_ITS_A_CANDIDATE.is_match("sidebar"));
    }

    #[test]
    fn class_weight_patterns_are_disjoint_on_plain_tokens() {
        assert!(POSITIVE.is_match("entry-content"));
        assert!(!NEGATIVE.is_match("entry-content"));
        assert!(NEGATIVE.is_match("share-footer"));
        assert!(NEGATIVE.is_match("hid"));
        assert!(!NEGATIVE.is_match("hideaway"));
    }

    #[test]
    fn commas_count_unicode_variants() {
        assert_eq!(COMMAS.find_iter("a,b\u{FF0C}c\u{060C}d").count(), 3);
    }

    #[test]
    fn videos_allowlist_matches_known_hosts() {
        assert!(VIDEOS.is_match("https://www.youtube.com/embed/xyz"));
        assert!(VIDEOS.is_match("//player.vimeo.com/video/1"));
        assert!(VIDEOS.is_match("https://archive.org/embed/item"));
        assert!(!VIDEOS.is_match("https://evil.example.com/embed"));
    }

    #[test]
    fn title_separator_requires_surrounding_spaces() {
        assert!(TITLE_SEPARATOR.is_match("Foo - Bar"));
        assert!(TITLE_SEPARATOR.is_match("Foo | Bar"));
        assert!(!TITLE_SEPARATOR.is_match("Foo-Bar"));
    }

    #[test]
    fn jsonld_types_anchor_whole_string() {
        assert!(JSONLD_ARTICLE_TYPES.is_match("NewsArticle"));
        assert!(JSONLD_ARTICLE_TYPES.is_match("blogposting"));
        assert!(!JSONLD_ARTICLE_TYPES.is_match("NotAnArticle"));
    }

    #[test]
    fn srcset_url_splits_entries() {
        let caps: Vec<_> = SRCSET_URL
            .captures_iter("/a.jpg 1x, /b.jpg 2x")
            .map(|c| c.get(1).unwrap().as_str().to_string())
            .collect();
        assert_eq!(caps, vec!["/a.jpg", "/b.jpg"]);
    }
}
