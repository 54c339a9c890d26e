//! Text measurement and normalization utilities.
//!
//! Small pure-string helpers shared by the scorer, the metadata passes,
//! and the cleaners: inner-text normalization, comma/word counting,
//! token-based text similarity, and HTML entity unescaping.

use crate::patterns;

/// Collapse internal whitespace runs to single spaces and trim.
#[must_use]
pub fn normalize_spaces(text: &str) -> String {
    patterns::NORMALIZE.replace_all(text.trim(), " ").into_owned()
}

/// Count comma occurrences, including Arabic and CJK comma variants.
#[must_use]
pub fn comma_count(text: &str) -> usize {
    patterns::COMMAS.find_iter(text).count()
}

/// Count whitespace-delimited words.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Compare two texts by word token overlap.
///
/// Tokenizes both inputs on non-word boundaries (lowercased), then measures
/// how much of `text_b` is not covered by `text_a`'s tokens. Returns a value
/// in `[0, 1]`; `1.0` means `text_b` adds nothing new over `text_a`.
#[must_use]
pub fn similarity(text_a: &str, text_b: &str) -> f64 {
    let a = text_a.to_lowercase();
    let b = text_b.to_lowercase();
    let tokens_a: Vec<&str> = patterns::TOKENIZE.split(&a).filter(|t| !t.is_empty()).collect();
    let tokens_b: Vec<&str> = patterns::TOKENIZE.split(&b).filter(|t| !t.is_empty()).collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let uniq_b: Vec<&str> = tokens_b
        .iter()
        .filter(|t| !tokens_a.contains(t))
        .copied()
        .collect();

    let joined_b_len = tokens_b.join(" ").chars().count();
    if joined_b_len == 0 {
        return 0.0;
    }
    let uniq_b_len = uniq_b.join(" ").chars().count();

    1.0 - uniq_b_len as f64 / joined_b_len as f64
}

/// Decode the named and numeric HTML character references that survive in
/// attribute values and JSON-LD payloads.
///
/// Unknown references and out-of-range code points decode to U+FFFD rather
/// than failing.
#[must_use]
pub fn unescape_html_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    patterns::HTML_ENTITY
        .replace_all(text, |caps: &regex::Captures| {
            let entity = &caps[1];
            match entity {
                "quot" => "\"".to_string(),
                "amp" => "&".to_string(),
                "apos" => "'".to_string(),
                "lt" => "<".to_string(),
                "gt" => ">".to_string(),
                _ => {
                    // numeric reference: #NNN or #xHHH
                    let digits = &entity[1..];
                    let value = if let Some(hex) = digits.strip_prefix('x').or_else(|| digits.strip_prefix('X')) {
                        u32::from_str_radix(hex, 16).ok()
                    } else {
                        digits.parse::<u32>().ok()
                    };
                    let ch = value
                        .filter(|&v| v != 0 && v <= 0x0010_FFFF && !(0xD800..=0xDFFF).contains(&v))
                        .and_then(char::from_u32)
                        .unwrap_or('\u{FFFD}');
                    ch.to_string()
                }
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_spaces() {
        assert_eq!(normalize_spaces("  a   b \n c  "), "a b c");
        assert_eq!(normalize_spaces(""), "");
    }

    #[test]
    fn test_comma_count_variants() {
        assert_eq!(comma_count("a,b,c"), 2);
        assert_eq!(comma_count("一\u{FF0C}二\u{3002}三"), 1);
        assert_eq!(comma_count("no commas"), 0);
    }

    #[test]
    fn test_similarity_identical() {
        assert!((similarity("The Quick Brown Fox", "the quick brown fox") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_disjoint() {
        assert!(similarity("alpha beta", "gamma delta") < 0.01);
    }

    #[test]
    fn test_similarity_partial_overlap() {
        let s = similarity("breaking news today", "breaking news today extended coverage");
        assert!(s > 0.4 && s < 1.0);
    }

    #[test]
    fn test_unescape_named_entities() {
        assert_eq!(
            unescape_html_entities("Tom &amp; Jerry &lt;3 &quot;cheese&quot;"),
            "Tom & Jerry <3 \"cheese\""
        );
    }

    #[test]
    fn test_unescape_numeric_entities() {
        assert_eq!(unescape_html_entities("caf&#233;"), "café");
        assert_eq!(unescape_html_entities("&#x1F600;"), "\u{1F600}");
        assert_eq!(unescape_html_entities("&#0;"), "\u{FFFD}");
    }

    #[test]
    fn test_unescape_leaves_plain_text_alone() {
        assert_eq!(unescape_html_entities("no entities here"), "no entities here");
    }

}
