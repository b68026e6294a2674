//! Inline style rewriting
//!
//! Rich-text cells arrive with a small set of HTML-like tags. These are
//! rewritten to the compact markdown-ish markers used in the export
//! format. Anything outside the rule set passes through untouched.

use once_cell::sync::Lazy;
use regex::Regex;

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"<b>(.*?)</b>").expect("valid regex"));
static STRONG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<strong>(.*?)</strong>").expect("valid regex"));
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"<i>(.*?)</i>").expect("valid regex"));
static EM: Lazy<Regex> = Lazy::new(|| Regex::new(r"<em>(.*?)</em>").expect("valid regex"));
static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<a href="(.*?)">(.*?)</a>"#).expect("valid regex"));

/// Rewrite inline emphasis and link tags to compact markers.
///
/// Rules are applied once each, in a fixed order: bold/strong, then
/// italic/em, then links. The rules are non-recursive and non-overlapping;
/// running bold first means the italic pass never sees `<b>` content as a
/// candidate. Unmatched tags are left in place, so unsupported markup is
/// lossy rather than fatal.
pub fn format_inline_styles(text: &str) -> String {
    let text = BOLD.replace_all(text, "**${1}**");
    let text = STRONG.replace_all(&text, "**${1}**");
    let text = ITALIC.replace_all(&text, "*${1}*");
    let text = EM.replace_all(&text, "*${1}*");
    let text = LINK.replace_all(&text, "[${2}](${1})");
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_and_strong() {
        assert_eq!(format_inline_styles("<b>hi</b>"), "**hi**");
        assert_eq!(format_inline_styles("<strong>hi</strong>"), "**hi**");
    }

    #[test]
    fn test_italic_and_em() {
        assert_eq!(format_inline_styles("<i>hi</i>"), "*hi*");
        assert_eq!(format_inline_styles("<em>hi</em>"), "*hi*");
    }

    #[test]
    fn test_link() {
        assert_eq!(
            format_inline_styles(r#"<a href="https://example.com">docs</a>"#),
            "[docs](https://example.com)"
        );
    }

    #[test]
    fn test_mixed() {
        assert_eq!(
            format_inline_styles(r#"<b>hi</b> and <a href="u">v</a>"#),
            "**hi** and [v](u)"
        );
    }

    #[test]
    fn test_multiple_occurrences() {
        assert_eq!(format_inline_styles("<i>a</i> <i>b</i>"), "*a* *b*");
    }

    #[test]
    fn test_unsupported_tags_pass_through() {
        assert_eq!(format_inline_styles("<u>hi</u>"), "<u>hi</u>");
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(format_inline_styles("no markup here"), "no markup here");
    }
}
