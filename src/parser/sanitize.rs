//! Text sanitization utilities for cleaning extracted article content
//!
//! This module provides the text-level passes applied to titles and bodies
//! after they have been pulled out of the document tree.

use regex::Regex;
use std::sync::LazyLock;

// Pre-compiled regex patterns for performance
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^<>]*>").unwrap());

static LOGIN_PROMPT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Log in to leave a comment[ \t]*").unwrap());

/// Sanitize a headline for markdown and file-name safe storage
///
/// 1. Remove zero-width characters
/// 2. Remove control characters (except newline/tab)
/// 3. Map `\ / : * ? " < > |` to their full-width forms
///
/// # Examples
///
/// ```
/// use ucpnz::parser::sanitize::replace_illegal_chars;
///
/// assert_eq!(replace_illegal_chars("A/B: C?"), "A／B： C？");
/// ```
pub fn replace_illegal_chars(text: &str) -> String {
    let result = remove_zero_width(text);
    let result = remove_control_chars(&result);

    result
        .chars()
        .map(|c| match c {
            '\\' => '＼',
            '/' => '／',
            ':' => '：',
            '*' => '＊',
            '?' => '？',
            '"' => '＂',
            '<' => '＜',
            '>' => '＞',
            '|' => '｜',
            other => other,
        })
        .collect()
}

/// Remove zero-width spaces and similar invisible characters
///
/// Removes:
/// - \u{200B}-\u{200F} zero-width space/joiners and direction marks
/// - \u{2028}-\u{202F} separators and formatting characters
/// - \u{FEFF} Byte order mark (BOM)
///
/// # Examples
///
/// ```
/// use ucpnz::parser::sanitize::remove_zero_width;
///
/// let text = "陆\u{200B}军\u{FEFF}伞";
/// assert_eq!(remove_zero_width(text), "陆军伞");
/// ```
pub fn remove_zero_width(text: &str) -> String {
    text.chars()
        .filter(|c| {
            !matches!(*c,
                '\u{200B}'..='\u{200F}' |
                '\u{2028}'..='\u{202F}' |
                '\u{FEFF}'
            )
        })
        .collect()
}

/// Remove control characters except newline and tab
pub fn remove_control_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

/// Replace CJK corner brackets with curly quotes: `「` → `“`, `」` → `”`
///
/// # Examples
///
/// ```
/// use ucpnz::parser::sanitize::replace_cjk_quotes;
///
/// assert_eq!(replace_cjk_quotes("他说「好」"), "他说“好”");
/// ```
pub fn replace_cjk_quotes(text: &str) -> String {
    text.replace('「', "“").replace('」', "”")
}

/// Strip anything that still looks like a markup tag
///
/// Repeats until no `<...>` pair is left, so `<<a>>` does not collapse into
/// a fresh `<>`.
///
/// # Examples
///
/// ```
/// use ucpnz::parser::sanitize::strip_html_tags;
///
/// assert_eq!(strip_html_tags("a <b>bold</b> move"), "a bold move");
/// ```
pub fn strip_html_tags(html: &str) -> String {
    let mut result = html.to_string();
    while TAG_REGEX.is_match(&result) {
        result = TAG_REGEX.replace_all(&result, "").into_owned();
    }
    result
}

/// Remove the comment-box prompt the theme injects into article bodies
pub fn remove_login_prompt(text: &str) -> String {
    LOGIN_PROMPT_REGEX.replace_all(text, "").to_string()
}

/// Final text passes over a joined article body
///
/// Order matters: quote glyphs are substituted before leftover tags are
/// stripped, and the login prompt is removed last.
pub fn clean_body(text: &str) -> String {
    let result = replace_cjk_quotes(text);
    let result = strip_html_tags(&result);
    remove_login_prompt(&result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_replace_illegal_chars() {
        assert_eq!(
            replace_illegal_chars(r#"a\b/c:d*e?f"g<h>i|j"#),
            "a＼b／c：d＊e？f＂g＜h＞i｜j"
        );
    }

    #[test]
    fn test_replace_illegal_chars_strips_invisible() {
        assert_eq!(replace_illegal_chars("以色列\u{200B}新政府\x07"), "以色列新政府");
    }

    #[test]
    fn test_replace_illegal_chars_keeps_cjk_punctuation() {
        let title = "马国男子腰缠巨蟒骑摩托车送往放生，引热议！";
        assert_eq!(replace_illegal_chars(title), title);
    }

    #[test]
    fn test_remove_zero_width() {
        let text = "Test\u{200B}\u{200C}\u{200D}\u{200E}\u{200F}Complete";
        assert_eq!(remove_zero_width(text), "TestComplete");
    }

    #[test]
    fn test_remove_control_chars() {
        let text = "Hello\x00World\x07Test\nNewline\tTab";
        let clean = remove_control_chars(text);
        assert_eq!(clean, "HelloWorldTest\nNewline\tTab");
    }

    #[test]
    fn test_replace_cjk_quotes() {
        assert_eq!(replace_cjk_quotes("「一」「二」"), "“一”“二”");
    }

    #[test]
    fn test_strip_html_nested_tags() {
        let html = "<div><p>Para <span>with <em>nested</em> tags</span></p></div>";
        assert_eq!(strip_html_tags(html), "Para with nested tags");
    }

    #[test]
    fn test_strip_html_nested_brackets() {
        assert_eq!(strip_html_tags("x<<a>>y"), "xy");
    }

    #[test]
    fn test_strip_html_keeps_lone_brackets() {
        assert_eq!(strip_html_tags("3 < 5"), "3 < 5");
        assert_eq!(strip_html_tags("7 > 2"), "7 > 2");
    }

    #[test]
    fn test_remove_login_prompt() {
        let text = "正文  \nLog in to leave a comment   尾部";
        assert_eq!(remove_login_prompt(text), "正文  \n尾部");
    }

    #[test]
    fn test_remove_login_prompt_keeps_line_break() {
        let text = "Log in to leave a comment  \n下一段";
        assert_eq!(remove_login_prompt(text), "\n下一段");
    }

    #[test]
    fn test_clean_body_order() {
        let body = "<i>「引用」</i>  \nLog in to leave a comment ";
        assert_eq!(clean_body(body), "“引用”  \n");
    }

    proptest! {
        #[test]
        fn prop_clean_body_has_no_corner_brackets(s in "\\PC*") {
            let cleaned = clean_body(&s);
            prop_assert!(!cleaned.contains('「'));
            prop_assert!(!cleaned.contains('」'));
        }

        #[test]
        fn prop_strip_html_tags_leaves_no_tag_pairs(s in "[a-z<>/ ]{0,40}") {
            let stripped = strip_html_tags(&s);
            prop_assert!(!TAG_REGEX.is_match(&stripped));
        }
    }
}
