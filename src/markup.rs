//! Markup-lite expansion for menu text.
//!
//! Only three constructs are understood: `**bold**`/`__bold__`, `[label](url)`
//! links (the target is dropped, this is a display renderer) and newlines.
//! Rules run in that order, each on the previous rule's output.

use regex::Regex;
use std::sync::OnceLock;

fn star_bold_regex() -> &'static Regex {
    static STAR_BOLD: OnceLock<Regex> = OnceLock::new();
    STAR_BOLD.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").unwrap())
}

fn underscore_bold_regex() -> &'static Regex {
    static UNDERSCORE_BOLD: OnceLock<Regex> = OnceLock::new();
    UNDERSCORE_BOLD.get_or_init(|| Regex::new(r"__(.+?)__").unwrap())
}

fn link_regex() -> &'static Regex {
    static LINK: OnceLock<Regex> = OnceLock::new();
    LINK.get_or_init(|| Regex::new(r"\[(.+?)\]\(.+?\)").unwrap())
}

/// Expand markup-lite text into a display fragment (`<b>`, `<br>`).
pub fn expand_markup(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let text = star_bold_regex().replace_all(text, "<b>$1</b>");
    let text = underscore_bold_regex().replace_all(&text, "<b>$1</b>");
    let text = link_regex().replace_all(&text, "$1");
    text.replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_and_link() {
        assert_eq!(expand_markup("**hi** [x](http://a)"), "<b>hi</b> x");
        assert_eq!(expand_markup("__wow__"), "<b>wow</b>");
    }

    #[test]
    fn newlines_become_breaks() {
        assert_eq!(expand_markup("a\nb"), "a<br>b");
    }

    #[test]
    fn bold_does_not_span_lines() {
        assert_eq!(expand_markup("**a\nb**"), "**a<br>b**");
    }

    #[test]
    fn unmatched_syntax_passes_through() {
        assert_eq!(expand_markup("**open"), "**open");
        assert_eq!(expand_markup("[label]("), "[label](");
        assert_eq!(expand_markup("*it*"), "*it*");
        assert_eq!(expand_markup(""), "");
    }
}
