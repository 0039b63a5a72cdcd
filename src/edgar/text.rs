use html_escape::decode_html_entities;
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static SCRIPT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<script.*?</script>").unwrap());
static STYLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<style.*?</style>").unwrap());
static BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>|</p>|</div>|</tr>").unwrap());
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\r\x{a0}]+").unwrap());

/// Reduce a filing document to plain text: drop scripts and styles, turn
/// block-level closers into line breaks, strip the remaining markup, decode
/// entities, collapse whitespace and NFKC-normalize.
pub fn extract_text(html: &str) -> String {
    let mut text = SCRIPT_RE.replace_all(html, "").to_string();
    text = STYLE_RE.replace_all(&text, "").to_string();
    text = BREAK_RE.replace_all(&text, "\n").to_string();
    text = TAG_RE.replace_all(&text, " ").to_string();
    text = decode_html_entities(&text).into_owned();
    text = SPACE_RE.replace_all(&text, " ").to_string();

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .nfkc()
        .collect()
}
