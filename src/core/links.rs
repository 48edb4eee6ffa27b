//! Anchor rewriting.
//!
//! Links are patched with plain substitutions instead of an HTML parser. The
//! input is the fixed page layout Melodic writes. Anything the patterns do not
//! recognise passes through untouched.

use regex::{NoExpand, Regex};
use std::sync::LazyLock;

static ANCHOR_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<a").expect("anchor split pattern"));
static HREF_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)href=""#).expect("quoted href pattern"));
static HREF_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)href=").expect("bare href pattern"));
static GICA_FILE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"file_name=(.*?)gica/").expect("gica file_name pattern"));

pub const FILE_NAME_KEY: &str = "file_name";
pub const FILE_CONTENT_ANCHOR: &str = "#file_content";

/// True when the text looks like it points outside the collection.
pub fn is_external(text: &str) -> bool {
    text.to_ascii_lowercase().contains("http")
}

/// True when `attr="` appears once spaces are ignored.
pub(crate) fn has_quoted_attr(text: &str, attr: &str) -> bool {
    text.to_ascii_lowercase()
        .replace(' ', "")
        .contains(&format!("{}=\"", attr))
}

/// Inserts `suffix` right before the first space, `"` or `>` that follows
/// the first occurrence of `key`.
///
/// Handles both `href=a?key=b >` and `href="a?key=b"` without parsing the tag.
/// The text is returned unchanged when `key` is absent or no delimiter follows it.
pub fn append_after_key(text: &str, key: &str, suffix: &str) -> String {
    if key.is_empty() {
        return text.to_string();
    }
    let Some(start) = text.find(key) else {
        return text.to_string();
    };
    let Some(offset) = text[start..].find(&[' ', '"', '>'][..]) else {
        return text.to_string();
    };

    let at = start + offset;
    let mut out = String::with_capacity(text.len() + suffix.len());
    out.push_str(&text[..at]);
    out.push_str(suffix);
    out.push_str(&text[at..]);
    out
}

/// Points the `href` of one anchor fragment at the viewer page of `owner_id`.
pub fn rewrite_href(link: &str, owner_id: &str, dir_name: &str) -> String {
    if is_external(link) {
        return link.to_string();
    }

    let new_link = if has_quoted_attr(link, "href") {
        let prefix = format!("href=\"./{}?{}={}", owner_id, FILE_NAME_KEY, dir_name);
        HREF_QUOTED.replace_all(link, NoExpand(&prefix)).into_owned()
    } else {
        let prefix = format!("href=./{}?{}={}", owner_id, FILE_NAME_KEY, dir_name);
        HREF_BARE.replace_all(link, NoExpand(&prefix)).into_owned()
    };
    let new_link = new_link.replace("/\"", "/");
    let new_link = append_after_key(&new_link, FILE_NAME_KEY, FILE_CONTENT_ANCHOR);

    GICA_FILE_NAME
        .replace_all(&new_link, "file_name=")
        .into_owned()
}

/// Rewrites every anchor in a line.
///
/// The line is cut on `<a` and each fragment is rewritten, then substituted
/// back wherever it occurs in the line.
pub fn rewrite_hrefs_in_line(line: &str, owner_id: &str, dir_name: &str) -> String {
    let mut new_line = line.to_string();
    for link in ANCHOR_SPLIT.split(line) {
        if link.is_empty() {
            continue;
        }
        let new_link = rewrite_href(link, owner_id, dir_name);
        if new_link != link {
            new_line = new_line.replace(link, &new_link);
        }
    }
    new_line
}
