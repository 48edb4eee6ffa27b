use regex::Regex;
use std::sync::LazyLock;

/// Constructs that would clash with the host page. Applied in this order.
const STRIPPED_PATTERNS: [&str; 9] = [
    r"(?i)<object.*object>",
    r"(?i)<link.*stylesheet.*>",
    r"(?i)<html>",
    r"(?i)</html>",
    r"(?i)<body>",
    r"(?i)</body>",
    r"(?i)<head>",
    r"(?i)</head>",
    r"(?i)<title>.*</title>",
];

static STRIPPED: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    STRIPPED_PATTERNS
        .iter()
        .map(|pattern| Regex::new(pattern).expect("structural tag pattern"))
        .collect()
});

pub fn strip_structural_tags(line: &str) -> String {
    STRIPPED.iter().fold(line.to_string(), |acc, re| {
        if re.is_match(&acc) {
            re.replace_all(&acc, "").into_owned()
        } else {
            acc
        }
    })
}
