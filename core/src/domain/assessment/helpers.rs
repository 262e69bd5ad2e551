use regex::Regex;
use std::sync::LazyLock;

static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)[*+]\s+").expect("bullet pattern"));
static HEADING_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#+\s*").expect("heading pattern"));
static LEADING_UNDERSCORES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|\s)_+").expect("leading underscore pattern"));
static TRAILING_UNDERSCORES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+($|\s|[.,;:!?)])").expect("trailing underscore pattern"));
static BLANK_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank run pattern"));

/// Strips markdown decoration from generated text.
///
/// Heading markers, bold/italic markers and inline code ticks are removed,
/// `*`/`+` bullets become `-`, three or more consecutive newlines collapse to
/// one blank line and the result is trimmed. `clean_markdown` is idempotent.
pub fn clean_markdown(text: &str) -> String {
    let lines: Vec<String> = text.lines().map(clean_line).collect();
    let joined = lines.join("\n");
    BLANK_RUNS.replace_all(&joined, "\n\n").trim().to_string()
}

// Every step only removes characters (or swaps a bullet for `-`), so
// iterating to a fixpoint terminates and makes the line idempotent.
fn clean_line(line: &str) -> String {
    let mut current = line.to_string();
    loop {
        let next = clean_line_once(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn clean_line_once(line: &str) -> String {
    let bulleted = BULLET.replace(line, "${1}- ");
    let unmarked: String = bulleted.chars().filter(|c| *c != '*' && *c != '`').collect();
    let unheaded = HEADING_MARKER.replace(&unmarked, "");
    let leading = LEADING_UNDERSCORES.replace_all(&unheaded, "${1}");
    let trailing = TRAILING_UNDERSCORES.replace_all(&leading, "${1}");
    trailing.trim_end().to_string()
}
