//! Section extraction from free-text model replies.
//!
//! Two modes:
//! - block mode captures the paragraph after `"<label>:"` up to the next blank line;
//! - line-list mode walks the reply line by line, switching the current section
//!   whenever a line contains a declared header label, and collects bullet items.
//!
//! Header labels are matched as literal, case-sensitive substrings, so a decorative
//! prefix such as `📊 ` or a numbering like `1. ` in front of the label is ignored.

/// Characters stripped from the front of a list line.
const BULLET_CHARS: &[char] = &['•', '-', '*', ' ', '\t'];

/// Returns the text after `"<label>:"` up to the next blank line or end of text, trimmed.
///
/// The remainder of the header line itself is always captured. A label that never
/// appears yields an empty string.
pub fn extract_block(text: &str, label: &str) -> String {
    let marker = format!("{label}:");
    let Some(start) = text.find(&marker) else {
        return String::new();
    };

    let rest = &text[start + marker.len()..];
    let mut lines = rest.split('\n');

    let mut captured: Vec<&str> = Vec::new();
    if let Some(header_tail) = lines.next() {
        captured.push(header_tail);
    }
    for line in lines {
        if line.trim().is_empty() {
            break;
        }
        captured.push(line);
    }

    captured.join("\n").trim().to_string()
}

/// Splits `text` into bullet lists, one per entry in `labels`, in the same order.
///
/// Lines before the first recognised header belong to the first label. Header lines
/// are not content. Bullet markers and surrounding whitespace are stripped and lines
/// that end up empty are dropped.
pub fn extract_items(text: &str, labels: &[&str]) -> Vec<Vec<String>> {
    let mut sections: Vec<Vec<String>> = vec![Vec::new(); labels.len()];
    if labels.is_empty() {
        return sections;
    }

    let mut current = 0;
    for line in text.lines() {
        if let Some(idx) = header_index(line, labels) {
            current = idx;
            continue;
        }

        let item = strip_bullet(line);
        if !item.is_empty() {
            sections[current].push(item.to_string());
        }
    }

    sections
}

/// Index of the first label (in declaration order) contained in `line`.
fn header_index(line: &str, labels: &[&str]) -> Option<usize> {
    labels.iter().position(|label| line.contains(label))
}

fn strip_bullet(line: &str) -> &str {
    line.trim_start_matches(BULLET_CHARS).trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: &[&str] = &["Alpha", "Beta", "Gamma"];

    #[test]
    fn test_block_stops_at_blank_line() {
        let text = "Business Insights:\nHello world\n\nKey Strategic Points:\n- one";
        assert_eq!(extract_block(text, "Business Insights"), "Hello world");
    }

    #[test]
    fn test_block_runs_to_end_of_text() {
        let text = "Business Insights: first line\nsecond line";
        assert_eq!(
            extract_block(text, "Business Insights"),
            "first line\nsecond line"
        );
    }

    #[test]
    fn test_block_treats_whitespace_only_line_as_boundary() {
        let text = "    📊 Business Insights:\n    This is a test summary.\n    \n    🔑 Key Strategic Points:\n    • Point 1";
        assert_eq!(
            extract_block(text, "Business Insights"),
            "This is a test summary."
        );
    }

    #[test]
    fn test_block_empty_when_blank_line_follows_header() {
        let text = "Business Insights:\n\nHello";
        assert_eq!(extract_block(text, "Business Insights"), "");
    }

    #[test]
    fn test_block_missing_label_is_empty() {
        assert_eq!(extract_block("nothing here", "Business Insights"), "");
        assert_eq!(extract_block("", "Business Insights"), "");
    }

    #[test]
    fn test_block_requires_colon_after_label() {
        let text = "Business Insights\nHello";
        assert_eq!(extract_block(text, "Business Insights"), "");
    }

    #[test]
    fn test_block_keeps_bullets_in_scalar_text() {
        let text = "Business Insights:\n• kept as is\n";
        assert_eq!(extract_block(text, "Business Insights"), "• kept as is");
    }

    #[test]
    fn test_items_strip_bullet_prefixes() {
        let text = "Alpha:\n• Point 1\n- Point 2\n* Point 3\n";
        let sections = extract_items(text, LABELS);
        assert_eq!(sections[0], vec!["Point 1", "Point 2", "Point 3"]);
        assert!(sections[1].is_empty());
        assert!(sections[2].is_empty());
    }

    #[test]
    fn test_items_switch_on_decorated_headers() {
        let text = "🔹 Alpha:\n- a1\n\n2. 🔸 Beta:\n- b1\n- b2\n### Gamma\n* g1";
        let sections = extract_items(text, LABELS);
        assert_eq!(sections[0], vec!["a1"]);
        assert_eq!(sections[1], vec!["b1", "b2"]);
        assert_eq!(sections[2], vec!["g1"]);
    }

    #[test]
    fn test_items_before_first_header_go_to_first_section() {
        let text = "Preamble line\nBeta:\n- b1";
        let sections = extract_items(text, LABELS);
        assert_eq!(sections[0], vec!["Preamble line"]);
        assert_eq!(sections[1], vec!["b1"]);
    }

    #[test]
    fn test_items_drop_marker_only_and_blank_lines() {
        let text = "Alpha:\n•\n - \n   \n*\n- real\n";
        let sections = extract_items(text, LABELS);
        assert_eq!(sections[0], vec!["real"]);
    }

    #[test]
    fn test_items_header_match_is_case_sensitive() {
        let text = "Alpha:\n- a1\nbeta:\n- still alpha";
        let sections = extract_items(text, LABELS);
        assert_eq!(sections[0], vec!["a1", "beta:", "still alpha"]);
        assert!(sections[1].is_empty());
    }

    #[test]
    fn test_items_revisiting_a_header_appends() {
        let text = "Alpha:\n- a1\nBeta:\n- b1\nAlpha again:\n- a2";
        let sections = extract_items(text, LABELS);
        assert_eq!(sections[0], vec!["a1", "a2"]);
        assert_eq!(sections[1], vec!["b1"]);
    }

    #[test]
    fn test_items_with_no_labels_is_empty() {
        assert!(extract_items("- a\n- b", &[]).is_empty());
    }
}
