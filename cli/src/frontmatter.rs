//! YAML frontmatter extraction for work-log markdown files.
//!
//! Malformed frontmatter degrades to "no metadata": the whole file becomes
//! the body and date/type are absent. Never a hard failure.

/// Metadata and body extracted from a markdown file.
pub struct ParsedEntry {
    pub date: Option<String>,
    pub category: Option<String>,
    pub body: String,
}

/// Split `content` into YAML frontmatter (delimited by `---` lines at the
/// very top) and body. Only `date` and `type` keys are consumed.
pub fn parse_frontmatter(content: &str) -> ParsedEntry {
    let plain = || ParsedEntry {
        date: None,
        category: None,
        body: content.to_string(),
    };

    let mut lines = content.lines();
    match lines.next() {
        Some(first) if first.trim_end() == "---" => {}
        _ => return plain(),
    }

    let mut yaml_lines = Vec::new();
    let mut closed = false;
    for line in lines.by_ref() {
        if line.trim_end() == "---" {
            closed = true;
            break;
        }
        yaml_lines.push(line);
    }
    if !closed {
        return plain();
    }

    let body: String = lines.collect::<Vec<_>>().join("\n");

    let metadata: serde_yaml::Value = match serde_yaml::from_str(&yaml_lines.join("\n")) {
        Ok(value) => value,
        Err(_) => return plain(),
    };

    ParsedEntry {
        date: string_field(&metadata, "date"),
        category: string_field(&metadata, "type"),
        body,
    }
}

fn string_field(metadata: &serde_yaml::Value, key: &str) -> Option<String> {
    match metadata.get(key)? {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_date_and_type() {
        let parsed = parse_frontmatter("---\ndate: 2025-11-03\ntype: incident\n---\nbody text\n");
        assert_eq!(parsed.date.as_deref(), Some("2025-11-03"));
        assert_eq!(parsed.category.as_deref(), Some("incident"));
        assert_eq!(parsed.body, "body text");
    }

    #[test]
    fn test_no_frontmatter_is_all_body() {
        let parsed = parse_frontmatter("## Details\njust a body");
        assert!(parsed.date.is_none());
        assert!(parsed.category.is_none());
        assert_eq!(parsed.body, "## Details\njust a body");
    }

    #[test]
    fn test_malformed_yaml_degrades_to_no_metadata() {
        let content = "---\ndate: [unclosed\n---\nbody";
        let parsed = parse_frontmatter(content);
        assert!(parsed.date.is_none());
        assert!(parsed.category.is_none());
        assert_eq!(parsed.body, content);
    }

    #[test]
    fn test_unclosed_frontmatter_degrades() {
        let content = "---\ndate: 2025-11-03\nbody without closing";
        let parsed = parse_frontmatter(content);
        assert!(parsed.date.is_none());
        assert_eq!(parsed.body, content);
    }

    #[test]
    fn test_missing_keys_are_absent_not_errors() {
        let parsed = parse_frontmatter("---\nauthor: me\n---\nbody");
        assert!(parsed.date.is_none());
        assert!(parsed.category.is_none());
    }
}
