//! YAML frontmatter splitting.
//!
//! A frontmatter block is a YAML document delimited by `---` lines at the very
//! start of a file:
//!
//! ```markdown
//! ---
//! id: intro
//! title: Introduction
//! ---
//! # Introduction
//! ```
//!
//! Files without an opening delimiter, or with an opening delimiter that is
//! never closed (a plain thematic break), have no frontmatter. Malformed YAML
//! between the delimiters is an error.

use crate::storage::Frontmatter;

/// Split a document into its frontmatter block and body.
///
/// Returns the parsed [`Frontmatter`] (default instance when the file has
/// none) and the body text after the closing delimiter.
///
/// # Errors
///
/// Returns the YAML error if the block between the delimiters is not valid
/// frontmatter.
pub fn split_frontmatter(content: &str) -> Result<(Frontmatter, &str), serde_yaml::Error> {
    let Some(after_open) = content.strip_prefix("---\n") else {
        return Ok((Frontmatter::default(), content));
    };

    let (yaml, body) = if let Some(body) = after_open.strip_prefix("---\n") {
        // Empty block: `---` immediately followed by `---`
        ("", body)
    } else if let Some(idx) = after_open.find("\n---\n") {
        (&after_open[..idx], &after_open[idx + 5..])
    } else if let Some(yaml) = after_open.strip_suffix("\n---") {
        (yaml, "")
    } else {
        // Opening delimiter never closed: treat as content, not frontmatter
        return Ok((Frontmatter::default(), content));
    };

    if yaml.trim().is_empty() {
        return Ok((Frontmatter::default(), body));
    }

    let frontmatter = serde_yaml::from_str(yaml)?;
    Ok((frontmatter, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_frontmatter_returns_default() {
        let (fm, body) = split_frontmatter("# Title\n\nBody.").unwrap();

        assert!(fm.is_empty());
        assert_eq!(body, "# Title\n\nBody.");
    }

    #[test]
    fn test_full_frontmatter_parsed() {
        let content = "---\nid: intro\ntitle: Introduction\nslug: /\n---\n# Heading\n";

        let (fm, body) = split_frontmatter(content).unwrap();

        assert_eq!(fm.id, Some("intro".to_owned()));
        assert_eq!(fm.title, Some("Introduction".to_owned()));
        assert_eq!(fm.slug, Some("/".to_owned()));
        assert_eq!(body, "# Heading\n");
    }

    #[test]
    fn test_partial_frontmatter_parsed() {
        let content = "---\nid: setup\n---\nBody.";

        let (fm, body) = split_frontmatter(content).unwrap();

        assert_eq!(fm.id, Some("setup".to_owned()));
        assert!(fm.title.is_none());
        assert!(fm.slug.is_none());
        assert_eq!(body, "Body.");
    }

    #[test]
    fn test_empty_block_returns_default() {
        let (fm, body) = split_frontmatter("---\n---\nBody.").unwrap();

        assert!(fm.is_empty());
        assert_eq!(body, "Body.");
    }

    #[test]
    fn test_whitespace_only_block_returns_default() {
        let (fm, body) = split_frontmatter("---\n   \n---\nBody.").unwrap();

        assert!(fm.is_empty());
        assert_eq!(body, "Body.");
    }

    #[test]
    fn test_unclosed_delimiter_is_content() {
        let content = "---\nnot frontmatter, just a thematic break\n";

        let (fm, body) = split_frontmatter(content).unwrap();

        assert!(fm.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_block_at_end_of_file() {
        let content = "---\nid: tail\n---";

        let (fm, body) = split_frontmatter(content).unwrap();

        assert_eq!(fm.id, Some("tail".to_owned()));
        assert_eq!(body, "");
    }

    #[test]
    fn test_malformed_yaml_is_error() {
        let content = "---\nid: [unclosed\n---\nBody.";

        assert!(split_frontmatter(content).is_err());
    }

    #[test]
    fn test_delimiter_mid_file_is_not_frontmatter() {
        let content = "Intro paragraph.\n---\nid: nope\n---\n";

        let (fm, body) = split_frontmatter(content).unwrap();

        assert!(fm.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let content = "---\nid: intro\nsidebar_position: 3\n---\nBody.";

        let (fm, _) = split_frontmatter(content).unwrap();

        assert_eq!(fm.id, Some("intro".to_owned()));
    }
}
