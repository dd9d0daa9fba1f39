//! YAML front matter extraction.
//!
//! Front matter is metadata at the top of a document, delimited by `---`
//! lines:
//!
//! ```markdown
//! ---
//! title: Shader Tricks
//! category: graphics/webgl
//! tags:
//!   - glsl
//!   - performance
//! cover: ./shader.png
//! ---
//!
//! Body starts here.
//! ```
//!
//! Parsing never fails hard. A document without delimiters, with an
//! unterminated header, or with YAML that does not parse degrades to
//! "no front matter, full text as body" — the document still participates
//! in the build with defaults. Unknown keys are ignored; authors keep
//! arbitrary metadata in their headers without breaking the generator.

use serde::Deserialize;

/// Typed front matter fields the generator consumes. Everything is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontMatter {
    pub title: Option<String>,
    /// Slash-delimited category path, e.g. `graphics/webgl`.
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    /// Cover image: absolute URL, site-absolute path, or relative to the post.
    pub cover: Option<String>,
    /// Explicit creation timestamp in epoch milliseconds. Overrides the
    /// filesystem creation time when present.
    pub created_at: Option<i64>,
}

/// Result of splitting a raw document into metadata and body.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// Parsed front matter, if delimiters were present and the YAML was valid.
    pub front_matter: Option<FrontMatter>,
    /// Body text after the closing delimiter (CRLF-normalized). The whole
    /// document when no valid front matter was found.
    pub body: String,
}

/// Split a document into optional front matter and body.
///
/// The header must open on the first non-whitespace line with `---` and close
/// with a line that is exactly `---` (modulo surrounding whitespace). Anything
/// short of that — including YAML that parses but does not match the expected
/// field types — yields the full text as body.
pub fn parse(content: &str) -> ParsedDocument {
    let normalized = content.replace("\r\n", "\n");

    let trimmed = normalized.trim();
    if !trimmed.starts_with("---") {
        return ParsedDocument {
            front_matter: None,
            body: normalized,
        };
    }

    let lines: Vec<&str> = trimmed.lines().collect();
    let closing = lines
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, line)| line.trim() == "---")
        .map(|(i, _)| i);

    let Some(closing) = closing else {
        log::warn!("front matter opened but never closed; treating whole document as body");
        return ParsedDocument {
            front_matter: None,
            body: normalized,
        };
    };

    let header = lines[1..closing].join("\n");
    let body = lines[closing + 1..].join("\n");

    match parse_header(&header) {
        Ok(front_matter) => ParsedDocument {
            front_matter: Some(front_matter),
            body,
        },
        Err(err) => {
            log::warn!("failed to parse front matter: {err}");
            ParsedDocument {
                front_matter: None,
                body: normalized,
            }
        }
    }
}

/// An empty header (`---` directly followed by `---`) parses as YAML null;
/// map that to defaults rather than a type error.
fn parse_header(header: &str) -> Result<FrontMatter, serde_yaml::Error> {
    match serde_yaml::from_str::<serde_yaml::Value>(header)? {
        serde_yaml::Value::Null => Ok(FrontMatter::default()),
        value => serde_yaml::from_value(value),
    }
}
