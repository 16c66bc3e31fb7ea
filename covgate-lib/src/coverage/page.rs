//! Helpers shared by the HTML report parsers.

use super::ParseError;
use camino::Utf8Path;
use regex::Regex;
use std::fs;
use std::io;
use std::sync::LazyLock;

static TABLE_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<(/?)table\b[^>]*>").expect("invalid regex"));

/// Read a report page fully into memory.
pub fn read_page(path: &Utf8Path) -> Result<String, ParseError> {
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ParseError::NotFound(path.to_path_buf())
        } else {
            ParseError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// The content of a table whose opening tag ends at `start`, up to its matching `</table>`.
///
/// Nested tables are skipped over. An unclosed table runs to the end of `text`.
pub fn table_body(text: &str, start: usize) -> &str {
    let rest = text.get(start..).unwrap_or_default();

    let mut depth = 1_usize;
    for tag in TABLE_TAG_REGEX.captures_iter(rest) {
        let closing = tag.get(1).is_some_and(|slash| !slash.as_str().is_empty());
        if closing {
            depth -= 1;
            if depth == 0 {
                let end = tag.get(0).map_or(rest.len(), |m| m.start());
                return rest.get(..end).unwrap_or(rest);
            }
        } else {
            depth += 1;
        }
    }

    rest
}

pub fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
