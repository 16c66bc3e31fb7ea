use super::page::{decode_entities, read_page};
use super::{CoverageResult, MethodComplexity, ParseError, ReportParser};
use crate::metrics::{MetricKind, Ratio};
use camino::Utf8Path;
use regex::Regex;
use std::sync::LazyLock;

const LOG_TARGET: &str = "   saikuro";

/// Saikuro's default warning level: methods at or above it are flagged.
pub const DEFAULT_WARN_COMPLEXITY: u32 = 5;

/// The file name Saikuro gives its index page.
pub const SAIKURO_INDEX_FILE: &str = "index_cyclo.html";

const ANALYZED_FILES_HEADING: &str = "Analyzed Files";

static FILE_LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a\b[^>]*\bhref\s*=\s*['"](?P<href>[^'"]*)['"][^>]*>(?P<name>[^<]*)</a>"#).expect("invalid regex")
});

static ROW_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<tr\b[^>]*>(?P<cells>.*?)</tr>").expect("invalid regex"));

static CELL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<td\b[^>]*>(?P<text>[^<]*)</td>").expect("invalid regex"));

/// Parser for the cyclomatic complexity pages produced by Saikuro.
///
/// The index page lists every analyzed source file under an `Analyzed Files` heading,
/// each linking to a per-file page:
///
/// ```html
/// <h2 class="class_complexity">Analyzed Files</h2>
/// <ul><li><p><a href="./lib/widget.rb_cyclo.html">lib/widget.rb</a></p></li></ul>
/// ```
///
/// A per-file page has a class row (`Class` or `Module`, name, complexity, lines) followed
/// by one three-cell row per method (name, complexity, lines):
///
/// ```html
/// <tr><td>Class</td><td>Widget</td><td>9</td><td>40</td></tr>
/// <tr><td>spin</td><td class="warning">6</td><td>12</td></tr>
/// ```
///
/// Each file, and the report as a whole, is scored as the percentage of its methods
/// whose complexity is below the warning level. A file without methods has no score.
#[derive(Debug, Clone, Copy)]
pub struct SaikuroParser {
    warn_complexity: u32,
}

impl Default for SaikuroParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SaikuroParser {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            warn_complexity: DEFAULT_WARN_COMPLEXITY,
        }
    }

    #[must_use]
    pub const fn with_warn_complexity(warn_complexity: u32) -> Self {
        Self { warn_complexity }
    }

    #[must_use]
    pub const fn warn_complexity(&self) -> u32 {
        self.warn_complexity
    }

    /// Parse an index page, fetching each linked per-file page through `load`.
    ///
    /// `load` receives the link target as written in the index. When two entries share a
    /// source file name, the later one replaces the earlier one.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the index has no file list, a page cannot be loaded or
    /// parsed, or no method is found at all.
    pub fn parse_pages<F>(&self, index: &str, mut load: F) -> Result<CoverageResult, ParseError>
    where
        F: FnMut(&str) -> Result<String, ParseError>,
    {
        let mut summary = CoverageResult::summary();

        for (name, href) in analyzed_files(index)? {
            if summary.file(&name).is_some() {
                log::warn!(target: LOG_TARGET, "File '{name}' appears more than once in the report, keeping the last entry");
            }

            let page = load(&href)?;
            summary = summary.with_file(self.parse_file_page(&name, &page)?);
        }

        let methods: Vec<&MethodComplexity> = summary.files().iter().flat_map(CoverageResult::methods).collect();
        let simple = methods.iter().filter(|m| m.is_simple(self.warn_complexity)).count();
        let score = complexity_score(simple, methods.len()).ok_or(ParseError::EmptySummary)?;

        log::debug!(
            target: LOG_TARGET,
            "Parsed {} file(s) with {} method(s), {simple} below complexity {}",
            summary.files().len(),
            methods.len(),
            self.warn_complexity
        );

        Ok(summary.with_ratio(MetricKind::ComplexityScore, score))
    }

    /// Parse the per-file page of the source file `name`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if a method row has no name or a non-numeric complexity or
    /// line count.
    pub fn parse_file_page(&self, name: &str, text: &str) -> Result<CoverageResult, ParseError> {
        let mut result = CoverageResult::new(name);
        let mut class_name: Option<String> = None;

        for row in ROW_REGEX.captures_iter(text) {
            let cells: Vec<String> = row
                .name("cells")
                .map(|m| {
                    CELL_REGEX
                        .captures_iter(m.as_str())
                        .filter_map(|c| c.name("text"))
                        .map(|t| decode_entities(t.as_str().trim()))
                        .collect()
                })
                .unwrap_or_default();

            match cells.as_slice() {
                [kind, class, _, _] if kind == "Class" || kind == "Module" => {
                    class_name = Some(class.clone()).filter(|c| !c.is_empty());
                }
                [method, complexity, lines] => {
                    if method.is_empty() {
                        return Err(ParseError::MissingMethodName(name.to_string()));
                    }

                    let qualified = class_name.as_ref().map_or_else(|| method.clone(), |class| format!("{class}#{method}"));
                    let complexity = complexity.parse::<u32>().map_err(|_parse_err| ParseError::InvalidNumber {
                        row: qualified.clone(),
                        field: "complexity",
                        text: complexity.clone(),
                    })?;
                    let lines = parse_lines(&qualified, lines)?;

                    result = result.with_method(MethodComplexity::new(qualified, complexity, lines));
                }
                _ => {}
            }
        }

        let simple = result.methods().iter().filter(|m| m.is_simple(self.warn_complexity)).count();
        if let Some(score) = complexity_score(simple, result.methods().len()) {
            result = result.with_ratio(MetricKind::ComplexityScore, score);
        }

        Ok(result)
    }
}

impl ReportParser for SaikuroParser {
    fn parse(&self, path: &Utf8Path) -> Result<CoverageResult, ParseError> {
        log::info!(target: LOG_TARGET, "Parsing Saikuro report '{path}'");

        let index = read_page(path)?;
        let dir = path.parent().unwrap_or_else(|| Utf8Path::new(""));

        self.parse_pages(&index, |href| read_page(&dir.join(href.trim_start_matches("./"))))
    }
}

/// The `(source name, page link)` pairs listed under the index's file heading.
fn analyzed_files(index: &str) -> Result<Vec<(String, String)>, ParseError> {
    let start = index.find(ANALYZED_FILES_HEADING).ok_or(ParseError::MissingFileList)?;
    let list = index.get(start..).unwrap_or_default();

    FILE_LINK_REGEX
        .captures_iter(list)
        .map(|link| {
            let name = link.name("name").map(|m| decode_entities(m.as_str().trim())).unwrap_or_default();
            let href = link.name("href").map(|m| decode_entities(m.as_str().trim())).unwrap_or_default();

            if name.is_empty() || href.is_empty() {
                let offset = link.get(0).map_or(start, |m| start + m.start());
                return Err(ParseError::MissingFileName(offset));
            }

            Ok((name, href))
        })
        .collect()
}

fn parse_lines(row: &str, text: &str) -> Result<Option<u64>, ParseError> {
    if text.is_empty() {
        return Ok(None);
    }

    text.parse::<u64>().map(Some).map_err(|_parse_err| ParseError::InvalidNumber {
        row: row.to_string(),
        field: "lines",
        text: text.to_string(),
    })
}

#[expect(clippy::cast_precision_loss, reason = "method counts stay far below 2^52")]
fn complexity_score(simple: usize, total: usize) -> Option<Ratio> {
    if total == 0 {
        return None;
    }

    Ratio::new(simple as f64 * 100.0 / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn index(files: &[(&str, &str)]) -> String {
        let items: String = files
            .iter()
            .map(|(name, href)| format!("<li><p><a href=\"{href}\">{name}</a></p></li>\n"))
            .collect();

        format!(
            "<html><body><h1>Index for cyclomatic complexity</h1>\n\
             <h2 class=\"class_complexity\">Errors and Warnings</h2>\n\
             <table width=\"100%\" border=\"1\"><tr><th>Class</th><th>Method</th><th>Complexity</th></tr>\n\
             <tr><td><a href=\"./lib/a.rb_cyclo.html\">A</a></td><td>run</td><td class=\"warning\">6</td></tr></table>\n\
             <hr/><h2 class=\"class_complexity\">Analyzed Files</h2>\n<ul>\n{items}</ul></body></html>\n"
        )
    }

    fn page(class: &str, methods: &[(&str, &str, &str)]) -> String {
        let rows: String = methods
            .iter()
            .map(|(name, complexity, lines)| format!("<tr><td>{name}</td><td>{complexity}</td><td>{lines}</td></tr>\n"))
            .collect();

        format!(
            "<html><body>\n\
             <table width=\"100%\" border=\"1\">\n\
             <tr><th>Type</th><th>Name</th><th>Complexity</th><th># Lines</th></tr>\n\
             <tr><td>Class</td><td>{class}</td><td>9</td><td>40</td></tr>\n</table>\n\
             <table width=\"100%\" border=\"1\">\n\
             <tr><th>Method</th><th>Complexity</th><th># Lines</th></tr>\n{rows}</table>\n</body></html>\n"
        )
    }

    fn parse(index_text: &str, pages: &[(&str, String)]) -> Result<CoverageResult, ParseError> {
        let pages: HashMap<&str, &String> = pages.iter().map(|(href, text)| (*href, text)).collect();
        SaikuroParser::new().parse_pages(index_text, |href| {
            pages
                .get(href)
                .map(|text| (*text).clone())
                .ok_or_else(|| ParseError::NotFound(href.into()))
        })
    }

    #[test]
    fn test_scores_files_and_summary() {
        let index_text = index(&[("lib/a.rb", "./lib/a.rb_cyclo.html"), ("lib/b.rb", "./lib/b.rb_cyclo.html")]);
        let result = parse(
            &index_text,
            &[
                ("./lib/a.rb_cyclo.html", page("A", &[("initialize", "1", "3"), ("run", "6", "12"), ("stop", "2", "5")])),
                ("./lib/b.rb_cyclo.html", page("B", &[("turn", "3", "8"), ("mesh", "9", "30")])),
            ],
        )
        .unwrap();

        assert_eq!(result.name(), "TOTAL");
        assert_eq!(result.ratio_float(MetricKind::ComplexityScore), Some(60.0));
        assert_eq!(result.ratio(MetricKind::CodeCoverage), None);
        assert_eq!(result.max_complexity(), Some(9));

        let names: Vec<_> = result.files().iter().map(CoverageResult::name).collect();
        assert_eq!(names, ["lib/a.rb", "lib/b.rb"]);

        let b = result.file("lib/b.rb").unwrap();
        assert_eq!(b.ratio_float(MetricKind::ComplexityScore), Some(50.0));
        assert_eq!(
            b.methods(),
            [MethodComplexity::new("B#turn", 3, Some(8)), MethodComplexity::new("B#mesh", 9, Some(30))]
        );
    }

    #[test]
    fn test_warning_level_is_exclusive() {
        let text = page("A", &[("at_level", "5", "1"), ("below", "4", "1")]);
        let file = SaikuroParser::new().parse_file_page("lib/a.rb", &text).unwrap();
        assert_eq!(file.ratio_float(MetricKind::ComplexityScore), Some(50.0));

        let file = SaikuroParser::with_warn_complexity(6).parse_file_page("lib/a.rb", &text).unwrap();
        assert_eq!(file.ratio_float(MetricKind::ComplexityScore), Some(100.0));
    }

    #[test]
    fn test_file_without_methods_has_no_score() {
        let file = SaikuroParser::new().parse_file_page("lib/empty.rb", &page("Empty", &[])).unwrap();
        assert!(file.methods().is_empty());
        assert_eq!(file.ratio(MetricKind::ComplexityScore), None);
    }

    #[test]
    fn test_report_without_methods_is_empty() {
        let index_text = index(&[("lib/empty.rb", "empty.html")]);
        let err = parse(&index_text, &[("empty.html", page("Empty", &[]))]).unwrap_err();
        assert!(matches!(err, ParseError::EmptySummary));

        let err = parse(&index(&[]), &[]).unwrap_err();
        assert!(matches!(err, ParseError::EmptySummary));
    }

    #[test]
    fn test_methods_outside_a_class_are_unqualified() {
        let text = "<table><tr><td>helper</td><td>2</td><td>4</td></tr></table>";
        let file = SaikuroParser::new().parse_file_page("lib/h.rb", text).unwrap();
        assert_eq!(file.methods(), [MethodComplexity::new("helper", 2, Some(4))]);
    }

    #[test]
    fn test_module_rows_qualify_methods() {
        let text = "<table><tr><td>Module</td><td>Util</td><td>2</td><td>9</td></tr>\
                    <tr><td>slugify</td><td>2</td><td></td></tr></table>";
        let file = SaikuroParser::new().parse_file_page("lib/util.rb", text).unwrap();
        assert_eq!(file.methods(), [MethodComplexity::new("Util#slugify", 2, None)]);
    }

    #[test]
    fn test_invalid_complexity() {
        let err = SaikuroParser::new()
            .parse_file_page("lib/a.rb", &page("A", &[("run", "high", "3")]))
            .unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { ref row, field: "complexity", .. } if row == "A#run"));
    }

    #[test]
    fn test_invalid_line_count() {
        let err = SaikuroParser::new()
            .parse_file_page("lib/a.rb", &page("A", &[("run", "1", "-3")]))
            .unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { field: "lines", .. }));
    }

    #[test]
    fn test_empty_method_name() {
        let err = SaikuroParser::new()
            .parse_file_page("lib/a.rb", &page("A", &[(" ", "1", "3")]))
            .unwrap_err();
        assert!(matches!(err, ParseError::MissingMethodName(ref file) if file == "lib/a.rb"));
    }

    #[test]
    fn test_missing_file_list() {
        let err = parse("<html><body>no list</body></html>", &[]).unwrap_err();
        assert!(matches!(err, ParseError::MissingFileList));
    }

    #[test]
    fn test_missing_page_fails() {
        let err = parse(&index(&[("lib/a.rb", "a.html")]), &[]).unwrap_err();
        assert!(matches!(err, ParseError::NotFound(_)));
    }

    #[test]
    fn test_links_before_the_file_list_are_ignored() {
        // the warnings table links to lib/a.rb too, but only the file list counts
        let index_text = index(&[("lib/b.rb", "b.html")]);
        let result = parse(&index_text, &[("b.html", page("B", &[("go", "1", "2")]))]).unwrap();
        assert_eq!(result.files().len(), 1);
        assert_eq!(result.ratio_float(MetricKind::ComplexityScore), Some(100.0));
    }

    #[test]
    fn test_duplicate_file_last_wins() {
        let index_text = index(&[("lib/a.rb", "a1.html"), ("lib/a.rb", "a2.html")]);
        let result = parse(
            &index_text,
            &[("a1.html", page("A", &[("run", "9", "1")])), ("a2.html", page("A", &[("run", "1", "1")]))],
        )
        .unwrap();
        assert_eq!(result.files().len(), 1);
        assert_eq!(result.ratio_float(MetricKind::ComplexityScore), Some(100.0));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_parse_reads_pages_relative_to_index() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = camino::Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        std::fs::create_dir_all(dir.join("lib")).unwrap();
        std::fs::write(dir.join(SAIKURO_INDEX_FILE), index(&[("lib/a.rb", "./lib/a.rb_cyclo.html")])).unwrap();
        std::fs::write(dir.join("lib").join("a.rb_cyclo.html"), page("A", &[("run", "2", "3"), ("stop", "8", "9")])).unwrap();

        let result = SaikuroParser::new().parse(&dir.join(SAIKURO_INDEX_FILE)).unwrap();
        assert_eq!(result.ratio_float(MetricKind::ComplexityScore), Some(50.0));
        assert_eq!(result.file("lib/a.rb").unwrap().methods().len(), 2);
    }
}
