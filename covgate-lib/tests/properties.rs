//! Property-based tests for report parsing and threshold evaluation.

use covgate_lib::coverage::{ParseError, RcovParser, SaikuroParser};
use covgate_lib::gate::evaluate;
use covgate_lib::metrics::{MetricKind, MetricTarget};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// A percentage with two decimals, expressed in hundredths so it stays exact.
fn arb_hundredths() -> impl Strategy<Value = u32> {
    0u32..=10_000
}

fn arb_metric() -> impl Strategy<Value = MetricKind> {
    prop_oneof![Just(MetricKind::TotalCoverage), Just(MetricKind::CodeCoverage)]
}

fn percent_text(hundredths: u32) -> String {
    format!("{}.{:02}%", hundredths / 100, hundredths % 100)
}

fn report(total: &str, code: &str) -> String {
    format!(
        "<table class='report'><tbody>\
         <tr><td>TOTAL</td><td class='lines_total'><tt>10</tt></td><td class='lines_code'><tt>8</tt></td>\
         <td><tt class='coverage_total'>{total}</tt></td><td><tt class='coverage_code'>{code}</tt></td></tr>\
         </tbody></table>"
    )
}

fn hundredths_to_f64(hundredths: u32) -> f64 {
    f64::from(hundredths) / 100.0
}

// ============================================================================
// Parsing
// ============================================================================

proptest! {
    /// Every in-range percentage parses to the value it spells.
    #[test]
    fn in_range_percentages_parse_exactly(total in arb_hundredths(), code in arb_hundredths()) {
        let result = RcovParser::new().parse_str(&report(&percent_text(total), &percent_text(code))).unwrap();

        prop_assert_eq!(result.ratio_float(MetricKind::TotalCoverage), Some(hundredths_to_f64(total)));
        prop_assert_eq!(result.ratio_float(MetricKind::CodeCoverage), Some(hundredths_to_f64(code)));
    }

    /// Percentages above 100 are rejected rather than clamped.
    #[test]
    fn above_range_percentages_are_rejected(total in 10_001u32..1_000_000) {
        let result = RcovParser::new().parse_str(&report(&percent_text(total), "50%"));
        prop_assert!(matches!(result, Err(ParseError::OutOfRange { .. })), "got {:?}", result);
    }

    /// Parsing the same text twice yields the same result.
    #[test]
    fn parsing_is_deterministic(total in arb_hundredths(), code in arb_hundredths()) {
        let text = report(&percent_text(total), &percent_text(code));
        let parser = RcovParser::new();
        prop_assert_eq!(parser.parse_str(&text).unwrap(), parser.parse_str(&text).unwrap());
    }
}

proptest! {
    /// A file's complexity score is the share of its methods below the warning level.
    #[test]
    fn complexity_score_counts_methods_below_warning_level(
        complexities in prop::collection::vec(1u32..40, 1..30),
        warn in 1u32..40,
    ) {
        let rows: String = complexities
            .iter()
            .enumerate()
            .map(|(i, c)| format!("<tr><td>m{i}</td><td>{c}</td><td>1</td></tr>"))
            .collect();
        let page = format!("<table><tr><td>Class</td><td>K</td><td>1</td><td>1</td></tr>{rows}</table>");

        let file = SaikuroParser::with_warn_complexity(warn).parse_file_page("lib/k.rb", &page).unwrap();

        let simple = u32::try_from(complexities.iter().filter(|&&c| c < warn).count()).unwrap();
        let total = u32::try_from(complexities.len()).unwrap();
        let expected = f64::from(simple) * 100.0 / f64::from(total);
        prop_assert_eq!(file.methods().len(), complexities.len());
        prop_assert_eq!(file.ratio_float(MetricKind::ComplexityScore), Some(expected));
    }
}

// ============================================================================
// Evaluation
// ============================================================================

proptest! {
    /// A single target fails exactly when the ratio is strictly below its threshold.
    #[test]
    fn single_target_uses_strict_comparison(
        metric in arb_metric(),
        ratio in arb_hundredths(),
        threshold in arb_hundredths(),
    ) {
        let result = RcovParser::new().parse_str(&report(&percent_text(ratio), &percent_text(ratio))).unwrap();
        let target = MetricTarget::new(metric, hundredths_to_f64(threshold), None, None).unwrap();

        let outcome = evaluate(&result, &[target]).unwrap();

        prop_assert_eq!(outcome.is_ok(), ratio >= threshold);
        prop_assert_eq!(outcome.failing_metric().is_some(), ratio < threshold);
    }

    /// When several targets fail, the one listed first is reported.
    #[test]
    fn first_failing_target_wins(
        total in 0u32..5_000,
        code in 0u32..5_000,
        code_first in any::<bool>(),
    ) {
        let result = RcovParser::new().parse_str(&report(&percent_text(total), &percent_text(code))).unwrap();
        let total_target = MetricTarget::new(MetricKind::TotalCoverage, 50.0, None, None).unwrap();
        let code_target = MetricTarget::new(MetricKind::CodeCoverage, 50.0, None, None).unwrap();
        let targets = if code_first { [code_target, total_target] } else { [total_target, code_target] };

        let outcome = evaluate(&result, &targets).unwrap();

        prop_assert_eq!(outcome.failing_metric(), Some(targets[0].metric()));
    }
}
