//! Failure-report rendering.
//!
//! The formatter is pure string assembly: the predicate supplies the
//! summary line and the calls it selected, and this module renders the
//! enumerated `Received:` listing under it. When an expected input is in
//! play each call is shown as a structural diff against it; otherwise the
//! call's input is pretty-printed verbatim.

use crate::ledger::Invocation;
use crate::matchers::expected::{ExpectedInput, ExpectedValue};
use serde_json::Value;
use std::collections::BTreeSet;

/// English ordinal rendering of a 1-based position: 1st, 2nd, 3rd, 4th...
///
/// Teens are always "th" (11th, 12th, 13th), including above 100
/// (111th, 1012th); otherwise the suffix follows the last digit.
pub fn ordinal_of(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (1, teen) if teen != 11 => "st",
        (2, teen) if teen != 12 => "nd",
        (3, teen) if teen != 13 => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Pretty-print a payload value.
pub fn stringify(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Prefix every line of `text` with `margin`.
fn indent(text: &str, margin: &str) -> String {
    text.lines()
        .map(|line| format!("{margin}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Field-wise structural diff of an expected input against an actual
/// payload.
///
/// Expected-side lines carry a `- ` marker, actual-side lines a `+ `;
/// fields that agree are context. Extra actual fields show up on the
/// `+` side but never fail the match itself.
pub fn diff(expected: &ExpectedInput, actual: &Value) -> String {
    let Some(object) = actual.as_object() else {
        return format!("- {expected}\n+ {}", render_actual(actual));
    };

    let names: BTreeSet<&str> = expected
        .fields()
        .map(|(name, _)| name)
        .chain(object.keys().map(String::as_str))
        .collect();

    let mut lines = vec!["  {".to_string()];
    for name in names {
        match (expected.get(name), object.get(name)) {
            (Some(want), Some(got)) if want.matches(got) => {
                lines.push(format!("    \"{name}\": {}", render_actual(got)));
            }
            (Some(want), Some(got)) => {
                lines.push(format!("-   \"{name}\": {}", render_expected(want)));
                lines.push(format!("+   \"{name}\": {}", render_actual(got)));
            }
            (Some(want), None) => {
                lines.push(format!("-   \"{name}\": {}", render_expected(want)));
            }
            (None, Some(got)) => {
                lines.push(format!("+   \"{name}\": {}", render_actual(got)));
            }
            (None, None) => {}
        }
    }
    lines.push("  }".to_string());
    lines.join("\n")
}

fn render_expected(value: &ExpectedValue) -> String {
    value.to_string()
}

fn render_actual(value: &Value) -> String {
    value.to_string()
}

/// Assemble the full failure report.
///
/// With no calls the summary line is returned untouched; an empty
/// `Received:` listing would only mislead. Otherwise each call gets an
/// ordinal header and either a diff (when the calling predicate carried
/// an expected input) or its pretty-printed payload.
pub fn format_calls(
    summary: &str,
    calls: &[Invocation],
    expected: Option<&ExpectedInput>,
) -> String {
    if calls.is_empty() {
        return summary.to_string();
    }

    let mut lines: Vec<String> = vec![summary.to_string(), String::new(), "Received:".to_string(), String::new()];
    for (index, call) in calls.iter().enumerate() {
        lines.push(format!("   {} {} call", ordinal_of(index + 1), call.command));
        lines.push(String::new());
        let body = match expected {
            Some(spec) => diff(spec, &call.input),
            None => indent(&stringify(&call.input), "    "),
        };
        lines.push(body);
        lines.push(String::new());
    }
    lines.push(format!("Number of calls: {}", calls.len()));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expected;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn ordinal_table() {
        let cases = [
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (9, "9th"),
            (10, "10th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (21, "21st"),
            (32, "32nd"),
            (93, "93rd"),
            (94, "94th"),
            (1001, "1001st"),
            (1011, "1011th"),
            (1012, "1012th"),
            (1013, "1013th"),
            (1021, "1021st"),
            (1022, "1022nd"),
            (1023, "1023rd"),
        ];
        for (n, want) in cases {
            assert_eq!(ordinal_of(n), want, "ordinal_of({n})");
        }
    }

    proptest! {
        #[test]
        fn ordinal_teens_are_always_th(hundreds in 0usize..50, teen in 11usize..14) {
            let n = hundreds * 100 + teen;
            prop_assert!(ordinal_of(n).ends_with("th"));
        }

        #[test]
        fn ordinal_keeps_the_number_itself(n in 0usize..100_000) {
            let rendered = ordinal_of(n);
            prop_assert!(rendered.starts_with(&n.to_string()));
            prop_assert_eq!(rendered.len(), n.to_string().len() + 2);
        }
    }

    #[test]
    fn empty_listing_returns_bare_summary() {
        let summary = "expected \"PutObjectCommand\" to be called 1 times, but got 0 times";
        assert_eq!(format_calls(summary, &[], None), summary);
    }

    #[test]
    fn listing_enumerates_calls_with_ordinals() {
        let calls = vec![
            Invocation::new("GetObjectCommand", json!({"Key": "a.txt"})),
            Invocation::new("GetObjectCommand", json!({"Key": "b.txt"})),
        ];
        let report = format_calls("summary line", &calls, None);

        assert!(report.starts_with("summary line\n\nReceived:\n\n"));
        assert!(report.contains("   1st GetObjectCommand call"));
        assert!(report.contains("   2nd GetObjectCommand call"));
        assert!(report.ends_with("Number of calls: 2"));
    }

    #[test]
    fn listing_without_expectation_indents_payload() {
        let calls = vec![Invocation::new("GetObjectCommand", json!({"Key": "a.txt"}))];
        let report = format_calls("summary", &calls, None);
        assert!(report.contains("    {\n      \"Key\": \"a.txt\"\n    }"));
    }

    #[test]
    fn diff_marks_mismatched_and_missing_fields() {
        let spec = expected! {"Bucket" => "foo", "VersionId" => "10"};
        let rendered = diff(&spec, &json!({"Bucket": "bar", "Key": "a.txt"}));

        assert!(rendered.contains("-   \"Bucket\": \"foo\""));
        assert!(rendered.contains("+   \"Bucket\": \"bar\""));
        assert!(rendered.contains("-   \"VersionId\": \"10\""));
        assert!(rendered.contains("+   \"Key\": \"a.txt\""));
    }

    #[test]
    fn diff_keeps_agreeing_fields_as_context() {
        let spec = expected! {"Bucket" => "foo"};
        let rendered = diff(&spec, &json!({"Bucket": "foo"}));
        assert_eq!(rendered, "  {\n    \"Bucket\": \"foo\"\n  }");
    }

    #[test]
    fn diff_renders_asymmetric_matchers_by_description() {
        let spec = expected! {"Key" => crate::ExpectedValue::matching_glob("*.txt").unwrap()};
        let rendered = diff(&spec, &json!({"Key": 7}));
        assert!(rendered.contains("-   \"Key\": matching glob \"*.txt\""));
        assert!(rendered.contains("+   \"Key\": 7"));
    }

    #[test]
    fn diff_against_non_object_payload() {
        let spec = expected! {"Bucket" => "foo"};
        let rendered = diff(&spec, &json!("not an object"));
        assert_eq!(rendered, "- {\"Bucket\": \"foo\"}\n+ \"not an object\"");
    }
}
