//! Static checks on content rows.
//!
//! The validator only discovers a bad content value when a directive reads
//! it. Linting finds the same problems up front, for every row at once.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use envali_core::application::compile_pattern;
use envali_core::application::ports::{ContentAttribute, ContentRow, SELECTOR_KEY};
use envali_core::domain::PatternSpec;

/// One problem found in a content resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentIssue {
    /// Zero-based index of the offending node.
    pub node: usize,
    /// The node's `variableName`, when it has one.
    pub variable: Option<String>,
    pub message: String,
}

impl fmt::Display for ContentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.variable {
            Some(variable) => write!(f, "node {} ({variable}): {}", self.node, self.message),
            None => write!(f, "node {}: {}", self.node, self.message),
        }
    }
}

/// Check `rows` of one resource.
///
/// Numeric attributes are checked as `f64`, the widest comparison any
/// range directive performs.
pub fn lint(rows: &[ContentRow]) -> Vec<ContentIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for (node, row) in rows.iter().enumerate() {
        let variable = row.get(SELECTOR_KEY).map(str::to_owned);
        let mut report = |message: String| {
            issues.push(ContentIssue {
                node,
                variable: variable.clone(),
                message,
            });
        };

        match row.get(SELECTOR_KEY) {
            None => report(format!("missing '{SELECTOR_KEY}'")),
            Some(name) if name.trim().is_empty() => report(format!("empty '{SELECTOR_KEY}'")),
            Some(name) if !seen.insert(name) => {
                report(format!("duplicate '{SELECTOR_KEY}' \"{name}\""));
            }
            Some(_) => {}
        }

        let from = number(row, ContentAttribute::RangeFrom, &mut report);
        let to = number(row, ContentAttribute::RangeTo, &mut report);
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                report(format!("rangeFrom {from} is greater than rangeTo {to}"));
            }
        }

        if let Some(pattern) = row.attribute(ContentAttribute::Regex) {
            if let Err(err) = compile_pattern(pattern, &PatternSpec::default()) {
                report(format!("regex does not compile: {err}"));
            }
        }
    }

    issues
}

fn number(
    row: &ContentRow,
    attribute: ContentAttribute,
    report: &mut impl FnMut(String),
) -> Option<f64> {
    let raw = row.attribute(attribute)?;
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            report(format!("{attribute} \"{raw}\" is not a number"));
            None
        }
    }
}
