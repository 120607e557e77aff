//! Error reporting
//!
//! Validators push `(locator, message id, args, severity)` tuples into an
//! [`ErrorReporter`]. They never format text themselves; reporters do that
//! through the [`messages`](crate::messages) catalog when asked.

use crate::documents::Element;
use crate::messages;
use serde::Serialize;
use std::fmt;

/// Severity of a reported violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory; does not make the description invalid
    Warning,
    /// Violation of a MUST-level assertion
    Error,
}

impl Severity {
    /// Get the severity as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a violation was found. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorLocator {
    /// Base URI of the document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_base_uri: Option<String>,
    /// 1-based line of the offending element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// 1-based column of the offending element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    /// Short description of the offending element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
}

impl ErrorLocator {
    /// An empty locator
    pub fn new() -> Self {
        Self::default()
    }

    /// Locator pointing at an element's start tag
    pub fn at(element: &Element) -> Self {
        Self {
            document_base_uri: None,
            line: element.position.map(|p| p.line),
            column: element.position.map(|p| p.column),
            element: Some(element.describe()),
        }
    }

    /// Set the document base URI
    pub fn with_document_base_uri(mut self, uri: impl Into<String>) -> Self {
        self.document_base_uri = Some(uri.into());
        self
    }
}

impl fmt::Display for ErrorLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref uri) = self.document_base_uri {
            parts.push(uri.clone());
        }
        if let (Some(line), Some(column)) = (self.line, self.column) {
            parts.push(format!("{}:{}", line, column));
        }
        if let Some(ref element) = self.element {
            parts.push(format!("<{}>", element));
        }
        write!(f, "{}", parts.join(" "))
    }
}

/// Sink for assertion violations
pub trait ErrorReporter {
    /// Record one violation
    fn report_error(
        &mut self,
        locator: ErrorLocator,
        message_id: &str,
        args: &[String],
        severity: Severity,
    );
}

/// One recorded violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportedError {
    /// Where the violation was found
    pub locator: ErrorLocator,
    /// Assertion id, e.g. `Binding-1045`
    pub message_id: String,
    /// Message arguments, in template order
    pub args: Vec<String>,
    /// Severity
    pub severity: Severity,
}

impl ReportedError {
    /// Human-readable message text
    pub fn message(&self) -> String {
        messages::format_message(&self.message_id, &self.args)
    }
}

impl fmt::Display for ReportedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.message_id, self.message())?;
        let location = self.locator.to_string();
        if !location.is_empty() {
            write!(f, " ({})", location)?;
        }
        Ok(())
    }
}

/// Reporter that keeps every violation in memory
#[derive(Debug, Clone, Default)]
pub struct CollectingReporter {
    reported: Vec<ReportedError>,
}

impl CollectingReporter {
    /// Create an empty reporter
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded violations, in report order
    pub fn reported(&self) -> &[ReportedError] {
        &self.reported
    }

    /// Consume the reporter, returning its violations
    pub fn into_reported(self) -> Vec<ReportedError> {
        self.reported
    }

    /// Assertion ids in report order (with repeats)
    pub fn ids(&self) -> Vec<&str> {
        self.reported.iter().map(|r| r.message_id.as_str()).collect()
    }

    /// Violations reported for one assertion id
    pub fn with_id<'a>(&'a self, message_id: &'a str) -> impl Iterator<Item = &'a ReportedError> + 'a {
        self.reported.iter().filter(move |r| r.message_id == message_id)
    }

    /// Number of violations reported for one assertion id
    pub fn count_of(&self, message_id: &str) -> usize {
        self.with_id(message_id).count()
    }

    /// Number of error-severity violations
    pub fn error_count(&self) -> usize {
        self.reported
            .iter()
            .filter(|r| r.severity == Severity::Error)
            .count()
    }

    /// Number of warning-severity violations
    pub fn warning_count(&self) -> usize {
        self.reported
            .iter()
            .filter(|r| r.severity == Severity::Warning)
            .count()
    }

    /// Check if any error-severity violation was reported
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Forget everything reported so far
    pub fn clear(&mut self) {
        self.reported.clear();
    }

    /// Drop reports made after `mark` that repeat one made before it
    ///
    /// Repeats among the reports made after `mark` are kept.
    pub fn drop_repeats_since(&mut self, mark: usize) {
        let mark = mark.min(self.reported.len());
        let later = self.reported.split_off(mark);
        let before = self.reported.len();
        for reported in later {
            if !self.reported[..before].contains(&reported) {
                self.reported.push(reported);
            }
        }
    }
}

impl ErrorReporter for CollectingReporter {
    fn report_error(
        &mut self,
        locator: ErrorLocator,
        message_id: &str,
        args: &[String],
        severity: Severity,
    ) {
        self.reported.push(ReportedError {
            locator,
            message_id: message_id.to_string(),
            args: args.to_vec(),
            severity,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::Document;

    #[test]
    fn test_collecting_reporter() {
        let mut reporter = CollectingReporter::new();
        reporter.report_error(
            ErrorLocator::new(),
            "Interface-1010",
            &["{urn:greeter}Greeter".to_string()],
            Severity::Error,
        );
        reporter.report_error(
            ErrorLocator::new(),
            "Description-1002",
            &["urn:greeter".to_string()],
            Severity::Warning,
        );

        assert_eq!(reporter.ids(), vec!["Interface-1010", "Description-1002"]);
        assert_eq!(reporter.error_count(), 1);
        assert_eq!(reporter.warning_count(), 1);
        assert_eq!(reporter.count_of("Interface-1010"), 1);
        assert!(reporter.has_errors());
    }

    #[test]
    fn test_drop_repeats_since_mark() {
        let mut reporter = CollectingReporter::new();
        let report = |reporter: &mut CollectingReporter, id: &str, name: &str| {
            reporter.report_error(ErrorLocator::new(), id, &[name.to_string()], Severity::Error)
        };
        report(&mut reporter, "Binding-1049", "{urn:greeter}B");
        report(&mut reporter, "Binding-1049", "{urn:greeter}B");
        report(&mut reporter, "Interface-1010", "{urn:greeter}Greeter");

        let mark = reporter.reported().len();
        report(&mut reporter, "Interface-1010", "{urn:greeter}Greeter");
        report(&mut reporter, "Ext-1", "{urn:greeter}B");
        report(&mut reporter, "Ext-1", "{urn:greeter}B");

        reporter.drop_repeats_since(mark);
        assert_eq!(
            reporter.ids(),
            vec!["Binding-1049", "Binding-1049", "Interface-1010", "Ext-1", "Ext-1"]
        );
    }

    #[test]
    fn test_locator_from_element() {
        let doc = Document::from_string("<description>\n  <interface name=\"Greeter\"/>\n</description>").unwrap();
        let interface = &doc.root().unwrap().children[0];

        let locator = ErrorLocator::at(interface).with_document_base_uri("file:///greeter.wsdl");
        assert_eq!(locator.line, Some(2));
        assert_eq!(locator.column, Some(3));
        assert_eq!(
            locator.to_string(),
            "file:///greeter.wsdl 2:3 <interface name=\"Greeter\">"
        );
    }

    #[test]
    fn test_reported_error_display() {
        let reported = ReportedError {
            locator: ErrorLocator::new(),
            message_id: "Endpoint-1061".to_string(),
            args: vec!["mailto:foo".to_string(), "GreeterEndpoint".to_string()],
            severity: Severity::Error,
        };
        assert_eq!(
            reported.to_string(),
            "[error] Endpoint-1061: The address 'mailto:foo' of endpoint 'GreeterEndpoint' is not an absolute IRI."
        );
    }
}
