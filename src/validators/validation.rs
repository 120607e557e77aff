//! Validation context and results
//!
//! Every validator reports through an [`ErrorReporter`] and also returns a
//! [`ValidationReport`] summarising what it reported, so callers can check
//! the outcome without inspecting the reporter.

use crate::catalog::UriResolver;
use crate::reporter::{ErrorLocator, ErrorReporter, ReportedError, Severity};
use serde::Serialize;

/// Summary of one validation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Number of error-severity violations
    pub errors: usize,
    /// Number of warning-severity violations
    pub warnings: usize,
    /// Ids of the assertions that reported, first occurrence order
    pub assertion_ids: Vec<String>,
}

impl ValidationReport {
    /// An empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Summarise a list of reported violations
    pub fn from_reported(reported: &[ReportedError]) -> Self {
        let mut report = Self::new();
        for error in reported {
            report.record(&error.message_id, error.severity);
        }
        report
    }

    /// Count one violation
    pub fn record(&mut self, message_id: &str, severity: Severity) {
        match severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
        }
        if !self.assertion_ids.iter().any(|id| id == message_id) {
            self.assertion_ids.push(message_id.to_string());
        }
    }

    /// Fold another report into this one
    pub fn merge(&mut self, other: &ValidationReport) {
        self.errors += other.errors;
        self.warnings += other.warnings;
        for id in &other.assertion_ids {
            if !self.assertion_ids.contains(id) {
                self.assertion_ids.push(id.clone());
            }
        }
    }

    /// True when no error-severity violation was reported
    pub fn is_valid(&self) -> bool {
        self.errors == 0
    }

    /// Check whether an assertion reported during the run
    pub fn triggered(&self, message_id: &str) -> bool {
        self.assertion_ids.iter().any(|id| id == message_id)
    }
}

/// Reporter wrapper that forwards every report and counts it
pub struct Tally<'a> {
    inner: &'a mut dyn ErrorReporter,
    report: ValidationReport,
}

impl<'a> Tally<'a> {
    /// Wrap a reporter
    pub fn new(inner: &'a mut dyn ErrorReporter) -> Self {
        Self {
            inner,
            report: ValidationReport::new(),
        }
    }

    /// What has been counted so far
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// Take the counts, leaving an empty report behind
    pub fn take_report(&mut self) -> ValidationReport {
        std::mem::take(&mut self.report)
    }

    /// Stop counting
    pub fn into_report(self) -> ValidationReport {
        self.report
    }
}

impl ErrorReporter for Tally<'_> {
    fn report_error(
        &mut self,
        locator: ErrorLocator,
        message_id: &str,
        args: &[String],
        severity: Severity,
    ) {
        self.report.record(message_id, severity);
        self.inner.report_error(locator, message_id, args, severity);
    }
}

/// What assertions see while they run: the reporter and a URI resolver
pub struct WodenContext<'a> {
    reporter: Tally<'a>,
    uri_resolver: &'a dyn UriResolver,
}

impl<'a> WodenContext<'a> {
    /// Create a context
    pub fn new(reporter: &'a mut dyn ErrorReporter, uri_resolver: &'a dyn UriResolver) -> Self {
        Self {
            reporter: Tally::new(reporter),
            uri_resolver,
        }
    }

    /// The URI resolver
    pub fn uri_resolver(&self) -> &dyn UriResolver {
        self.uri_resolver
    }

    /// The reporter (counting every report)
    pub fn reporter(&mut self) -> &mut dyn ErrorReporter {
        &mut self.reporter
    }

    /// Report a violation
    pub fn report_error(
        &mut self,
        locator: ErrorLocator,
        message_id: &str,
        args: &[String],
        severity: Severity,
    ) {
        self.reporter
            .report_error(locator, message_id, args, severity);
    }

    /// Counts since the context was created or last taken
    pub fn report(&self) -> &ValidationReport {
        self.reporter.report()
    }

    /// Take the counts, starting a fresh report
    pub fn take_report(&mut self) -> ValidationReport {
        self.reporter.take_report()
    }
}
