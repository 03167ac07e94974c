//! Diagnostics and audit trace models.
//!
//! Diagnostics describe data-quality anomalies the engine recovered from.
//! Audit steps record each rule the engine applied, for payroll review.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The kind of anomaly a [`Diagnostic`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticKind {
    /// A clock-in arrived while a session was already open; it was discarded.
    DuplicateClockIn,
    /// A clock-out arrived with no open session; it was discarded.
    OrphanClockOut,
    /// A session ended at or before its start.
    NonPositiveDuration,
    /// An hourly employee had no rate; the default rate was used.
    MissingWageConfig,
    /// No minutes were worked in the requested period.
    EmptyPeriod,
}

impl DiagnosticKind {
    /// How much attention the diagnostic deserves.
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::EmptyPeriod => Severity::Info,
            _ => Severity::Warning,
        }
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            DiagnosticKind::DuplicateClockIn => "DUPLICATE_CLOCK_IN",
            DiagnosticKind::OrphanClockOut => "ORPHAN_CLOCK_OUT",
            DiagnosticKind::NonPositiveDuration => "NON_POSITIVE_DURATION",
            DiagnosticKind::MissingWageConfig => "MISSING_WAGE_CONFIG",
            DiagnosticKind::EmptyPeriod => "EMPTY_PERIOD",
        };
        write!(f, "{}", code)
    }
}

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational only.
    Info,
    /// The result was adjusted to work around bad data.
    Warning,
}

/// A non-fatal note about an anomaly encountered during computation.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Diagnostic, DiagnosticKind, Severity};
///
/// let diagnostic = Diagnostic::new(DiagnosticKind::EmptyPeriod, "emp_001", "no minutes worked");
/// assert_eq!(diagnostic.severity, Severity::Info);
/// assert_eq!(diagnostic.at, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// What went wrong.
    pub kind: DiagnosticKind,
    /// The employee whose data triggered it.
    pub employee_id: String,
    /// The event or session instant involved, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub at: Option<DateTime<Utc>>,
    /// Human-readable description.
    pub message: String,
    /// Derived from `kind`.
    pub severity: Severity,
}

impl Diagnostic {
    /// Creates a diagnostic without an instant.
    pub fn new(kind: DiagnosticKind, employee_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            employee_id: employee_id.into(),
            at: None,
            message: message.into(),
            severity: kind.severity(),
        }
    }

    /// Attaches the instant the anomaly relates to.
    pub fn at(mut self, instant: DateTime<Utc>) -> Self {
        self.at = Some(instant);
        self
    }
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The local date the step applies to, for per-day rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// Ordered audit steps for one computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
}

impl AuditTrace {
    /// The step number the next pushed step should carry.
    pub fn next_step_number(&self) -> u32 {
        self.steps.len() as u32 + 1
    }

    /// Appends a step, renumbering it to follow the existing steps.
    pub fn push(&mut self, mut step: AuditStep) {
        step.step_number = self.next_step_number();
        self.steps.push(step);
    }

    /// Returns the steps recorded for a rule.
    pub fn steps_for_rule<'a>(&'a self, rule_id: &'a str) -> impl Iterator<Item = &'a AuditStep> + 'a {
        self.steps.iter().filter(move |s| s.rule_id == rule_id)
    }
}
