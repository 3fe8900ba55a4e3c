//! Typed errors raised by the reporting engine.
//!
//! Command and infrastructure code works with `anyhow::Result`; the engine
//! itself returns [`ReportError`] so that callers can tell fatal conditions
//! (an unknown calendar, a destination that cannot be opened) apart from the
//! per-event and per-mapping problems that a run tolerates.
//!
//! Once wrapped in `anyhow::Error`, the original variant is recoverable with
//! `err.downcast_ref::<ReportError>()`.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReportError {
    /// A configured calendar id does not resolve to a calendar. Fatal.
    #[error("Calendar not found: {0}")]
    InvalidCalendarIdentifier(String),

    /// The named destination sheet could neither be found nor created. Fatal.
    #[error("Failed to open destination sheet '{name}': {reason}")]
    DestinationCreationFailure { name: String, reason: String },

    /// A color tag or color name has no entry in the configured maps.
    /// The event keeps an empty label; the run continues.
    #[error("No {kind} mapping for '{key}'")]
    MissingColorOrLabelMapping { kind: MappingKind, key: String },

    /// An event ends before it starts. The event is dropped from the run.
    #[error("Event '{title}' ends before it starts ({hours:.2}h)")]
    NegativeDuration { title: String, hours: f64 },

    /// The event source failed while resolving a calendar or listing events.
    #[error("Event source error: {0}")]
    EventSource(String),
}

/// Which of the two lookups came up empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingKind {
    Color,
    Label,
}

impl std::fmt::Display for MappingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MappingKind::Color => write!(f, "color"),
            MappingKind::Label => write!(f, "label"),
        }
    }
}

impl ReportError {
    pub fn destination(name: &str, reason: impl ToString) -> Self {
        ReportError::DestinationCreationFailure {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn source(reason: impl ToString) -> Self {
        ReportError::EventSource(reason.to_string())
    }

    /// Whether the run must stop before anything is written.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ReportError::InvalidCalendarIdentifier(_) | ReportError::DestinationCreationFailure { .. } | ReportError::EventSource(_)
        )
    }
}
