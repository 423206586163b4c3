/*!
 * Translation units, batches and the output document.
 *
 * A unit is created `Pending` by the input loader and settles exactly once
 * into `Skipped`, `Success` or `Failed` during orchestration.
 */

use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::{Map, Value};

/// Lifecycle state of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnitStatus {
    Pending,
    Skipped,
    Success,
    Failed,
}

impl UnitStatus {
    /// Whether the status is final
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// One key/value pair of the input document plus its outcome
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationUnit {
    key: String,
    original_text: String,
    // Non-string input values, carried through untouched
    verbatim: Option<Value>,
    translated_text: Option<String>,
    status: UnitStatus,
    error_message: Option<String>,
    timestamp: Option<DateTime<Local>>,
}

impl TranslationUnit {
    /// Create a pending unit for a string value
    pub fn new(key: impl Into<String>, original_text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            original_text: original_text.into(),
            verbatim: None,
            translated_text: None,
            status: UnitStatus::Pending,
            error_message: None,
            timestamp: None,
        }
    }

    /// Create a pending unit for a non-string value (number, bool, null,
    /// nested object or array). Such units are never sent to a provider.
    pub fn verbatim(key: impl Into<String>, value: Value) -> Self {
        let mut unit = Self::new(key, value.to_string());
        unit.verbatim = Some(value);
        unit
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    pub fn translated_text(&self) -> Option<&str> {
        self.translated_text.as_deref()
    }

    pub fn status(&self) -> UnitStatus {
        self.status
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn timestamp(&self) -> Option<DateTime<Local>> {
        self.timestamp
    }

    /// False for units carrying a non-string value
    pub fn is_text(&self) -> bool {
        self.verbatim.is_none()
    }

    /// Value written to the output document, `None` for failed or
    /// unsettled units
    pub fn output_value(&self) -> Option<Value> {
        match self.status {
            UnitStatus::Success | UnitStatus::Skipped => match &self.verbatim {
                Some(value) => Some(value.clone()),
                None => self.translated_text.clone().map(Value::String),
            },
            UnitStatus::Pending | UnitStatus::Failed => None,
        }
    }

    /// Settle as translated. Returns false and leaves the unit untouched if
    /// it already reached a terminal state.
    pub fn mark_success(&mut self, translated_text: String, at: DateTime<Local>) -> bool {
        self.settle(UnitStatus::Success, Some(translated_text), None, at)
    }

    /// Settle as skipped; the original text passes through unchanged
    pub fn mark_skipped(&mut self, at: DateTime<Local>) -> bool {
        let passthrough = self.original_text.clone();
        self.settle(UnitStatus::Skipped, Some(passthrough), None, at)
    }

    /// Settle as failed with the given message
    pub fn mark_failed(&mut self, error_message: String, at: DateTime<Local>) -> bool {
        self.settle(UnitStatus::Failed, None, Some(error_message), at)
    }

    fn settle(
        &mut self,
        status: UnitStatus,
        translated_text: Option<String>,
        error_message: Option<String>,
        at: DateTime<Local>,
    ) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = status;
        self.translated_text = translated_text;
        self.error_message = error_message;
        self.timestamp = Some(at);
        true
    }
}

/// Ordered units of one run, in input document order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    units: Vec<TranslationUnit>,
}

impl Batch {
    pub fn new(units: Vec<TranslationUnit>) -> Self {
        Self { units }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TranslationUnit> {
        self.units.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(|unit| unit.key())
    }

    pub fn into_units(self) -> Vec<TranslationUnit> {
        self.units
    }
}

/// Key to final text, in input order. Failed units are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OutputDocument {
    entries: Map<String, Value>,
}

impl OutputDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
