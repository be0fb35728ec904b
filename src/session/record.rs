//! Outcome records handed to host hooks.

use crate::calculator::CalcError;
use std::fmt;
use std::sync::Arc;

/// The outcome of one Equals press.
#[derive(Clone, Debug, PartialEq)]
pub struct CalculationRecord {
    /// The expression that was evaluated.
    pub expression: String,
    /// The formatted result, or the error indicator.
    pub display_result: String,
    /// The error kind, if evaluation failed.
    pub error: Option<CalcError>,
}

impl CalculationRecord {
    pub fn success(expression: impl Into<String>, display_result: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            display_result: display_result.into(),
            error: None,
        }
    }

    pub fn failure(
        expression: impl Into<String>,
        indicator: impl Into<String>,
        error: CalcError,
    ) -> Self {
        Self {
            expression: expression.into(),
            display_result: indicator.into(),
            error: Some(error),
        }
    }

    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Callback invoked with the outcome of an Equals press.
pub type RecordCallback = Arc<dyn Fn(&CalculationRecord) + Send + Sync>;

/// Optional callbacks a host can attach to a session, e.g. to play a sound
/// or keep its own history list. The core never stores history itself.
#[derive(Clone, Default)]
pub struct SessionHooks {
    pub on_result: Option<RecordCallback>,
    pub on_error: Option<RecordCallback>,
}

impl SessionHooks {
    pub fn with_on_result(
        mut self,
        callback: impl Fn(&CalculationRecord) + Send + Sync + 'static,
    ) -> Self {
        self.on_result = Some(Arc::new(callback));
        self
    }

    pub fn with_on_error(
        mut self,
        callback: impl Fn(&CalculationRecord) + Send + Sync + 'static,
    ) -> Self {
        self.on_error = Some(Arc::new(callback));
        self
    }

    pub(crate) fn notify(&self, record: &CalculationRecord) {
        let hook = if record.is_success() {
            &self.on_result
        } else {
            &self.on_error
        };
        if let Some(hook) = hook {
            hook(record);
        }
    }
}

impl fmt::Debug for SessionHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHooks")
            .field("on_result", &self.on_result.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}
