use serde::Serialize;

/// Result of a command that may need the user to confirm before it applies.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum Outcome<T> {
    #[serde(rename_all = "camelCase")]
    Completed { value: T, warning: Option<String> },
    NeedsConfirmation { message: String },
}

impl<T> Outcome<T> {
    pub fn done(value: T) -> Self {
        Outcome::Completed {
            value,
            warning: None,
        }
    }

    pub fn with_warning(value: T, warning: impl Into<String>) -> Self {
        Outcome::Completed {
            value,
            warning: Some(warning.into()),
        }
    }

    pub fn confirm(message: impl Into<String>) -> Self {
        Outcome::NeedsConfirmation {
            message: message.into(),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed { .. })
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Completed { value, .. } => Some(value),
            Outcome::NeedsConfirmation { .. } => None,
        }
    }
}
