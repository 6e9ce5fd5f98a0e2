//! Validation gate run on submit.

use crate::field::ValueMap;

/// Error shown when a validator rejects without a message.
pub const DEFAULT_ERROR: &str = "You must provide a valid value";

/// Caller-supplied check over all current values.
pub type Validator = Box<dyn Fn(&ValueMap) -> Verdict>;

/// What a validator returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
    /// Rejected with a message to show
    Message(String),
}

impl From<bool> for Verdict {
    fn from(valid: bool) -> Self {
        if valid { Verdict::Pass } else { Verdict::Fail }
    }
}

impl From<String> for Verdict {
    fn from(message: String) -> Self {
        Verdict::Message(message)
    }
}

impl From<&str> for Verdict {
    fn from(message: &str) -> Self {
        Verdict::Message(message.to_string())
    }
}

impl From<Result<(), String>> for Verdict {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Verdict::Pass,
            Err(message) => Verdict::Message(message),
        }
    }
}

/// Outcome of the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid(String),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }
}

impl From<Verdict> for Validation {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Pass => Validation::Valid,
            Verdict::Fail => Validation::Invalid(DEFAULT_ERROR.to_string()),
            Verdict::Message(message) if message.is_empty() => {
                Validation::Invalid(DEFAULT_ERROR.to_string())
            }
            Verdict::Message(message) => Validation::Invalid(message),
        }
    }
}

/// Run the validator, if any, against the full value map.
pub fn run_gate(validator: Option<&Validator>, values: &ValueMap) -> Validation {
    let Some(validate) = validator else {
        return Validation::Valid;
    };
    let validation = Validation::from(validate(values));
    if let Validation::Invalid(message) = &validation {
        tracing::debug!("Validation rejected submission: {}", message);
    }
    validation
}

/// Wrap a closure returning anything convertible into a [`Verdict`].
pub fn validator<F, R>(f: F) -> Validator
where
    F: Fn(&ValueMap) -> R + 'static,
    R: Into<Verdict>,
{
    Box::new(move |values| f(values).into())
}
