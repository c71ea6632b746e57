mod submission;

pub use submission::{Submission, ValidationError};

/// A form field that must not be empty.
///
/// No further format checks are applied: the email field is carried as typed.
#[derive(Debug)]
pub struct RequiredField(String);

impl RequiredField {
    pub fn parse(s: String) -> Result<RequiredField, String> {
        if s.is_empty() {
            Err("the field is empty".to_string())
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for RequiredField {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequiredField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
