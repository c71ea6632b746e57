use crate::domain::RequiredField;
use crate::utils::error_chain_fmt;

/// The four fields of one contact attempt, all known to be non-empty.
#[derive(Debug)]
pub struct Submission {
    pub name: RequiredField,
    pub email: RequiredField,
    pub subject: RequiredField,
    pub message: RequiredField,
}

#[derive(thiserror::Error)]
#[error("All fields are required.")]
pub struct ValidationError {
    pub missing_fields: Vec<&'static str>,
}

impl std::fmt::Debug for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)?;
        write!(f, "Missing fields: {}", self.missing_fields.join(", "))
    }
}

impl Submission {
    /// Every empty field is reported, not only the first one.
    pub fn parse(
        name: String,
        email: String,
        subject: String,
        message: String,
    ) -> Result<Submission, ValidationError> {
        let mut missing_fields = Vec::new();
        let mut required = |field: &'static str, value: String| {
            RequiredField::parse(value)
                .map_err(|_| missing_fields.push(field))
                .ok()
        };

        let name = required("name", name);
        let email = required("email", email);
        let subject = required("subject", subject);
        let message = required("message", message);

        match (name, email, subject, message) {
            (Some(name), Some(email), Some(subject), Some(message)) => Ok(Submission {
                name,
                email,
                subject,
                message,
            }),
            _ => Err(ValidationError { missing_fields }),
        }
    }
}
