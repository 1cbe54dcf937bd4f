use std::fmt;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Invalid form: {}", summary(.0))]
    Invalid(Vec<FieldError>),
}

impl FormError {
    pub fn fields(&self) -> &[FieldError] {
        match self {
            Self::Invalid(fields) => fields,
        }
    }
}

fn summary(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub problem: Problem,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.problem)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Problem {
    Required,
    InvalidEmail,
    InvalidPhone,
    InvalidDate,
    Negative,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Required => "is required",
            Self::InvalidEmail => "is not a valid e-mail address",
            Self::InvalidPhone => "is not a valid phone number",
            Self::InvalidDate => "must be a date in YYYY-MM-DD format",
            Self::Negative => "must not be negative",
        };
        f.write_str(text)
    }
}
