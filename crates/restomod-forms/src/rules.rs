//! Field-level validation rules

use lazy_static::lazy_static;
use regex::Regex;
use time::Date;
use time::macros::format_description;

use crate::{FieldError, FormError, Problem};

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref PHONE_CHARS: Regex = Regex::new(r"^\+?[0-9\s\-()]+$").unwrap();
}

const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 6..=15;

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(value.trim())
}

pub fn is_phone(value: &str) -> bool {
    let value = value.trim();
    let digits = value.chars().filter(char::is_ascii_digit).count();
    PHONE_CHARS.is_match(value) && PHONE_DIGITS.contains(&digits)
}

pub fn parse_date(value: &str) -> Option<Date> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]")).ok()
}

/// Collects failures across fields; at most one problem per field.
#[derive(Debug, Default)]
pub struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(&mut self, field: &'static str, problem: Problem) {
        self.errors.push(FieldError { field, problem });
    }

    pub fn required(mut self, field: &'static str, value: &str) -> Self {
        if is_blank(value) {
            self.fail(field, Problem::Required);
        }
        self
    }

    pub fn email(mut self, field: &'static str, value: &str) -> Self {
        if is_blank(value) {
            self.fail(field, Problem::Required);
        } else if !is_email(value) {
            self.fail(field, Problem::InvalidEmail);
        }
        self
    }

    pub fn phone(mut self, field: &'static str, value: &str) -> Self {
        if is_blank(value) {
            self.fail(field, Problem::Required);
        } else if !is_phone(value) {
            self.fail(field, Problem::InvalidPhone);
        }
        self
    }

    /// Absent or blank is fine; anything else must look like a phone number
    pub fn optional_phone(self, field: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(phone) if !is_blank(phone) => self.phone(field, phone),
            _ => self,
        }
    }

    pub fn date(mut self, field: &'static str, value: &str) -> Self {
        if is_blank(value) {
            self.fail(field, Problem::Required);
        } else if parse_date(value).is_none() {
            self.fail(field, Problem::InvalidDate);
        }
        self
    }

    pub fn optional_amount(mut self, field: &'static str, value: Option<f64>) -> Self {
        if let Some(amount) = value
            && !(amount.is_finite() && amount >= 0.0)
        {
            self.fail(field, Problem::Negative);
        }
        self
    }

    pub fn finish(self) -> Result<(), FormError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(FormError::Invalid(self.errors))
        }
    }
}
