use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::form::FormData;

/// Phone numbers whose digits add up to this or more are rejected.
pub const PHONE_DIGIT_SUM_LIMIT: u32 = 30;

// Non-ASCII letters must never fold onto ASCII ones (U+212A KELVIN SIGN, U+017F LONG S),
// so letter ranges list both cases and the domain folds ASCII only.
const FIO_PATTERN: &str = r"^([a-zA-Zа-яА-Я]+\s){2}([a-zA-Zа-яА-Я]+)$";
const EMAIL_PATTERN: &str = r"^[a-zA-Z][a-zA-Z0-9.\-]{1,28}[a-zA-Z0-9]@(?i-u:ya\.ru|yandex\.ru|yandex\.ua|yandex\.by|yandex\.kz|yandex\.com)$";
const PHONE_PATTERN: &str = r"^\+7\([0-9]{3}\)[0-9]{3}(?:-[0-9]{2}){2}$";

/// The inputs a form carries, in the order they appear on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Fio,
    Email,
    Phone,
}

impl FieldName {
    pub const ALL: [FieldName; 3] = [FieldName::Fio, FieldName::Email, FieldName::Phone];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Fio => "fio",
            FieldName::Email => "email",
            FieldName::Phone => "phone",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown form field: {0}")]
pub struct FieldNameError(pub String);

impl FromStr for FieldName {
    type Err = FieldNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fio" => Ok(FieldName::Fio),
            "email" => Ok(FieldName::Email),
            "phone" => Ok(FieldName::Phone),
            other => Err(FieldNameError(other.to_string())),
        }
    }
}

/// Outcome of validating every input of a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error_fields: Vec<FieldName>,
}

impl ValidationResult {
    pub fn has_error(&self, field: FieldName) -> bool {
        self.error_fields.contains(&field)
    }
}

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    // Patterns are constants, a failure here is a programming error
    cell.get_or_init(|| Regex::new(pattern).expect("Invalid form validation regex pattern"))
}

fn fio_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, FIO_PATTERN)
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, EMAIL_PATTERN)
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, PHONE_PATTERN)
}

/// Sum of the ASCII digits in `value`
pub fn digit_sum(value: &str) -> u32 {
    value.chars().filter_map(|c| c.to_digit(10)).sum()
}

/// Check a single value against the rule for `field`
pub fn validate_field(field: FieldName, value: &str) -> bool {
    match field {
        FieldName::Fio => fio_regex().is_match(value),
        FieldName::Email => email_regex().is_match(value),
        FieldName::Phone => {
            phone_regex().is_match(value) && digit_sum(value) < PHONE_DIGIT_SUM_LIMIT
        }
    }
}

/// Validate every field of `data`, collecting failures in form order
pub fn validate(data: &FormData) -> ValidationResult {
    let error_fields: Vec<FieldName> = FieldName::ALL
        .into_iter()
        .filter(|field| !validate_field(*field, data.get(*field)))
        .collect();

    ValidationResult {
        is_valid: error_fields.is_empty(),
        error_fields,
    }
}
