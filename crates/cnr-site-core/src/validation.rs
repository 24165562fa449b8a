//! Contact field rules.

use crate::error::ValidationError;
use regex::Regex;

/// The inputs a rule needs from one form field.
#[derive(Debug, Clone, Copy)]
pub struct FieldInput<'a> {
    /// The field's `name` attribute.
    pub name: &'a str,
    pub value: &'a str,
    pub required: bool,
}

pub struct Validator {
    email: Regex,
    phone: Regex,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    pub fn new() -> Self {
        Self {
            email: Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"),
            phone: Regex::new(r"^\([0-9]{2}\)\s[0-9]{4,5}-[0-9]{4}$").expect("phone pattern"),
        }
    }

    /// Apply the first matching rule. The value is trimmed before checking,
    /// and an empty optional field is always valid.
    pub fn validate(&self, field: FieldInput<'_>) -> Result<(), ValidationError> {
        let value = field.value.trim();
        if value.is_empty() {
            return if field.required {
                Err(ValidationError::Required)
            } else {
                Ok(())
            };
        }

        match field.name {
            "email" if !self.email.is_match(value) => Err(ValidationError::InvalidEmail),
            "phone" if !self.phone.is_match(value) => Err(ValidationError::InvalidPhone),
            "name" if value.chars().count() < 2 => Err(ValidationError::NameTooShort),
            "message" if value.chars().count() < 10 => Err(ValidationError::MessageTooShort),
            _ => Ok(()),
        }
    }
}
