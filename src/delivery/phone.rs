//! Recipient phone numbers.

use serde::Serialize;
use std::fmt;

use super::DeliveryError;
use crate::shaping::ascii_digits;

const MIN_DIGITS: usize = 8;
const MAX_DIGITS: usize = 15;
const LOCAL_MAX_DIGITS: usize = 8;

/// A phone number in E.164 form, e.g. `+96512345678`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Normalize user input into E.164.
    ///
    /// Accepts an optional `whatsapp:` prefix and ignores spaces, dashes, dots
    /// and parentheses. `+` and `00` prefixes are international; numbers
    /// starting with `0` or no longer than 8 digits are local and get
    /// `default_country_code` in front. Arabic-Indic digits are accepted.
    pub fn normalize(input: &str, default_country_code: &str) -> Result<Self, DeliveryError> {
        let invalid = |reason: &str| DeliveryError::InvalidRecipient {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        let trimmed = trimmed.strip_prefix("whatsapp:").unwrap_or(trimmed);
        let compact: String = ascii_digits(trimmed)
            .chars()
            .filter(|ch| !matches!(ch, ' ' | '-' | '.' | '(' | ')' | '\u{00A0}'))
            .collect();

        if compact.is_empty() {
            return Err(invalid("number is empty"));
        }

        let digits = if let Some(rest) = compact.strip_prefix('+') {
            rest.to_string()
        } else if let Some(rest) = compact.strip_prefix("00") {
            rest.to_string()
        } else if compact.starts_with('0') || compact.len() <= LOCAL_MAX_DIGITS {
            format!("{}{}", default_country_code, compact.trim_start_matches('0'))
        } else {
            compact
        };

        if !digits.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(invalid("number may only contain digits"));
        }
        if digits.len() < MIN_DIGITS || digits.len() > MAX_DIGITS {
            return Err(invalid("number must have between 8 and 15 digits"));
        }

        Ok(Self(format!("+{digits}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Address form used by the WhatsApp channel.
    pub fn whatsapp_address(&self) -> String {
        format!("whatsapp:{}", self.0)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
