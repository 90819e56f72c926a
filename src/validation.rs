//! Helpers for checking request bodies before they reach the service logic.

use crate::Error;

/// Collects the names of required fields that were missing or empty.
///
/// Call [RequiredFields::text], [RequiredFields::label], [RequiredFields::secret] or
/// [RequiredFields::number] for each required
/// field, then [RequiredFields::check] to get a single error listing every
/// missing field.
#[derive(Debug, Default)]
pub(crate) struct RequiredFields {
    missing: Vec<&'static str>,
}

impl RequiredFields {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Take the trimmed text of `value`, recording `name` as missing if the
    /// value is absent or blank.
    pub(crate) fn text(&mut self, name: &'static str, value: Option<String>) -> String {
        match value {
            Some(text) if !text.trim().is_empty() => text.trim().to_owned(),
            _ => {
                self.missing.push(name);
                String::new()
            }
        }
    }

    /// Take `value` untrimmed, recording `name` as missing if the value is
    /// absent or blank. Use this for labels that are matched exactly.
    pub(crate) fn label(&mut self, name: &'static str, value: Option<String>) -> String {
        match value {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                self.missing.push(name);
                String::new()
            }
        }
    }

    /// Take `value` as is, recording `name` as missing if the value is absent
    /// or empty. Use this for passwords, where whitespace is significant.
    pub(crate) fn secret(&mut self, name: &'static str, value: Option<String>) -> String {
        match value {
            Some(text) if !text.is_empty() => text,
            _ => {
                self.missing.push(name);
                String::new()
            }
        }
    }

    /// Take `value`, recording `name` as missing if it is absent or zero.
    pub(crate) fn number(&mut self, name: &'static str, value: Option<f64>) -> f64 {
        match value {
            Some(number) if number != 0.0 && number.is_finite() => number,
            _ => {
                self.missing.push(name);
                0.0
            }
        }
    }

    /// # Errors
    ///
    /// Returns [Error::MissingFields] naming every missing field, if any.
    pub(crate) fn check(self) -> Result<(), Error> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingFields(self.missing.join(", ")))
        }
    }
}
