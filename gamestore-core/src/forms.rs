//! Client-side form validation shared by the auth and admin modals.
//!
//! Required-field and numeric checks run before submission. Editing a field
//! clears that field's error; a server rejection becomes one banner for the
//! whole form rather than being mapped back onto fields.
use crate::money::Money;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static EMAIL_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(email))
}

/// Field name → message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: &str, message: &str) {
        self.0.insert(field.to_string(), message.to_string());
    }

    pub fn clear(&mut self, field: &str) {
        self.0.remove(field);
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `Ok(payload())` when no errors were recorded.
    ///
    /// # Errors
    /// Returns `self` when at least one field failed.
    pub fn into_result<T>(self, payload: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(payload())
        } else {
            Err(self)
        }
    }
}

/// A form whose raw text fields validate into a request payload.
pub trait FormModel: Clone + Default + PartialEq {
    type Payload;

    fn set_field(&mut self, field: &str, value: String);

    /// # Errors
    /// Returns the per-field messages when any check fails.
    fn validate(&self) -> Result<Self::Payload, FieldErrors>;
}

/// Modal form state: raw values, field errors, server banner and submit flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState<F> {
    pub form: F,
    pub errors: FieldErrors,
    pub banner: Option<String>,
    pub submitting: bool,
}

impl<F: FormModel> FormState<F> {
    #[must_use]
    pub fn new(form: F) -> Self {
        Self {
            form,
            errors: FieldErrors::default(),
            banner: None,
            submitting: false,
        }
    }

    /// Record an edit and drop that field's error.
    pub fn edit(&mut self, field: &str, value: String) {
        self.form.set_field(field, value);
        self.errors.clear(field);
    }

    /// Validate for submission. On success the form is marked submitting and
    /// the previous banner is cleared.
    pub fn begin_submit(&mut self) -> Option<F::Payload> {
        if self.submitting {
            return None;
        }
        match self.form.validate() {
            Ok(payload) => {
                self.errors = FieldErrors::default();
                self.banner = None;
                self.submitting = true;
                Some(payload)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    pub fn fail(&mut self, message: String) {
        self.submitting = false;
        self.banner = Some(message);
    }

    pub fn finish(&mut self) {
        self.submitting = false;
    }

    #[must_use]
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field)
    }
}

/// Check a required text field, recording `message` when blank.
pub fn require(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field, message);
    }
}

/// Parse a non-negative price, recording a field error on failure.
pub fn parse_price(errors: &mut FieldErrors, field: &str, value: &str) -> Option<Money> {
    if value.trim().is_empty() {
        errors.insert(field, "Price is required");
        return None;
    }
    match Money::parse(value) {
        Ok(price) if price.cents() >= 0 => Some(price),
        Ok(_) => {
            errors.insert(field, "Price cannot be negative");
            None
        }
        Err(_) => {
            errors.insert(field, "Price must be a number");
            None
        }
    }
}

/// Parse a non-negative whole count, recording a field error on failure.
pub fn parse_count(errors: &mut FieldErrors, field: &str, value: &str) -> Option<u32> {
    if value.trim().is_empty() {
        errors.insert(field, "Quantity is required");
        return None;
    }
    value.trim().parse::<u32>().map_or_else(
        |_| {
            errors.insert(field, "Quantity must be a whole number of zero or more");
            None
        },
        Some,
    )
}
