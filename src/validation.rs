//! Client-side validation of the product form.
//!
//! Every rule is checked and all failures are reported together, one
//! [`FieldError`] per failing field.

use std::fmt;

use crate::models::ProductFormData;

/// A single failed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All failed rules for one form submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The message for `field`, if it failed.
    pub fn message(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    fn push(&mut self, field: &'static str, message: &str) {
        self.0.push(FieldError {
            field,
            message: message.to_string(),
        });
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl ProductFormData {
    /// Check the required-field and minimum rules.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if is_blank(&self.title) {
            errors.push("title", "Title is required");
        }
        if is_blank(&self.brand) {
            errors.push("brand", "Brand is required");
        }

        match self.price {
            None => errors.push("price", "Price is required"),
            Some(p) if !p.is_finite() => errors.push("price", "Price must be a number"),
            Some(p) if p < 0.0 => errors.push("price", "Price must be positive"),
            Some(_) => {}
        }

        match self.stock {
            None => errors.push("stock", "Stock is required"),
            Some(s) if s < 0 => errors.push("stock", "Stock must be positive"),
            Some(_) => {}
        }

        if is_blank(&self.category) {
            errors.push("category", "Category is required");
        }
        if is_blank(&self.description) {
            errors.push("description", "Description is required");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
