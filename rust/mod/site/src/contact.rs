//! Contact form model and validation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    Name,
    Email,
    Phone,
    Event,
    Date,
    Location,
    Message,
}

impl ContactField {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "name" => ContactField::Name,
            "email" => ContactField::Email,
            "phone" | "number" => ContactField::Phone,
            "event" => ContactField::Event,
            "date" => ContactField::Date,
            "location" => ContactField::Location,
            "message" => ContactField::Message,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: ContactField,
    pub message: String,
}

impl FieldError {
    fn new(field: ContactField, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub event: String,
    pub date: String,
    pub location: String,
    pub message: String,
}

impl ContactForm {
    pub fn set(&mut self, field: ContactField, value: &str) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Phone => &mut self.phone,
            ContactField::Event => &mut self.event,
            ContactField::Date => &mut self.date,
            ContactField::Location => &mut self.location,
            ContactField::Message => &mut self.message,
        };
        *slot = value.to_string();
    }

    /// Every problem with the form, in field order. Empty means sendable.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::new(ContactField::Name, "Please enter your name"));
        }
        if !self.email.contains('@') {
            errors.push(FieldError::new(ContactField::Email, "Please enter a valid email"));
        }
        let phone = self.phone.trim();
        if phone.len() != 10 || !phone.bytes().all(|b| b.is_ascii_digit()) {
            errors.push(FieldError::new(ContactField::Phone, "Phone number must be 10 digits"));
        }
        if self.event.trim().is_empty() {
            errors.push(FieldError::new(ContactField::Event, "Please choose an event"));
        }
        if self.location.trim().is_empty() {
            errors.push(FieldError::new(ContactField::Location, "Please enter a location"));
        }
        errors
    }

    /// Template parameters. The phone goes out as `number`, which is what the
    /// email template expects.
    pub fn template_fields(&self) -> BTreeMap<String, String> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("event", &self.event),
            ("number", &self.phone),
            ("date", &self.date),
            ("location", &self.location),
            ("message", &self.message),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.trim().to_string()))
        .collect()
    }
}
