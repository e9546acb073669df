//! Contact form: values, schema and parsed message

use crate::error::{FormError, Result};
use crate::form::{
    FieldKind, FieldSchema, FieldValue, FormValues, ObjectSchema, Schema, ValidationIssue,
};
use serde::{Deserialize, Serialize};

const FIELDS: [&str; 4] = ["name", "email", "subject", "message"];

/// Raw values of the contact form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            ..Default::default()
        }
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "name" => Some(&mut self.name),
            "email" => Some(&mut self.email),
            "subject" => Some(&mut self.subject),
            "message" => Some(&mut self.message),
            _ => None,
        }
    }

    fn slot(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "email" => Some(&self.email),
            "subject" => Some(&self.subject),
            "message" => Some(&self.message),
            _ => None,
        }
    }
}

impl FormValues for ContactForm {
    fn field_names(&self) -> Vec<&str> {
        FIELDS.to_vec()
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        self.slot(name).map(FieldValue::text)
    }

    fn field_kind(&self, name: &str) -> Option<FieldKind> {
        self.slot(name).map(|_| FieldKind::Text)
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<()> {
        FieldKind::Text.check(name, &value)?;
        let slot = self
            .slot_mut(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        *slot = value.as_text().to_string();
        Ok(())
    }
}

/// Parsed contact message handed to the submit handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// Length and format checks for one text field
#[derive(Debug, Clone, Copy)]
struct TextRule {
    required: Option<&'static str>,
    min: Option<(usize, &'static str)>,
    max: Option<(usize, &'static str)>,
    email: Option<&'static str>,
}

impl TextRule {
    const OPTIONAL: TextRule = TextRule {
        required: None,
        min: None,
        max: None,
        email: None,
    };

    /// Every failing check, in declaration order.
    ///
    /// Lengths are counted in UTF-16 code units, as browsers report them.
    fn messages(&self, value: &str) -> Vec<&'static str> {
        let len = value.encode_utf16().count();
        let mut messages = Vec::new();
        if let Some(msg) = self.required {
            if value.is_empty() {
                messages.push(msg);
            }
        }
        // Optional fields skip the remaining checks when blank
        if self.required.is_none() && value.is_empty() {
            return messages;
        }
        if let Some((min, msg)) = self.min {
            if len < min {
                messages.push(msg);
            }
        }
        if let Some((max, msg)) = self.max {
            if len > max {
                messages.push(msg);
            }
        }
        if let Some(msg) = self.email {
            if !looks_like_email(value) {
                messages.push(msg);
            }
        }
        messages
    }
}

impl FieldSchema for TextRule {
    fn safe_parse(&self, value: &FieldValue) -> std::result::Result<(), Vec<ValidationIssue>> {
        let messages = self.messages(value.as_text());
        if messages.is_empty() {
            Ok(())
        } else {
            Err(messages.into_iter().map(ValidationIssue::root).collect())
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.split('.').count() >= 2
        && domain.split('.').all(|part| !part.is_empty())
}

/// Schema of the contact form.
///
/// Name and email carry the site's usual rules and messages. Subject and
/// message are optional here, looser than the site's contact form (which
/// requires a message of at least 10 characters), so a name and an email
/// alone make a valid submission.
#[derive(Debug, Clone)]
pub struct ContactSchema;

impl ContactSchema {
    const NAME: TextRule = TextRule {
        required: Some("Name is required"),
        min: Some((2, "Name must be at least 2 characters")),
        max: Some((100, "Name must be less than 100 characters")),
        email: None,
    };

    const EMAIL: TextRule = TextRule {
        required: Some("Email is required"),
        min: None,
        max: None,
        email: Some("Please enter a valid email address"),
    };

    const SUBJECT: TextRule = TextRule::OPTIONAL;

    const MESSAGE: TextRule = TextRule {
        max: Some((5000, "Message must be less than 5000 characters")),
        ..TextRule::OPTIONAL
    };

    fn rule(name: &str) -> Option<&'static TextRule> {
        match name {
            "name" => Some(&Self::NAME),
            "email" => Some(&Self::EMAIL),
            "subject" => Some(&Self::SUBJECT),
            "message" => Some(&Self::MESSAGE),
            _ => None,
        }
    }
}

impl ObjectSchema for ContactSchema {
    fn field_schema(&self, name: &str) -> Option<&dyn FieldSchema> {
        Self::rule(name).map(|rule| rule as &dyn FieldSchema)
    }
}

impl Schema<ContactForm> for ContactSchema {
    type Output = ContactMessage;

    fn safe_parse(
        &self,
        candidate: &ContactForm,
    ) -> std::result::Result<ContactMessage, Vec<ValidationIssue>> {
        let mut issues = Vec::new();
        for name in FIELDS {
            if let (Some(rule), Some(value)) = (Self::rule(name), candidate.slot(name)) {
                issues.extend(
                    rule.messages(value)
                        .into_iter()
                        .map(|msg| ValidationIssue::new(name, msg)),
                );
            }
        }
        if !issues.is_empty() {
            return Err(issues);
        }

        let optional = |s: &str| {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };
        Ok(ContactMessage {
            name: candidate.name.trim().to_string(),
            email: candidate.email.trim().to_lowercase(),
            subject: optional(&candidate.subject),
            message: optional(&candidate.message),
        })
    }

    fn as_object(&self) -> Option<&dyn ObjectSchema> {
        Some(self)
    }
}
