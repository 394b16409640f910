//! Contact record and phone category.
//!
//! # Responsibility
//! - Define the persisted contact shape and its wire field names.
//! - Compose and split the `"<category>: <number>"` phone string.
//! - Validate form input before a contact is saved.
//!
//! # Invariants
//! - `id` is generated once and never reused.
//! - A contact is only built from a draft with at least one non-empty field.
//!   Stored contacts are not re-validated on load.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier assigned when a contact is created.
pub type ContactId = Uuid;

const EMPTY_NAME_LABEL: &str = "Name not provided";

/// Category tag prefixed to a phone number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhoneCategory {
    #[default]
    Cell,
    Work,
    Home,
}

impl PhoneCategory {
    /// All categories in selector order.
    pub const ALL: [PhoneCategory; 3] = [Self::Cell, Self::Work, Self::Home];

    /// Label written into the stored phone string.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cell => "Cell",
            Self::Work => "Work",
            Self::Home => "Home",
        }
    }

    /// Parses a canonical or legacy label, ignoring case and surrounding spaces.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "cell" | "celular" => Some(Self::Cell),
            "work" | "comercial" => Some(Self::Work),
            "home" | "casa" => Some(Self::Home),
            _ => None,
        }
    }
}

impl Display for PhoneCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PhoneCategory {
    type Err = ContactValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| ContactValidationError::UnknownCategory(value.to_string()))
    }
}

/// Category and number split out of a stored phone string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneParts {
    pub category: PhoneCategory,
    pub number: String,
}

impl PhoneParts {
    /// Splits `phone` at the first `:`.
    ///
    /// A missing separator or unknown label falls back to the default
    /// category with the whole trimmed string as the number.
    pub fn split(phone: &str) -> Self {
        if let Some((label, number)) = phone.split_once(':') {
            if let Some(category) = PhoneCategory::parse(label) {
                return Self {
                    category,
                    number: number.trim().to_string(),
                };
            }
        }
        Self {
            category: PhoneCategory::default(),
            number: phone.trim().to_string(),
        }
    }

    /// Formats as `"<category>: <number>"`. The number is kept verbatim.
    pub fn format(&self) -> String {
        format!("{}: {}", self.category.label(), self.number)
    }
}

/// Persisted contact record.
///
/// Wire names (`nome`, `telefone`) match blobs written by earlier releases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    #[serde(rename = "nome", default)]
    pub name: String,
    /// Formatted `"<category>: <number>"` string.
    #[serde(rename = "telefone", default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

impl Contact {
    /// Splits the stored phone string into category and number.
    pub fn phone_parts(&self) -> PhoneParts {
        PhoneParts::split(&self.phone)
    }

    /// Name for list rendering, with a placeholder for empty names.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            EMPTY_NAME_LABEL
        } else {
            &self.name
        }
    }

    /// Builds a form draft prefilled from this contact.
    pub fn to_draft(&self) -> ContactDraft {
        let parts = self.phone_parts();
        ContactDraft {
            name: self.name.clone(),
            category: parts.category,
            number: parts.number,
            email: self.email.clone(),
        }
    }
}

/// Form input used to create or replace a contact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub category: PhoneCategory,
    /// Typed number without the category prefix.
    pub number: String,
    pub email: String,
}

impl ContactDraft {
    pub fn new(
        name: impl Into<String>,
        category: PhoneCategory,
        number: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            number: number.into(),
            email: email.into(),
        }
    }

    /// Rejects drafts whose name, number and email are all empty.
    ///
    /// The category alone does not count as content.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if self.name.is_empty() && self.number.is_empty() && self.email.is_empty() {
            return Err(ContactValidationError::EmptyContact);
        }
        Ok(())
    }

    /// Validates and builds a new contact with a generated id.
    pub fn into_contact(self) -> Result<Contact, ContactValidationError> {
        self.into_contact_with_id(Uuid::new_v4())
    }

    /// Validates and builds a contact that keeps an existing id.
    pub fn into_contact_with_id(self, id: ContactId) -> Result<Contact, ContactValidationError> {
        self.validate()?;
        let phone = PhoneParts {
            category: self.category,
            number: self.number,
        }
        .format();
        Ok(Contact {
            id,
            name: self.name,
            phone,
            email: self.email,
        })
    }
}

/// Input validation error for contact drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    /// Name, number and email are all empty.
    EmptyContact,
    /// Phone category label is not recognized.
    UnknownCategory(String),
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContact => write!(f, "Enter text in at least one field"),
            Self::UnknownCategory(value) => write!(
                f,
                "unknown phone category `{value}`; expected Cell|Work|Home"
            ),
        }
    }
}

impl Error for ContactValidationError {}
