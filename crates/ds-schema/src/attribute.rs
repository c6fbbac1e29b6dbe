//! Attribute descriptions.
//!
//! An attribute description names an attribute type together with zero
//! or more options (RFC 4512 §2.5), e.g. `cn` or `cn;lang-fr`. The
//! attribute type is either a descriptor or a numeric OID. Underscores
//! are accepted in descriptors and options, matching the server's
//! attribute-name exceptions.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{SchemaError, SchemaResult};

/// A parsed attribute description: attribute type name plus options.
///
/// Comparison and hashing are case-insensitive, per schema semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AttributeDescription {
    name: String,
    options: Vec<String>,
}

impl AttributeDescription {
    /// Parses an attribute description from its string form.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidAttributeDescription`] when the
    /// text is empty, the attribute type name is neither a descriptor
    /// nor a numeric OID, or an option is empty or malformed.
    pub fn parse(s: &str) -> SchemaResult<Self> {
        if s.is_empty() {
            return Err(SchemaError::invalid_attribute("empty attribute description"));
        }

        let mut parts = s.split(';');
        let name = parts.next().unwrap_or_default();
        if name.is_empty() {
            return Err(SchemaError::invalid_attribute(format!(
                "{s:?}: empty attribute type name"
            )));
        }
        if !is_descriptor(name) && !is_numeric_oid(name) {
            return Err(SchemaError::invalid_attribute(format!(
                "{s:?}: invalid attribute type name {name:?}"
            )));
        }

        let mut options = Vec::new();
        for option in parts {
            if !is_option(option) {
                return Err(SchemaError::invalid_attribute(format!(
                    "{s:?}: invalid attribute option {option:?}"
                )));
            }
            options.push(option.to_string());
        }

        Ok(Self {
            name: name.to_string(),
            options,
        })
    }

    /// Returns the attribute type name (descriptor or numeric OID).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the attribute options, in source order.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Checks whether the description carries the given option.
    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o.eq_ignore_ascii_case(option))
    }
}

impl fmt::Display for AttributeDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for option in &self.options {
            write!(f, ";{option}")?;
        }
        Ok(())
    }
}

impl PartialEq for AttributeDescription {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
            && self.options.len() == other.options.len()
            && self
                .options
                .iter()
                .zip(&other.options)
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }
}

impl Eq for AttributeDescription {}

impl Hash for AttributeDescription {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.to_ascii_lowercase().hash(state);
        for option in &self.options {
            option.to_ascii_lowercase().hash(state);
        }
    }
}

impl TryFrom<String> for AttributeDescription {
    type Error = SchemaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AttributeDescription> for String {
    fn from(attribute: AttributeDescription) -> Self {
        attribute.to_string()
    }
}

/// A descriptor: an ASCII letter followed by letters, digits, dashes
/// and underscores.
fn is_descriptor(name: &str) -> bool {
    let bytes = name.as_bytes();
    match bytes.first() {
        Some(b) if b.is_ascii_alphabetic() => {}
        _ => return false,
    }
    bytes[1..]
        .iter()
        .all(|&b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// A numeric OID: dot-separated non-empty runs of digits.
fn is_numeric_oid(name: &str) -> bool {
    name.split('.')
        .all(|component| !component.is_empty() && component.bytes().all(|b| b.is_ascii_digit()))
}

fn is_option(option: &str) -> bool {
    !option.is_empty()
        && option
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
