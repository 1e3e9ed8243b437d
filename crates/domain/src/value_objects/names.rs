//! Validated name newtypes for domain entities
//!
//! These newtypes ensure that names are valid by construction:
//! - Non-empty
//! - Within length limits
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for pet names
const MAX_PET_NAME_LENGTH: usize = 50;

/// Length limits for usernames
const MIN_USERNAME_LENGTH: usize = 3;
const MAX_USERNAME_LENGTH: usize = 20;

// ============================================================================
// PetName
// ============================================================================

/// A validated pet name (non-empty, <=50 chars, trimmed)
///
/// Pet names are immutable after adoption; there is no rename operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PetName(String);

impl PetName {
    /// Create a new validated pet name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The name is empty after trimming
    /// - The name exceeds 50 characters after trimming
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation(
                "Pet name must be a non-empty string",
            ));
        }
        if trimmed.len() > MAX_PET_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Pet name must be {} characters or less",
                MAX_PET_NAME_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PetName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<PetName> for String {
    fn from(name: PetName) -> String {
        name.0
    }
}

// ============================================================================
// Username
// ============================================================================

/// A validated keeper username (3-20 chars, trimmed, `[A-Za-z0-9_-]` only)
///
/// Usernames are globally unique; uniqueness itself is enforced by storage,
/// this type only guards shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Create a new validated username.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if, after trimming:
    /// - The username is empty
    /// - The username is shorter than 3 or longer than 20 characters
    /// - The username contains anything outside letters, digits, `_`, `-`
    pub fn new(username: impl Into<String>) -> Result<Self, DomainError> {
        let username = username.into();
        let trimmed = username.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation(
                "Username must be a non-empty string",
            ));
        }
        if trimmed.len() < MIN_USERNAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Username must be at least {} characters",
                MIN_USERNAME_LENGTH
            )));
        }
        if trimmed.len() > MAX_USERNAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Username must be {} characters or less",
                MAX_USERNAME_LENGTH
            )));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(DomainError::validation(
                "Username can only contain letters, numbers, underscores, and hyphens",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the username as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Username {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Username> for String {
    fn from(username: Username) -> String {
        username.0
    }
}

// ============================================================================
// Tests
// ============================================================================
