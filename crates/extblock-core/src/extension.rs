//! Extension classification
//!
//! Turns whatever an operator typed (a full file name or a bare extension)
//! into the normalized token the blocklist is keyed by.

use thiserror::Error;

/// Longest extension accepted anywhere in the system
pub const MAX_EXTENSION_LEN: usize = 20;

/// Most fixed rules the authority will hold
pub const MAX_FIXED_RULES: usize = 10;

/// Most custom rules the authority will hold
pub const MAX_CUSTOM_RULES: usize = 200;

/// Reasons a raw input is not an acceptable extension
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Nothing but whitespace was entered
    #[error("Please enter a file name.")]
    EmptyInput,

    /// The input ends with a dot, so there is no extension after it
    #[error("Please enter a valid file name.")]
    TrailingDot,

    /// The extension is longer than [`MAX_EXTENSION_LEN`]
    #[error("Extensions can be at most {max} characters (got {len}).", max = MAX_EXTENSION_LEN)]
    TooLong {
        /// Length of the rejected extension in characters
        len: usize,
    },

    /// A rule extension may only contain ASCII letters and digits
    #[error("Extensions may only contain letters and digits.")]
    InvalidCharacters,
}

/// Canonical form of an extension: trimmed and lowercase
///
/// Every extension crossing into the cache or out to the authority goes
/// through here.
pub fn normalize(extension: &str) -> String {
    extension.trim().to_lowercase()
}

/// Extract and validate the extension of a file name
///
/// Input without a dot is taken as a bare extension; otherwise everything
/// after the last dot is used (`archive.tar.gz` gives `gz`).
pub fn classify(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    let candidate = match trimmed.rsplit_once('.') {
        Some((_, "")) => return Err(ValidationError::TrailingDot),
        Some((_, after)) => after,
        None => trimmed,
    };

    let extension = candidate.to_lowercase();
    check_length(&extension)?;
    Ok(extension)
}

/// Validate an extension that is about to become a rule
///
/// Stricter than [`classify`]: the input must be a bare extension made of
/// ASCII letters and digits. One leading dot is accepted (`.exe`).
pub fn validate_rule(raw: &str) -> Result<String, ValidationError> {
    let normalized = normalize(raw);
    let extension = normalized.strip_prefix('.').unwrap_or(&normalized).to_string();
    if extension.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    check_length(&extension)?;
    if !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidCharacters);
    }
    Ok(extension)
}

fn check_length(extension: &str) -> Result<(), ValidationError> {
    let len = extension.chars().count();
    if len > MAX_EXTENSION_LEN {
        return Err(ValidationError::TooLong { len });
    }
    Ok(())
}
