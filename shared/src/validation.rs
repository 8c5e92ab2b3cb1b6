//! Input normalization and validation helpers
//!
//! Structural validation lives on the request DTOs via `validator` derives;
//! this module holds the pieces that are not expressible as derive rules.

/// Normalize an email for storage and lookup.
///
/// Emails are compared case-insensitively; every store operation must go
/// through this so "A@X.com" and "a@x.com" resolve to the same account.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
