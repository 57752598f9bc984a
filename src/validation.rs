//! Input validation
//!
//! Pure checks on customer fields. Nothing here touches the store.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AppError, Result};
use crate::models::CustomerInput;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,}$").expect("email regex is valid")
});

/// Matches `s` against a simplified `local@domain.tld` shape.
///
/// Lowercase only; exotic but RFC-valid addresses may be rejected.
pub fn validate_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

/// Checks a create/update payload before it reaches the store.
pub fn validate_customer(input: &CustomerInput) -> Result<()> {
    if !validate_email(&input.email) {
        return Err(AppError::Unprocessable(
            "Correo electrónico inválido".to_string(),
        ));
    }
    Ok(())
}
