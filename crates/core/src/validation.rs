//! Input validation for users, movies, and comments.
//!
//! Every validator trims its input and returns the normalized value so the
//! caller persists exactly what was checked. Lengths are counted in
//! characters, not bytes.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a movie title.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Maximum length of a comment body.
pub const MAX_COMMENT_LENGTH: usize = 2000;

/// Earliest accepted release year.
pub const MIN_RELEASE_YEAR: i32 = 1900;

/// How many years past the current one a release year may be.
pub const RELEASE_YEAR_LOOKAHEAD: i32 = 5;

/// Minimum password length enforced at signup.
pub const MIN_PASSWORD_LENGTH: usize = 8;

// ---------------------------------------------------------------------------
// Generic helpers
// ---------------------------------------------------------------------------

/// Trim `value` and reject it if nothing is left.
pub fn require_non_empty(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn require_max_length(field: &str, value: String, max: usize) -> Result<String, CoreError> {
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field} cannot be more than {max} characters"
        )));
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// Movies
// ---------------------------------------------------------------------------

pub fn validate_title(title: &str) -> Result<String, CoreError> {
    let title = require_non_empty("Title", title)?;
    require_max_length("Title", title, MAX_TITLE_LENGTH)
}

pub fn validate_description(description: &str) -> Result<String, CoreError> {
    require_non_empty("Description", description)
}

/// Check `year` against `[MIN_RELEASE_YEAR, current_year + RELEASE_YEAR_LOOKAHEAD]`.
pub fn validate_release_year(year: i32, current_year: i32) -> Result<(), CoreError> {
    let max = current_year + RELEASE_YEAR_LOOKAHEAD;
    if year < MIN_RELEASE_YEAR {
        return Err(CoreError::Validation(format!(
            "Year must be {MIN_RELEASE_YEAR} or later"
        )));
    }
    if year > max {
        return Err(CoreError::Validation(format!(
            "Year cannot be later than {max}"
        )));
    }
    Ok(())
}

/// Trim each genre and drop the blank ones. Order is preserved.
pub fn normalize_genres(genres: Vec<String>) -> Vec<String> {
    genres
        .into_iter()
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty())
        .collect()
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

pub fn validate_comment_body(body: &str) -> Result<String, CoreError> {
    let body = require_non_empty("Comment body", body)?;
    require_max_length("Comment body", body, MAX_COMMENT_LENGTH)
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Trim and lowercase an email, then check it looks like `local@domain.tld`.
pub fn normalize_email(email: &str) -> Result<String, CoreError> {
    let email = require_non_empty("Email", email)?.to_lowercase();

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        return Err(CoreError::Validation(
            "Please use a valid email address".into(),
        ));
    }
    Ok(email)
}

pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}
