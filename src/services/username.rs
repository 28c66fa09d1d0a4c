//! Username validation.
//!
//! Usernames are the last path segment of the public page URL, so they are
//! restricted to characters that never need escaping:
//! - Length: 1-64 characters
//! - ASCII letters, digits, `_`, `-`, `.`

/// Maximum username length.
pub const MAX_USERNAME_LENGTH: usize = 64;

/// Checks a username against the rules above.
///
/// # Errors
///
/// Returns a message describing the first rule the username breaks.
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username must not be empty".to_string());
    }
    if username.len() > MAX_USERNAME_LENGTH {
        return Err(format!("Username must be at most {MAX_USERNAME_LENGTH} characters"));
    }
    if let Some(bad) = username.chars().find(|c| !is_username_char(*c)) {
        return Err(format!("Username contains invalid character {bad:?}"));
    }
    Ok(())
}

#[inline]
fn is_username_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_url_safe_names() {
        for name in ["alice", "Alice_01", "a.b-c", "x"] {
            assert!(validate_username(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_empty_long_and_unsafe_names() {
        assert!(validate_username("").is_err());
        assert!(validate_username(&"a".repeat(MAX_USERNAME_LENGTH + 1)).is_err());
        for name in ["with space", "slash/name", "q?x", "émile"] {
            assert!(validate_username(name).is_err(), "{name} should be invalid");
        }
    }

    #[test]
    fn names_the_offending_character() {
        let err = validate_username("bad/name").unwrap_err();
        assert!(err.contains("'/'"));
    }
}
