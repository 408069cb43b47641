//! # Candidate Validation
//!
//! Pure checks over a candidate payload. Checks run in a fixed order and
//! short-circuit, so the reported reason is always the first violated rule.
//! No side effects; safe to call concurrently without synchronization.

use super::errors::ValidationError;
use super::model::UserPayload;

/// Maximum accepted username length, in characters.
pub const MAX_USERNAME_LENGTH: usize = 100;

/// Inclusive upper bound for age.
pub const MAX_AGE: i32 = 150;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// A candidate that passed every check.
///
/// This is the only input type the store accepts for create/update, which
/// makes "validate before mutation" structural rather than a convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub age: i32,
    pub password: String,
}

/// Validate a candidate payload, producing the validated record data or
/// the first violated rule.
pub fn validate(payload: Option<&UserPayload>) -> Result<NewUser, ValidationError> {
    let payload = payload.ok_or(ValidationError::UserDataRequired)?;

    let username = match payload.username.as_deref() {
        Some(username) if !username.trim().is_empty() => username,
        _ => return Err(ValidationError::UsernameRequired),
    };
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooLong);
    }

    let email = match payload.email.as_deref() {
        Some(email) if !email.trim().is_empty() => email,
        _ => return Err(ValidationError::EmailRequired),
    };
    if !is_valid_email(email) {
        return Err(ValidationError::EmailInvalid);
    }

    // An absent age cannot be in range, so it fails the same rule.
    let age = match payload.age {
        Some(age) if (0..=MAX_AGE).contains(&age) => age,
        _ => return Err(ValidationError::AgeOutOfRange),
    };

    let password = match payload.password.as_deref() {
        Some(password) if !password.trim().is_empty() => password,
        _ => return Err(ValidationError::PasswordRequired),
    };
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }

    Ok(NewUser {
        username: username.to_string(),
        email: email.to_string(),
        age,
        password: password.to_string(),
    })
}

/// Syntactic email check: one `@` splitting a non-empty local part from a
/// non-empty domain, no whitespace, no second `@`.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> UserPayload {
        UserPayload {
            username: Some("Alice".to_string()),
            email: Some("alice@example.com".to_string()),
            age: Some(30),
            password: Some("password123".to_string()),
        }
    }

    #[test]
    fn test_valid_candidate_passes() {
        let candidate = validate(Some(&valid_payload())).unwrap();
        assert_eq!(candidate.username, "Alice");
        assert_eq!(candidate.email, "alice@example.com");
        assert_eq!(candidate.age, 30);
        assert_eq!(candidate.password, "password123");
    }

    #[test]
    fn test_absent_candidate_is_rejected_first() {
        assert_eq!(validate(None), Err(ValidationError::UserDataRequired));
    }

    #[test]
    fn test_blank_username_rejected() {
        let mut payload = valid_payload();
        payload.username = Some("   ".to_string());
        assert_eq!(
            validate(Some(&payload)),
            Err(ValidationError::UsernameRequired)
        );

        payload.username = None;
        assert_eq!(
            validate(Some(&payload)),
            Err(ValidationError::UsernameRequired)
        );
    }

    #[test]
    fn test_username_length_boundary() {
        let mut payload = valid_payload();
        payload.username = Some("x".repeat(MAX_USERNAME_LENGTH));
        assert!(validate(Some(&payload)).is_ok());

        payload.username = Some("x".repeat(MAX_USERNAME_LENGTH + 1));
        assert_eq!(
            validate(Some(&payload)),
            Err(ValidationError::UsernameTooLong)
        );
    }

    #[test]
    fn test_missing_email_rejected() {
        let mut payload = valid_payload();
        payload.email = Some(String::new());
        assert_eq!(validate(Some(&payload)), Err(ValidationError::EmailRequired));
    }

    #[test]
    fn test_email_syntax() {
        for bad in ["invalid-email", "@example.com", "alice@", "a b@example.com", "a@b@c"] {
            let mut payload = valid_payload();
            payload.email = Some(bad.to_string());
            assert_eq!(
                validate(Some(&payload)),
                Err(ValidationError::EmailInvalid),
                "expected {bad:?} to be rejected"
            );
        }

        // Minimal but structurally valid address.
        let mut payload = valid_payload();
        payload.email = Some("a@b".to_string());
        assert!(validate(Some(&payload)).is_ok());
    }

    #[test]
    fn test_age_bounds() {
        for (age, ok) in [(0, true), (150, true), (-1, false), (151, false)] {
            let mut payload = valid_payload();
            payload.age = Some(age);
            assert_eq!(validate(Some(&payload)).is_ok(), ok, "age {age}");
        }

        let mut payload = valid_payload();
        payload.age = None;
        assert_eq!(validate(Some(&payload)), Err(ValidationError::AgeOutOfRange));
    }

    #[test]
    fn test_password_rules() {
        let mut payload = valid_payload();
        payload.password = Some(String::new());
        assert_eq!(
            validate(Some(&payload)),
            Err(ValidationError::PasswordRequired)
        );

        payload.password = Some("short".to_string());
        assert_eq!(
            validate(Some(&payload)),
            Err(ValidationError::PasswordTooShort)
        );

        payload.password = Some("secret".to_string());
        assert!(validate(Some(&payload)).is_ok());
    }

    #[test]
    fn test_checks_are_order_sensitive() {
        // Username and email are both wrong; the username rule wins.
        let payload = UserPayload {
            username: None,
            email: Some("not-an-email".to_string()),
            age: Some(-5),
            password: None,
        };
        assert_eq!(
            validate(Some(&payload)),
            Err(ValidationError::UsernameRequired)
        );

        // With a username present, the email rule is next.
        let payload = UserPayload {
            username: Some("Alice".to_string()),
            ..payload
        };
        assert_eq!(validate(Some(&payload)), Err(ValidationError::EmailInvalid));
    }
}
