//! Signup payload validation.
//!
//! All fields are validated locally before the identity provider is
//! consulted, so malformed requests never cost a provider round trip.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::{EmailAddress, UserName, UserValidationError};

/// Minimum allowed password length in characters.
pub const PASSWORD_MIN: usize = 8;

/// Domain error returned when signup payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupValidationError {
    /// Email or name failed user-domain validation.
    User(UserValidationError),
    /// Password shorter than the minimum length.
    PasswordTooShort {
        /// Minimum number of characters required.
        min: usize,
    },
}

impl fmt::Display for SignupValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(inner) => inner.fmt(f),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for SignupValidationError {}

impl From<UserValidationError> for SignupValidationError {
    fn from(value: UserValidationError) -> Self {
        Self::User(value)
    }
}

/// Password supplied at signup.
///
/// ## Invariants
/// - At least [`PASSWORD_MIN`] characters; whitespace is preserved so the
///   provider sees exactly what the user typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate and construct a [`Password`] from raw input.
    pub fn new(raw: impl Into<String>) -> Result<Self, SignupValidationError> {
        let raw = raw.into();
        if raw.chars().count() < PASSWORD_MIN {
            return Err(SignupValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self(Zeroizing::new(raw)))
    }

    /// Raw password value for the provider request body.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

/// Validated signup payload handed to the identity provider port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupDetails {
    email: EmailAddress,
    password: Password,
    name: UserName,
}

impl SignupDetails {
    /// Construct signup details from raw request fields.
    pub fn try_from_parts(
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Self, SignupValidationError> {
        let email = EmailAddress::new(email)?;
        let password = Password::new(password)?;
        let name = UserName::new(name)?;
        Ok(Self {
            email,
            password,
            name,
        })
    }

    /// Email address to register.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password to register.
    #[must_use]
    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Display name to store on the profile.
    #[must_use]
    pub fn name(&self) -> &UserName {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("ada@example.com", "short", "Ada")]
    #[case("ada@example.com", "1234567", "Ada")]
    #[case("ada@example.com", "", "Ada")]
    fn rejects_short_passwords(#[case] email: &str, #[case] password: &str, #[case] name: &str) {
        let err = SignupDetails::try_from_parts(email, password, name)
            .expect_err("short password must fail");
        assert_eq!(
            err,
            SignupValidationError::PasswordTooShort { min: PASSWORD_MIN }
        );
    }

    #[rstest]
    #[case("not-an-email", UserValidationError::InvalidEmail)]
    #[case("", UserValidationError::EmptyEmail)]
    fn rejects_bad_emails(#[case] email: &str, #[case] expected: UserValidationError) {
        let err = SignupDetails::try_from_parts(email, "long-enough", "Ada")
            .expect_err("bad email must fail");
        assert_eq!(err, SignupValidationError::User(expected));
    }

    #[test]
    fn rejects_blank_names() {
        let err = SignupDetails::try_from_parts("ada@example.com", "long-enough", "  ")
            .expect_err("blank name must fail");
        assert_eq!(
            err,
            SignupValidationError::User(UserValidationError::EmptyName)
        );
    }

    #[test]
    fn accepts_exactly_eight_character_passwords() {
        let details = SignupDetails::try_from_parts("ada@example.com", "12345678", "Ada")
            .expect("valid signup");
        assert_eq!(details.password().expose(), "12345678");
        assert_eq!(details.email().as_ref(), "ada@example.com");
        assert_eq!(details.name().as_ref(), "Ada");
    }

    #[test]
    fn preserves_password_whitespace() {
        let details = SignupDetails::try_from_parts("ada@example.com", "  padded  ", "Ada")
            .expect("valid signup");
        assert_eq!(details.password().expose(), "  padded  ");
    }
}
